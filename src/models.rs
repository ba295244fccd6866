use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const SCHEMA_VERSION: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortionSize {
    Teaspoon,
    Spoon,
    Cup,
    Bowl,
    Plate,
}

impl PortionSize {
    pub const ALL: [PortionSize; 5] = [
        PortionSize::Teaspoon,
        PortionSize::Spoon,
        PortionSize::Cup,
        PortionSize::Bowl,
        PortionSize::Plate,
    ];

    pub fn weight(self) -> u32 {
        match self {
            PortionSize::Teaspoon => 1,
            PortionSize::Spoon => 2,
            PortionSize::Cup => 3,
            PortionSize::Bowl => 4,
            PortionSize::Plate => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PortionSize::Teaspoon => "teaspoon",
            PortionSize::Spoon => "spoon",
            PortionSize::Cup => "cup",
            PortionSize::Bowl => "bowl",
            PortionSize::Plate => "plate",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.as_str() == value)
    }
}

/// Portion as stored on disk. Values outside the known sizes are kept so
/// that rewriting the store does not lose them; they weigh 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Portion {
    Known(PortionSize),
    Unrecognized(String),
}

impl Portion {
    pub fn weight(&self) -> u32 {
        match self {
            Portion::Known(size) => size.weight(),
            Portion::Unrecognized(_) => 1,
        }
    }
}

impl Default for Portion {
    fn default() -> Self {
        Portion::Known(PortionSize::Plate)
    }
}

impl From<String> for Portion {
    fn from(value: String) -> Self {
        match PortionSize::parse(&value) {
            Some(size) => Portion::Known(size),
            None => Portion::Unrecognized(value),
        }
    }
}

impl From<Portion> for String {
    fn from(value: Portion) -> Self {
        match value {
            Portion::Known(size) => size.as_str().to_string(),
            Portion::Unrecognized(raw) => raw,
        }
    }
}

impl From<PortionSize> for Portion {
    fn from(value: PortionSize) -> Self {
        Portion::Known(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "id")]
    pub category_id: String,
    #[serde(default)]
    pub portion: Portion,
}

impl LogEntry {
    pub fn new(category_id: impl Into<String>, portion: impl Into<Portion>) -> Self {
        Self {
            category_id: category_id.into(),
            portion: portion.into(),
        }
    }
}

/// Meal a day's entries are filed under. Slot names written by other
/// revisions of the tracker are kept as `Other` so their entries still count.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MealSlot {
    Breakfast,
    Snack1,
    Lunch,
    Snack2,
    Dinner,
    Other(String),
}

impl MealSlot {
    pub const ALL: [MealSlot; 5] = [
        MealSlot::Breakfast,
        MealSlot::Snack1,
        MealSlot::Lunch,
        MealSlot::Snack2,
        MealSlot::Dinner,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Snack1 => "Snack 1",
            MealSlot::Lunch => "Lunch",
            MealSlot::Snack2 => "Snack 2",
            MealSlot::Dinner => "Dinner",
            MealSlot::Other(name) => name,
        }
    }

    /// One of the five tracker slots; `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.as_str() == value)
    }

    pub fn is_standard(&self) -> bool {
        !matches!(self, MealSlot::Other(_))
    }
}

impl From<String> for MealSlot {
    fn from(value: String) -> Self {
        MealSlot::parse(&value).unwrap_or(MealSlot::Other(value))
    }
}

impl From<MealSlot> for String {
    fn from(value: MealSlot) -> Self {
        match value {
            MealSlot::Other(name) => name,
            slot => slot.as_str().to_string(),
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type DayLog = BTreeMap<MealSlot, Vec<LogEntry>>;

/// Day logs keyed by `YYYY-MM-DD`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(transparent)]
pub struct LogStore {
    pub days: BTreeMap<String, DayLog>,
}

impl LogStore {
    pub fn get(&self, date: &str) -> DayLog {
        self.days.get(date).cloned().unwrap_or_default()
    }

    /// Stores `day` under `date`. Slots without entries are not kept, and a
    /// day with nothing left is removed.
    pub fn put(&mut self, date: &str, mut day: DayLog) {
        day.retain(|_, entries| !entries.is_empty());
        if day.is_empty() {
            self.days.remove(date);
        } else {
            self.days.insert(date.to_string(), day);
        }
    }

    pub fn entry_count(&self) -> usize {
        self.days
            .values()
            .flat_map(|day| day.values())
            .map(Vec::len)
            .sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppData {
    pub version: u32,
    pub days: LogStore,
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            days: LogStore::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddEntryRequest {
    pub meal: String,
    pub category_id: String,
    pub portion: String,
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub week: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayLogResponse {
    pub date: String,
    pub meals: DayLog,
}

#[derive(Debug, Serialize)]
pub struct PortionInfo {
    pub id: &'static str,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub category_id: String,
    pub label: String,
    pub color: String,
    pub times_eaten: u32,
    pub weighted_score: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WeeklySummary {
    pub ranking: Vec<RankedEntry>,
    pub total_items: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeeklyStatsResponse {
    pub week: String,
    pub start_date: String,
    pub end_date: String,
    pub total_items: u32,
    pub max_score: u32,
    pub ranking: Vec<RankedEntry>,
}
