//! Brings stored logs into the current schema.
//!
//! Two on-disk shapes exist: the bare `date -> meals` map written by the
//! browser-only tracker, and the versioned `{ version, days }` document. Either
//! may hold entries as bare category strings from before portions existed.
//! Everything is rewritten into canonical [`LogEntry`] values here, once, so
//! nothing downstream has to re-check entry shapes.

use crate::models::{AppData, DayLog, LogEntry, LogStore, MealSlot, Portion, SCHEMA_VERSION};
use crate::week::parse_date_key;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Schema version found on disk; `None` for the unversioned map.
    pub source_version: Option<u32>,
    pub legacy_entries: usize,
    /// Slots kept under a name outside the five tracker slots.
    pub foreign_slots: usize,
    /// Valid dates with nothing logged; not an error.
    pub empty_days: usize,
    pub dropped_days: usize,
    pub dropped_slots: usize,
    pub dropped_entries: usize,
}

impl MigrationReport {
    pub fn changed_anything(&self) -> bool {
        self.source_version != Some(SCHEMA_VERSION)
            || self.legacy_entries > 0
            || self.empty_days > 0
            || self.dropped_days > 0
            || self.dropped_slots > 0
            || self.dropped_entries > 0
    }
}

pub fn normalize_store(value: Value) -> (AppData, MigrationReport) {
    let mut report = MigrationReport::default();

    let days = match value {
        Value::Object(mut document) if document.contains_key("version") => {
            report.source_version = document
                .get("version")
                .and_then(Value::as_u64)
                .and_then(|version| u32::try_from(version).ok());
            match document.remove("days") {
                Some(Value::Object(days)) => days,
                _ => Map::new(),
            }
        }
        Value::Object(days) => days,
        _ => Map::new(),
    };

    let mut store = LogStore::default();
    for (date, meals) in days {
        if parse_date_key(&date).is_none() {
            report.dropped_days += 1;
            continue;
        }

        let Value::Object(meals) = meals else {
            report.dropped_days += 1;
            continue;
        };

        let day = normalize_day(meals, &mut report);
        if day.values().all(Vec::is_empty) {
            report.empty_days += 1;
            continue;
        }
        store.put(&date, day);
    }

    let data = AppData {
        version: SCHEMA_VERSION,
        days: store,
    };
    (data, report)
}

fn normalize_day(meals: Map<String, Value>, report: &mut MigrationReport) -> DayLog {
    let mut day = DayLog::new();

    for (slot_name, items) in meals {
        let Value::Array(items) = items else {
            report.dropped_slots += 1;
            continue;
        };
        let slot = MealSlot::from(slot_name);
        if !slot.is_standard() {
            report.foreign_slots += 1;
        }

        let entries = day.entry(slot).or_default();
        for item in items {
            match normalize_entry(item) {
                Some((entry, legacy)) => {
                    if legacy {
                        report.legacy_entries += 1;
                    }
                    entries.push(entry);
                }
                None => report.dropped_entries += 1,
            }
        }
    }

    day
}

/// Returns the canonical entry and whether it came from a bare string.
fn normalize_entry(item: Value) -> Option<(LogEntry, bool)> {
    match item {
        Value::String(id) if !id.is_empty() => Some((LogEntry::new(id, Portion::default()), true)),
        Value::Object(mut fields) => {
            let id = match fields.remove("id") {
                Some(Value::String(id)) if !id.is_empty() => id,
                _ => return None,
            };
            let portion = match fields.remove("portion") {
                Some(value) if is_truthy(&value) => match value {
                    Value::String(portion) => Portion::from(portion),
                    other => Portion::Unrecognized(other.to_string()),
                },
                _ => Portion::default(),
            };
            Some((LogEntry::new(id, portion), false))
        }
        _ => None,
    }
}

/// Missing, `null`, `""`, `0` and `false` portions mean a full plate; any
/// other value is kept as an unrecognized portion.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
