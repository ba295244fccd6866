use crate::catalog;
use crate::models::{LogStore, RankedEntry, WeeklyStatsResponse, WeeklySummary};
use crate::week::{date_key, IsoWeek};
use std::{cmp::Ordering, collections::BTreeMap, ops::Bound};

pub fn build_weekly_stats(store: &LogStore, week: IsoWeek) -> WeeklyStatsResponse {
    let (start, end) = week.range();
    let start_date = date_key(start);
    let end_date = date_key(end);
    let summary = aggregate_week(store, &start_date, &end_date);

    WeeklyStatsResponse {
        week: week.to_string(),
        max_score: summary.ranking.first().map_or(0, |entry| entry.weighted_score),
        total_items: summary.total_items,
        ranking: summary.ranking,
        start_date,
        end_date,
    }
}

/// Totals every entry logged between `start_date` and `end_date` (inclusive,
/// `YYYY-MM-DD`) per category and ranks the categories.
///
/// Meal slots are flattened. Keys compare as strings, which matches date order
/// for zero-padded ISO dates. An inverted window yields an empty summary.
pub fn aggregate_week(store: &LogStore, start_date: &str, end_date: &str) -> WeeklySummary {
    if start_date > end_date {
        return WeeklySummary::default();
    }

    let mut bucket: BTreeMap<&str, RankedEntry> = BTreeMap::new();
    let mut total_items = 0u32;

    let window = store
        .days
        .range::<str, _>((Bound::Included(start_date), Bound::Included(end_date)));
    for (_, day) in window {
        for entry in day.values().flatten() {
            let ranked = bucket.entry(entry.category_id.as_str()).or_insert_with(|| {
                let (label, color) = catalog::display(&entry.category_id);
                RankedEntry {
                    category_id: entry.category_id.clone(),
                    label,
                    color,
                    times_eaten: 0,
                    weighted_score: 0,
                }
            });
            ranked.times_eaten = ranked.times_eaten.saturating_add(1);
            ranked.weighted_score = ranked.weighted_score.saturating_add(entry.portion.weight());
            total_items = total_items.saturating_add(1);
        }
    }

    let mut ranking: Vec<RankedEntry> = bucket.into_values().collect();
    ranking.sort_by(rank_order);

    WeeklySummary {
        ranking,
        total_items,
    }
}

fn rank_order(a: &RankedEntry, b: &RankedEntry) -> Ordering {
    b.weighted_score
        .cmp(&a.weighted_score)
        .then_with(|| b.times_eaten.cmp(&a.times_eaten))
        .then_with(|| a.label.cmp(&b.label))
        .then_with(|| a.category_id.cmp(&b.category_id))
}
