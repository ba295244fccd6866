use crate::catalog::{self, CategoryMeta, CATEGORIES};
use crate::errors::AppError;
use crate::models::{
    AddEntryRequest, DayLog, DayLogResponse, LogEntry, MealSlot, Portion, PortionInfo, PortionSize,
    StatsQuery, WeeklyStatsResponse,
};
use crate::state::AppState;
use crate::stats::build_weekly_stats;
use crate::storage::persist_data;
use crate::ui::{render_stats, render_tracker};
use crate::week::{parse_date_key, IsoWeek};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::Local;
use tracing::info;

pub async fn index() -> Html<String> {
    Html(render_tracker(&today_string()))
}

pub async fn stats_page() -> Html<String> {
    let week = IsoWeek::containing(Local::now().date_naive());
    Html(render_stats(&week.to_string()))
}

pub async fn list_categories() -> Json<&'static [CategoryMeta]> {
    Json(CATEGORIES)
}

pub async fn list_portions() -> Json<Vec<PortionInfo>> {
    let portions = PortionSize::ALL
        .into_iter()
        .map(|size| PortionInfo {
            id: size.as_str(),
            weight: size.weight(),
        })
        .collect();
    Json(portions)
}

pub async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DayLogResponse>, AppError> {
    let date = validate_date(date)?;
    let data = state.data.lock().await;
    let meals = data.days.get(&date);
    Ok(Json(DayLogResponse { date, meals }))
}

/// Replaces the whole day. Held to the same rules as `add_entry`: tracker
/// slots, catalog categories and known portions only.
pub async fn put_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(meals): Json<DayLog>,
) -> Result<Json<DayLogResponse>, AppError> {
    let date = validate_date(date)?;
    validate_day(&meals)?;
    let mut data = state.data.lock().await;
    data.days.put(&date, meals);
    persist_data(&state.data_path, &data).await?;

    info!(%date, "replaced day log");
    let meals = data.days.get(&date);
    Ok(Json(DayLogResponse { date, meals }))
}

pub async fn add_entry(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<AddEntryRequest>,
) -> Result<(StatusCode, Json<DayLogResponse>), AppError> {
    let date = validate_date(date)?;
    let meal = parse_meal(payload.meal.trim())?;
    let category_id = payload.category_id.trim();
    if catalog::lookup(category_id).is_none() {
        return Err(AppError::bad_request(format!("unknown category '{category_id}'")));
    }
    let portion = PortionSize::parse(payload.portion.trim()).ok_or_else(|| {
        AppError::bad_request("portion must be one of teaspoon, spoon, cup, bowl, plate")
    })?;

    let mut data = state.data.lock().await;
    let mut day = data.days.get(&date);
    day.entry(meal.clone())
        .or_default()
        .push(LogEntry::new(category_id, portion));
    data.days.put(&date, day);
    persist_data(&state.data_path, &data).await?;

    info!(%date, %meal, category_id, portion = portion.as_str(), "logged food");
    let meals = data.days.get(&date);
    Ok((StatusCode::CREATED, Json(DayLogResponse { date, meals })))
}

pub async fn remove_entry(
    State(state): State<AppState>,
    Path((date, meal, index)): Path<(String, String, usize)>,
) -> Result<Json<DayLogResponse>, AppError> {
    let date = validate_date(date)?;
    let meal = parse_meal(&meal)?;

    let mut data = state.data.lock().await;
    let mut day = data.days.get(&date);
    let entries = day.entry(meal.clone()).or_default();
    if index >= entries.len() {
        return Err(AppError::not_found(format!("no entry {index} in {meal} on {date}")));
    }
    let removed = entries.remove(index);
    data.days.put(&date, day);
    persist_data(&state.data_path, &data).await?;

    info!(%date, %meal, category_id = %removed.category_id, "removed food");
    let meals = data.days.get(&date);
    Ok(Json(DayLogResponse { date, meals }))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<WeeklyStatsResponse>, AppError> {
    let week = match query.week.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => raw.parse::<IsoWeek>()?,
        _ => IsoWeek::containing(Local::now().date_naive()),
    };

    let data = state.data.lock().await;
    Ok(Json(build_weekly_stats(&data.days, week)))
}

fn validate_date(date: String) -> Result<String, AppError> {
    match parse_date_key(&date) {
        Some(_) => Ok(date),
        None => Err(AppError::bad_request("date must be YYYY-MM-DD")),
    }
}

fn validate_day(meals: &DayLog) -> Result<(), AppError> {
    for (meal, entries) in meals {
        if !meal.is_standard() {
            return Err(AppError::bad_request(format!("unknown meal '{meal}'")));
        }
        for entry in entries {
            if catalog::lookup(&entry.category_id).is_none() {
                return Err(AppError::bad_request(format!(
                    "unknown category '{}'",
                    entry.category_id
                )));
            }
            if let Portion::Unrecognized(raw) = &entry.portion {
                return Err(AppError::bad_request(format!("unknown portion '{raw}'")));
            }
        }
    }
    Ok(())
}

fn parse_meal(meal: &str) -> Result<MealSlot, AppError> {
    MealSlot::parse(meal).ok_or_else(|| {
        AppError::bad_request("meal must be one of Breakfast, Snack 1, Lunch, Snack 2, Dinner")
    })
}

fn today_string() -> String {
    Local::now().date_naive().to_string()
}
