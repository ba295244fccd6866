use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/stats", get(handlers::stats_page))
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/portions", get(handlers::list_portions))
        .route("/api/days/:date", get(handlers::get_day).put(handlers::put_day))
        .route("/api/days/:date/entries", post(handlers::add_entry))
        .route("/api/days/:date/entries/:meal/:index", delete(handlers::remove_entry))
        .route("/api/stats", get(handlers::get_stats))
        .with_state(state)
}
