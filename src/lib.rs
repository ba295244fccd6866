pub mod app;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod migrate;
pub mod models;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod state;
pub mod week;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use stats::{aggregate_week, build_weekly_stats};
pub use storage::load_data;
pub use week::IsoWeek;
