use crate::errors::AppError;
use crate::migrate::normalize_store;
use crate::models::AppData;
use std::{ffi::OsString, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

pub async fn load_data(path: &Path) -> AppData {
    let value = match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(err) => {
                error!("failed to parse data file: {err}");
                return AppData::default();
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            return AppData::default();
        }
    };

    let (data, report) = normalize_store(value);
    if report.changed_anything() {
        info!(
            source_version = ?report.source_version,
            legacy_entries = report.legacy_entries,
            foreign_slots = report.foreign_slots,
            empty_days = report.empty_days,
            "migrated food log store"
        );
    }
    if report.dropped_days + report.dropped_slots + report.dropped_entries > 0 {
        warn!(
            dropped_days = report.dropped_days,
            dropped_slots = report.dropped_slots,
            dropped_entries = report.dropped_entries,
            "skipped malformed records while loading"
        );
    }
    data
}

/// Writes the whole document next to `path` and renames it into place, so a
/// crash mid-write leaves the previous file intact.
pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    let staging = staging_path(path);
    fs::write(&staging, payload).await?;
    if let Err(err) = fs::rename(&staging, path).await {
        error!(path = %path.display(), "failed to replace data file: {err}");
        let _ = fs::remove_file(&staging).await;
        return Err(err.into());
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
