//! Reading and writing the report document.

use std::path::Path;

use crate::error::{GrepStatsError, Result};
use crate::types::Report;

/// Write `report` as indented JSON, replacing any existing file at `path`.
pub async fn write_report(path: impl AsRef<Path>, report: &Report) -> Result<()> {
    let path = path.as_ref();
    let mut json =
        serde_json::to_string_pretty(report).map_err(|e| GrepStatsError::persistence(path, e))?;
    json.push('\n');
    tokio::fs::write(path, json)
        .await
        .map_err(|e| GrepStatsError::persistence(path, e))
}

/// Read a report previously written by [`write_report`].
pub async fn load_report(path: impl AsRef<Path>) -> Result<Report> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| GrepStatsError::persistence(path, e))?;
    serde_json::from_str(&raw).map_err(|e| GrepStatsError::persistence(path, e))
}
