use crate::error::{Result, ScreenError};
use crate::types::snapshot::MetricSnapshot;
use std::path::Path;

/// Reads a snapshot batch from a JSON file. This is the boundary to the
/// external metrics provider; everything past it is pure computation.
pub fn load_snapshots(path: &Path) -> Result<Vec<MetricSnapshot>> {
    if !path.exists() {
        return Err(ScreenError::SnapshotNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let snapshots: Vec<MetricSnapshot> = serde_json::from_str(&content)
        .map_err(|e| ScreenError::SnapshotParse(format!("{}: {}", path.display(), e)))?;
    tracing::info!(count = snapshots.len(), path = %path.display(), "loaded snapshot batch");
    Ok(snapshots)
}
