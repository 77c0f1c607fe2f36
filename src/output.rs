use crate::error::{FetchError, FetchResult};
use crate::models::PathResult;
use std::path::Path;
use tracing::info;

/// Write `results` as a pretty-printed JSON array, replacing any existing file.
pub async fn write_results(path: &Path, results: &[PathResult]) -> FetchResult<()> {
    let json = serde_json::to_string_pretty(results)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| FetchError::io(parent, e))?;
    }

    tokio::fs::write(path, json)
        .await
        .map_err(|e| FetchError::io(path, e))?;

    info!("Successfully saved pageviews to {}", path.display());
    Ok(())
}
