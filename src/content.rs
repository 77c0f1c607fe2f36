//! Content file discovery
//!
//! Lists the posts directory and maps each content file to the URL path the
//! site publishes it under.

use crate::error::{FetchError, FetchResult};
use std::path::Path;
use tracing::{debug, info};

/// A content file and the pathname its stats are keyed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEntry {
    pub file_name: String,
    pub pathname: String,
}

impl ContentEntry {
    pub fn from_file_name(file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let pathname = pathname_for(&file_name);
        Self {
            file_name,
            pathname,
        }
    }
}

/// List content files in `dir` whose extension is one of `extensions`, in
/// directory listing order.
pub fn list_content_files(dir: &Path, extensions: &[String]) -> FetchResult<Vec<ContentEntry>> {
    if !dir.is_dir() {
        return Err(FetchError::DirectoryNotFound(dir.to_path_buf()));
    }

    let entries = std::fs::read_dir(dir).map_err(|e| FetchError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| FetchError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            debug!(path = %path.display(), "Skipping non UTF-8 file name");
            continue;
        };

        if has_content_extension(file_name, extensions) {
            files.push(ContentEntry::from_file_name(file_name));
        }
    }

    info!("Found {} posts.", files.len());
    Ok(files)
}

fn has_content_extension(file_name: &str, extensions: &[String]) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}

/// Lower-cased file name with its extension stripped.
pub fn slug_for(file_name: &str) -> String {
    let path = Path::new(file_name);
    let stem = match path.extension() {
        Some(_) => path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name),
        None => file_name,
    };
    stem.to_lowercase()
}

pub fn pathname_for(file_name: &str) -> String {
    format!("/posts/{}/", slug_for(file_name))
}
