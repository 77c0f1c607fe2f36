//! Error types for the fetch pipeline
//!
//! Fatal conditions (authentication, missing content directory, output
//! failures) surface as [`FetchError`] and abort the run. Per-path stats
//! failures never reach this type at the orchestrator level; they are
//! logged and recorded as zero.

use reqwest::StatusCode;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("Failed to fetch auth token: {status} {reason}")]
    Authentication { status: u16, reason: String },

    #[error("Posts directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl FetchError {
    pub fn authentication(status: StatusCode) -> Self {
        FetchError::Authentication {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FetchError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type FetchResult<T> = Result<T, FetchError>;
