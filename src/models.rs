//! Core Data Models
//!
//! Wire types for the Umami share and stats endpoints, plus the record
//! written to the output file.
//!
//! ## Data Flow
//!
//! 1. **Auth**: [`AuthToken`] - decoded from `GET /api/share/{shareId}`
//! 2. **Stats**: [`StatsResponse`] - decoded from `GET /api/websites/{id}/stats`,
//!    its `pageviews` field normalised through [`PageviewsField`]
//! 3. **Output**: [`PathResult`] - one per queried pathname, in query order
//!
//! The stats endpoint has returned `pageviews` both as `{ "value": N }` and
//! as a bare number across Umami versions; [`PageviewsField::normalize`] is
//! the single place that decides which count to record.

use serde::{Deserialize, Serialize};

/// Credential pair obtained once per run from the share endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthToken {
    #[serde(rename = "websiteId")]
    pub website_id: String,
    pub token: String,
}

/// One entry of the output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathResult {
    pub pathname: String,
    pub pageviews: u64,
}

impl PathResult {
    pub fn new(pathname: impl Into<String>, pageviews: u64) -> Self {
        Self {
            pathname: pathname.into(),
            pageviews,
        }
    }
}

/// Accepted shapes of the `pageviews` field, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PageviewsField {
    Object { value: u64 },
    Count(u64),
}

impl PageviewsField {
    pub fn count(self) -> u64 {
        match self {
            PageviewsField::Object { value } => value,
            PageviewsField::Count(n) => n,
        }
    }

    /// Object form first, then bare number, otherwise zero.
    pub fn normalize(raw: Option<&serde_json::Value>) -> u64 {
        raw.and_then(|value| PageviewsField::deserialize(value).ok())
            .map(PageviewsField::count)
            .unwrap_or(0)
    }
}

/// Stats payload. Only `pageviews` is read; its shape is checked lazily so an
/// unexpected value degrades to zero instead of failing the whole body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsResponse {
    #[serde(default)]
    pub pageviews: Option<serde_json::Value>,
}

impl StatsResponse {
    pub fn pageview_count(&self) -> u64 {
        PageviewsField::normalize(self.pageviews.as_ref())
    }
}

/// Result of a single stats lookup that reached the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsOutcome {
    Views(u64),
    /// Non-success status; recorded as zero by the caller.
    NoData { status: u16 },
}

impl StatsOutcome {
    pub fn pageviews(self) -> u64 {
        match self {
            StatsOutcome::Views(n) => n,
            StatsOutcome::NoData { .. } => 0,
        }
    }

    pub fn is_failure(self) -> bool {
        matches!(self, StatsOutcome::NoData { .. })
    }
}

/// Everything the orchestrator hands back after a completed run.
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    /// Root first, then one per content file in listing order.
    pub results: Vec<PathResult>,
    /// Paths recorded as zero because the lookup failed.
    pub failed: usize,
    /// Pacing pauses taken during the content loop.
    pub pauses: usize,
}
