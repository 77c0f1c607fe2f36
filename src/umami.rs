//! Umami share API client
//!
//! Talks to the two endpoints a public share dashboard exposes:
//!
//! - `GET {base}/api/share/{shareId}` returns the website id and a share token
//! - `GET {base}/api/websites/{websiteId}/stats` returns aggregate stats,
//!   authorised by the `x-umami-share-token` header
//!
//! The [`AnalyticsApi`] trait is the seam the fetch loop is written against.

use crate::config::UmamiConfig;
use crate::error::{FetchError, FetchResult};
use crate::models::{AuthToken, StatsOutcome, StatsResponse};
use async_trait::async_trait;
use tracing::{debug, info, warn};

pub const SHARE_TOKEN_HEADER: &str = "x-umami-share-token";
pub const ROOT_PATH: &str = "/";

/// Remote operations needed for one run.
#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    /// Exchange the share id for a website id and token.
    async fn authenticate(&self) -> FetchResult<AuthToken>;

    /// Look up the all-time pageview count for `pathname`.
    ///
    /// `Err` is reserved for transport and decode failures; a non-success
    /// status is reported as [`StatsOutcome::NoData`].
    async fn page_stats(&self, auth: &AuthToken, pathname: &str) -> FetchResult<StatsOutcome>;
}

pub struct UmamiClient {
    client: reqwest::Client,
    config: UmamiConfig,
}

impl UmamiClient {
    pub fn new(config: UmamiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    pub fn share_url(&self) -> String {
        format!("{}/api/share/{}", self.base_url(), self.config.share_id)
    }

    pub fn stats_url(&self, website_id: &str) -> String {
        format!("{}/api/websites/{}/stats", self.base_url(), website_id)
    }
}

/// Query parameters for an all-time stats lookup ending at `end_at_ms`.
///
/// The site root is an aggregate over the whole website and carries no
/// `path` filter; every other pathname is filtered by equality.
pub fn stats_query(pathname: &str, timezone: &str, end_at_ms: i64) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("startAt", "0".to_string()),
        ("endAt", end_at_ms.to_string()),
        ("unit", "hour".to_string()),
        ("timezone", timezone.to_string()),
        ("compare", "false".to_string()),
    ];

    if pathname != ROOT_PATH {
        params.push(("path", format!("eq.{pathname}")));
    }

    params
}

#[async_trait]
impl AnalyticsApi for UmamiClient {
    async fn authenticate(&self) -> FetchResult<AuthToken> {
        let url = self.share_url();
        info!("Fetching auth token from: {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::authentication(status));
        }

        let auth: AuthToken = response.json().await?;
        info!(website_id = %auth.website_id, "Website ID: {}", auth.website_id);

        Ok(auth)
    }

    async fn page_stats(&self, auth: &AuthToken, pathname: &str) -> FetchResult<StatsOutcome> {
        let end_at = chrono::Utc::now().timestamp_millis();
        let query = stats_query(pathname, &self.config.timezone, end_at);

        debug!(pathname, end_at, "Requesting stats");

        let response = self
            .client
            .get(self.stats_url(&auth.website_id))
            .query(&query)
            .header(SHARE_TOKEN_HEADER, &auth.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Failed to fetch stats for {}: {}", pathname, status.as_u16());
            return Ok(StatsOutcome::NoData {
                status: status.as_u16(),
            });
        }

        let stats: StatsResponse = response.json().await?;
        Ok(StatsOutcome::Views(stats.pageview_count()))
    }
}
