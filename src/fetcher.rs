//! Stats fetch loop
//!
//! Runs one lookup for the site root and one per content file, strictly in
//! sequence. A lookup that fails, whether by status or by transport error,
//! is logged and recorded as zero; nothing in the loop aborts the run.
//!
//! ## Pacing
//!
//! Before the content request at 0-based position `i`, a fixed pause is
//! taken when `i > 0 && i % interval == 0`. With the default interval of 20
//! that is after the 20th, 40th, ... request; the root request is not
//! counted and no pause follows the final request.

use crate::config::FetchConfig;
use crate::content::ContentEntry;
use crate::display::ProgressReporter;
use crate::models::{AuthToken, FetchReport, PathResult};
use crate::umami::{AnalyticsApi, ROOT_PATH};
use std::time::Duration;
use tracing::{error, info};

#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    interval: usize,
    delay: Duration,
}

impl Pacer {
    pub fn new(interval: usize, delay: Duration) -> Self {
        Self {
            interval: interval.max(1),
            delay,
        }
    }

    pub fn from_config(config: &FetchConfig) -> Self {
        Self::new(
            config.pacing_interval,
            Duration::from_millis(config.pacing_delay_ms),
        )
    }

    /// Whether to pause before the content request at 0-based `index`.
    pub fn is_due(&self, index: usize) -> bool {
        index > 0 && index % self.interval == 0
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

pub struct StatsFetcher<'a, A: AnalyticsApi + ?Sized> {
    api: &'a A,
    pacer: Pacer,
    progress: ProgressReporter,
}

impl<'a, A: AnalyticsApi + ?Sized> StatsFetcher<'a, A> {
    pub fn new(api: &'a A, pacer: Pacer, progress: ProgressReporter) -> Self {
        Self {
            api,
            pacer,
            progress,
        }
    }

    /// Returns the recorded count and whether the lookup failed.
    async fn lookup(&mut self, auth: &AuthToken, pathname: &str) -> (u64, bool) {
        match self.api.page_stats(auth, pathname).await {
            Ok(outcome) => (outcome.pageviews(), outcome.is_failure()),
            Err(e) => {
                self.progress.break_line();
                error!(pathname, "Error fetching {}: {}", pathname, e);
                (0, true)
            }
        }
    }

    /// Fetch the root aggregate followed by every entry in `posts`.
    pub async fn fetch_all(&mut self, auth: &AuthToken, posts: &[ContentEntry]) -> FetchReport {
        let mut report = FetchReport {
            results: Vec::with_capacity(posts.len() + 1),
            ..FetchReport::default()
        };

        info!("Fetching stats for / (Total)...");
        let (pageviews, failed) = self.lookup(auth, ROOT_PATH).await;
        self.progress.root(ROOT_PATH, pageviews, failed);
        report.record(PathResult::new(ROOT_PATH, pageviews), failed);

        let total = posts.len();
        for (index, post) in posts.iter().enumerate() {
            if self.pacer.is_due(index) {
                self.progress.break_line();
                info!("Processed {} posts...", index);
                self.pacer.pause().await;
                report.pauses += 1;
            }

            let (pageviews, failed) = self.lookup(auth, &post.pathname).await;
            self.progress
                .post(index + 1, total, &post.pathname, pageviews, failed);
            report.record(PathResult::new(post.pathname.clone(), pageviews), failed);
        }

        self.progress.finish();
        report
    }
}

impl FetchReport {
    fn record(&mut self, result: PathResult, failed: bool) {
        if failed {
            self.failed += 1;
        }
        self.results.push(result);
    }
}
