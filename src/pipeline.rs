//! Run orchestration
//!
//! One invocation is a straight line:
//!
//! 1. **Enumerate** the posts directory (no network traffic if it is missing)
//! 2. **Authenticate** against the share endpoint
//! 3. **Fetch** the root aggregate and one count per post
//! 4. **Write** the collected results in a single pass
//!
//! Any error returned from here is fatal and leaves the output file
//! untouched.

use crate::config::Config;
use crate::content::list_content_files;
use crate::display::ProgressReporter;
use crate::error::FetchResult;
use crate::fetcher::{Pacer, StatsFetcher};
use crate::models::FetchReport;
use crate::output::write_results;
use crate::umami::AnalyticsApi;
use tracing::info;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Print the per-path progress indicator on stdout.
    pub progress: bool,
}

#[derive(Debug)]
pub enum RunOutcome {
    /// `umami.enable` is off; nothing was fetched or written.
    Disabled,
    Completed(FetchReport),
}

pub async fn run<A>(config: &Config, api: &A, options: RunOptions) -> FetchResult<RunOutcome>
where
    A: AnalyticsApi + ?Sized,
{
    if !config.umami.enable {
        info!("Umami integration is disabled, skipping pageview fetch");
        return Ok(RunOutcome::Disabled);
    }

    info!("Starting pageviews fetch...");

    let posts = list_content_files(&config.paths.posts_dir, &config.fetch.content_extensions)?;
    let auth = api.authenticate().await?;

    let mut fetcher = StatsFetcher::new(
        api,
        Pacer::from_config(&config.fetch),
        ProgressReporter::new(options.progress),
    );
    let report = fetcher.fetch_all(&auth, &posts).await;

    info!(
        paths = report.results.len(),
        failed = report.failed,
        pauses = report.pauses,
        "Fetch finished"
    );

    write_results(&config.paths.output_file, &report.results).await?;

    Ok(RunOutcome::Completed(report))
}
