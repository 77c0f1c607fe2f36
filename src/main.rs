use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::{error, info, info_span, Instrument};
use umami_pageviews::config::Config;
use umami_pageviews::logging::init_logging;
use umami_pageviews::pipeline::{self, RunOptions};
use umami_pageviews::umami::UmamiClient;

#[derive(Parser)]
#[command(name = "umami-pageviews")]
#[command(about = "Fetch per-page view counts from an Umami share dashboard into a JSON file")]
#[command(version)]
struct Cli {
    /// Config file (defaults to umami-pageviews.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing the content files
    #[arg(long)]
    posts_dir: Option<PathBuf>,

    /// Output JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Umami instance base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Public share ID of the dashboard
    #[arg(long)]
    share_id: Option<String>,

    /// Timezone passed to the stats endpoint
    #[arg(long)]
    timezone: Option<String>,

    /// Suppress the per-path progress indicator
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn apply_overrides(self, config: &mut Config) {
        if let Some(dir) = self.posts_dir {
            config.paths.posts_dir = dir;
        }
        if let Some(output) = self.output {
            config.paths.output_file = output;
        }
        if let Some(url) = self.base_url {
            config.umami.base_url = url;
        }
        if let Some(id) = self.share_id {
            config.umami.share_id = id;
        }
        if let Some(tz) = self.timezone {
            config.umami.timezone = tz;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let options = RunOptions { progress: !cli.quiet };

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    };
    cli.apply_overrides(&mut config);

    let guard = init_logging(&config.logging, &config.paths);

    if let Some(path) = &config.source {
        info!(config_file = %path.display(), "Loaded configuration from file");
    }

    if let Err(e) = config.validate() {
        error!("Error: {:#}", e);
        drop(guard);
        process::exit(1);
    }

    let client = UmamiClient::new(config.umami.clone());
    let span = info_span!("fetch_pageviews", run_id = %uuid::Uuid::new_v4());

    // A failed run leaves the previous output in place and still exits 0,
    // so a site build that invokes this step keeps going.
    if let Err(e) = pipeline::run(&config, &client, options).instrument(span).await {
        error!("Fatal Error: {:#}", anyhow::Error::from(e));
    }

    Ok(())
}
