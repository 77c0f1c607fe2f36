//! Structured logging configuration
//!
//! Provides:
//! - JSON output for machine consumption
//! - Pretty formatting for interactive runs
//! - Daily rolling log files via `tracing-appender`
//! - `RUST_LOG` taking precedence over the configured level
//!
//! Console logs are written to stderr; stdout belongs to the progress line.

use crate::config::{LoggingConfig, PathsConfig};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "umami-pageviews.log";

/// Initialize the logging system.
///
/// The returned guard flushes buffered file output on drop and must be held
/// until the process exits.
pub fn init_logging(logging: &LoggingConfig, paths: &PathsConfig) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let json = logging.format == "json";

    match logging.output.as_str() {
        "file" => Some(init_file_logging(env_filter, json, &paths.log_directory)),
        "both" => Some(init_combined_logging(env_filter, json, &paths.log_directory)),
        _ => {
            init_console_logging(env_filter, json);
            None
        }
    }
}

fn init_console_logging(filter: EnvFilter, json: bool) {
    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        subscriber
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn init_file_logging(filter: EnvFilter, json: bool, log_dir: &std::path::Path) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
            .init();
    }

    guard
}

fn init_combined_logging(
    filter: EnvFilter,
    json: bool,
    log_dir: &std::path::Path,
) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(fmt::layer().json().with_writer(non_blocking))
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
            .init();
    }

    guard
}
