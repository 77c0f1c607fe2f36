//! Umami Pageviews Library
//!
//! Fetches all-time pageview counts from a public Umami share dashboard and
//! writes them to a JSON data file that a static site generator can read at
//! build time.
//!
//! ## Architecture Overview
//!
//! - [`config`] - Layered configuration (defaults, TOML file, environment)
//! - [`logging`] - Structured logging with JSON and pretty formats
//! - [`content`] - Posts directory enumeration and pathname derivation
//! - [`umami`] - HTTP client for the share and stats endpoints
//! - [`fetcher`] - Sequential per-path lookup loop with fixed pacing
//! - [`display`] - Terminal progress indicator
//! - [`output`] - JSON output writer
//! - [`pipeline`] - End-to-end run orchestration
//!
//! ## Main Entry Point
//!
//! ```rust,no_run
//! use umami_pageviews::{config::Config, pipeline, umami::UmamiClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::load(None)?;
//! config.validate()?;
//!
//! let client = UmamiClient::new(config.umami.clone());
//! pipeline::run(&config, &client, pipeline::RunOptions { progress: true }).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Output Format
//!
//! ```json
//! [
//!   { "pathname": "/", "pageviews": 12345 },
//!   { "pathname": "/posts/my-post/", "pageviews": 42 }
//! ]
//! ```

pub mod config;
pub mod content;
pub mod display;
pub mod error;
pub mod fetcher;
pub mod logging;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod umami;

pub use error::{FetchError, FetchResult};
pub use models::*;
