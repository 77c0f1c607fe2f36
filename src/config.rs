//! Configuration system
//!
//! Provides layered configuration with:
//! - Built-in defaults matching the blog's Umami share dashboard
//! - Config file loading (optional)
//! - Environment variable overrides
//! - Validation before any work starts
//!
//! The resulting [`Config`] is built once in `main` and passed by reference
//! to everything that needs it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Analytics service configuration
    pub umami: UmamiConfig,

    /// Input and output locations
    pub paths: PathsConfig,

    /// Request pacing and content selection
    pub fetch: FetchConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// File the configuration was read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UmamiConfig {
    pub enable: bool,
    pub base_url: String,
    pub share_id: String,
    pub timezone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub posts_dir: PathBuf,
    pub output_file: PathBuf,
    pub log_directory: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// A pause is taken before every `pacing_interval`-th content request.
    pub pacing_interval: usize,
    pub pacing_delay_ms: u64,
    /// File extensions (without the dot) that count as content files.
    pub content_extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub output: String,
}

impl Default for UmamiConfig {
    fn default() -> Self {
        Self {
            enable: true,
            base_url: "https://u.2x.nz".to_string(),
            share_id: "CdkXbGgZr6ECKOyK".to_string(),
            timezone: "Asia/Shanghai".to_string(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            posts_dir: PathBuf::from("src").join("content").join("posts"),
            output_file: PathBuf::from("pageviews.json"),
            log_directory: PathBuf::from("logs"),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            pacing_interval: 20,
            pacing_delay_ms: 500,
            content_extensions: vec!["md".to_string()],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            output: "console".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file, environment, and defaults.
    ///
    /// An explicit `path` must exist; otherwise the usual locations are
    /// searched and the first one found wins.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::discover()?,
        };

        config.apply_env_overrides()?;

        Ok(config)
    }

    fn discover() -> Result<Self> {
        let config_paths = [
            PathBuf::from("umami-pageviews.toml"),
            PathBuf::from(".umami-pageviews.toml"),
            dirs::config_dir()
                .map(|d| d.join("umami-pageviews").join("config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.is_file() {
                return Self::load_from_file(path);
            }
        }

        Ok(Config::default())
    }

    /// Load configuration from TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.source = Some(path.to_path_buf());

        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        // Umami overrides
        if let Ok(val) = env::var("UMAMI_ENABLE") {
            self.umami.enable = val.parse().context("Invalid UMAMI_ENABLE")?;
        }
        if let Ok(val) = env::var("UMAMI_BASE_URL") {
            self.umami.base_url = val;
        }
        if let Ok(val) = env::var("UMAMI_SHARE_ID") {
            self.umami.share_id = val;
        }
        if let Ok(val) = env::var("UMAMI_TIMEZONE") {
            self.umami.timezone = val;
        }

        // Path overrides
        if let Ok(val) = env::var("PAGEVIEWS_POSTS_DIR") {
            self.paths.posts_dir = PathBuf::from(val);
        }
        if let Ok(val) = env::var("PAGEVIEWS_OUTPUT") {
            self.paths.output_file = PathBuf::from(val);
        }
        if let Ok(val) = env::var("PAGEVIEWS_LOG_DIR") {
            self.paths.log_directory = PathBuf::from(val);
        }

        // Pacing overrides
        if let Ok(val) = env::var("PAGEVIEWS_PACING_INTERVAL") {
            self.fetch.pacing_interval =
                val.parse().context("Invalid PAGEVIEWS_PACING_INTERVAL")?;
        }
        if let Ok(val) = env::var("PAGEVIEWS_PACING_DELAY_MS") {
            self.fetch.pacing_delay_ms =
                val.parse().context("Invalid PAGEVIEWS_PACING_DELAY_MS")?;
        }

        // Logging overrides
        if let Ok(val) = env::var("LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = env::var("LOG_FORMAT") {
            self.logging.format = val;
        }
        if let Ok(val) = env::var("LOG_OUTPUT") {
            self.logging.output = val;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.umami.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("Umami base URL must not be empty"));
        }

        if self.umami.share_id.trim().is_empty() {
            return Err(anyhow::anyhow!("Umami share ID must not be empty"));
        }

        if self.umami.timezone.trim().is_empty() {
            return Err(anyhow::anyhow!("Umami timezone must not be empty"));
        }

        if self.fetch.pacing_interval == 0 {
            return Err(anyhow::anyhow!("Pacing interval must be greater than 0"));
        }

        if self.fetch.content_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "At least one content file extension is required"
            ));
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            warn!(
                format = %self.logging.format,
                "Unknown log format, falling back to pretty"
            );
        }

        Ok(())
    }
}
