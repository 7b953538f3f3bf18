//! Configuration file support for ghrepos.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (prefixed with `GHREPOS_`, `__` between levels,
//!    e.g. `GHREPOS_GITHUB__API_URL`)
//! 3. Config file (./ghrepos.toml, then ~/.config/ghrepos/config.toml)
//! 4. Built-in defaults
//!
//! The token is not read from here. It comes from `--token`, `GITHUB_TOKEN`
//! or `~/.github-token`.
//!
//! Example config file:
//! ```toml
//! [github]
//! api_url = "https://ghe.example.com/api/v3"  # GitHub Enterprise
//! timeout_secs = 30
//!
//! [report]
//! concurrency = 5
//! page_size = 100
//! ```

use std::path::PathBuf;
use std::time::Duration;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use ghrepos::github::{DEFAULT_PAGE_SIZE, GITHUB_API_URL};
use ghrepos::report::DEFAULT_ENRICH_CONCURRENCY;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub API configuration.
    pub github: GitHubConfig,
    /// Report defaults.
    pub report: ReportConfig,
}

/// GitHub API configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST API base URL.
    pub api_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: GITHUB_API_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Report defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Commit lookups allowed in flight at once.
    pub concurrency: usize,
    /// Repositories requested per listing page, capped at 100.
    pub page_size: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_ENRICH_CONCURRENCY,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/ghrepos/config.toml)
    /// 3. Local config file (./ghrepos.toml)
    /// 4. Environment variables with GHREPOS_ prefix
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(xdg_config) = Self::default_config_path()
            && xdg_config.exists()
        {
            tracing::debug!("Loading config from {:?}", xdg_config);
            builder = builder.add_source(
                File::from(xdg_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        let local_config = PathBuf::from("ghrepos.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./ghrepos.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        // GHREPOS_REPORT__PAGE_SIZE -> report.page_size
        builder = builder.add_source(
            Environment::with_prefix("GHREPOS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// Request timeout for the GitHub client.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.github.timeout_secs.max(1))
    }

    /// Get the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "ghrepos").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
