// SPDX-License-Identifier: Apache-2.0

//! Configuration management for ricerank.
//!
//! Provides layered configuration from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables (prefix: `RICERANK_`)
//! 2. Config file: `~/.config/ricerank/config.toml`
//! 3. Built-in defaults
//!
//! Command-line flags are applied on top by the CLI.
//!
//! # Examples
//!
//! ```bash
//! # Rank a different list via environment variable
//! RICERANK_SOURCE__OWNER=someone RICERANK_SOURCE__NAME=dotfiles ricerank rank
//! ```

use std::path::PathBuf;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::RiceRankError;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// GitHub API settings.
    pub github: GitHubConfig,
    /// Which list document to rank.
    pub source: SourceConfig,
    /// Enrichment pacing.
    pub enrich: EnrichConfig,
    /// Report output settings.
    pub output: OutputConfig,
}

/// GitHub API settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST API base URL.
    pub api_base_url: String,
    /// Environment variable holding the access token.
    pub token_env: String,
    /// API request timeout in seconds.
    pub api_timeout_seconds: u64,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            token_env: "GITHUB_TOKEN".to_string(),
            api_timeout_seconds: 10,
            user_agent: concat!("ricerank/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// The repository whose README is the curated list.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub name: String,
    /// URL prefix that marks a link as a repository reference.
    pub link_host: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            owner: "zemmsoares".to_string(),
            name: "awesome-rices".to_string(),
            link_host: "https://github.com/".to_string(),
        }
    }
}

/// Enrichment settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EnrichConfig {
    /// Ceiling on metadata requests per second (0 disables pacing).
    pub requests_per_second: f64,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 2.0,
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the reports are written to.
    pub dir: PathBuf,
    /// File name of the plain-text report.
    pub text_file: String,
    /// File name of the JSON report.
    pub json_file: String,
    /// Number of records shown in the console summary.
    pub top: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            text_file: "sorted_rices.txt".to_string(),
            json_file: "sorted_rices.json".to_string(),
            top: 10,
        }
    }
}

impl OutputConfig {
    /// Full path of the plain-text report.
    #[must_use]
    pub fn text_path(&self) -> PathBuf {
        self.dir.join(&self.text_file)
    }

    /// Full path of the JSON report.
    #[must_use]
    pub fn json_path(&self) -> PathBuf {
        self.dir.join(&self.json_file)
    }
}

impl GitHubConfig {
    /// API request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_seconds)
    }
}

/// Returns the ricerank configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/ricerank`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join("ricerank");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("ricerank")
}

/// Returns the path to the configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load application configuration.
///
/// Loads from config file (if exists) and environment variables.
/// Environment variables use the prefix `RICERANK_` and double underscore
/// for nested keys (e.g., `RICERANK_ENRICH__REQUESTS_PER_SECOND`).
///
/// # Errors
///
/// Returns `RiceRankError::Config` if the config file exists but is invalid.
pub fn load_config() -> Result<AppConfig, RiceRankError> {
    let config_path = config_file_path();

    let config = Config::builder()
        // Load from config file (optional - may not exist)
        .add_source(File::with_name(config_path.to_string_lossy().as_ref()).required(false))
        // Override with environment variables
        .add_source(
            Environment::with_prefix("RICERANK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}
