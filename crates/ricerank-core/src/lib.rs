// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # ricerank Core
//!
//! Core library for ricerank - rank the repositories of a curated
//! "awesome" list by GitHub stars.
//!
//! This crate provides reusable components for:
//! - GitHub REST integration (README and repository metadata)
//! - Markdown repository-link extraction
//! - Rate-limited sequential enrichment with per-item failure tolerance
//! - Ranking and text/JSON report persistence
//! - Configuration management
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ricerank_core::{EnvTokenProvider, NoopObserver, load_config, require_token, run_pipeline};
//!
//! # async fn example() -> ricerank_core::Result<()> {
//! let config = load_config()?;
//! let token = require_token(&EnvTokenProvider::new(&config.github.token_env))?;
//!
//! let summary = run_pipeline(&config, token, &NoopObserver).await?;
//! for record in summary.top(10) {
//!     println!("{} {}", record.stars, record.url);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`auth`] - Token provider abstraction
//! - [`config`] - Configuration loading and paths
//! - [`enrich`] - Metadata enrichment and rate policy
//! - [`error`] - Error types and severity
//! - [`extract`] - Repository link extraction
//! - [`github`] - GitHub REST client
//! - [`record`] - Records and ranking
//! - [`report`] - Text and JSON reports

// ============================================================================
// Authentication
// ============================================================================

pub use auth::{EnvTokenProvider, TokenProvider, TokenSource, require_token};

// ============================================================================
// Error Handling
// ============================================================================

pub use error::{Resource, RiceRankError, Severity};

/// Convenience Result type for ricerank operations.
///
/// This is equivalent to `std::result::Result<T, RiceRankError>`.
pub type Result<T> = std::result::Result<T, RiceRankError>;

// ============================================================================
// Configuration
// ============================================================================

pub use config::{
    AppConfig, EnrichConfig, GitHubConfig, OutputConfig, SourceConfig, config_dir,
    config_file_path, load_config,
};

// ============================================================================
// Pipeline Stages
// ============================================================================

pub use enrich::{
    EnrichObserver, EnrichOutcome, EnrichReport, NoopObserver, RatePolicy, RepoMetadataSource,
};
pub use extract::{ReferenceExtractor, extract_references};
pub use github::GitHubClient;
pub use github::ratelimit::RateLimitStatus;
pub use record::{RepoMetadata, RepoRef, RepositoryRecord, rank};
pub use report::{ReportPaths, render_json, render_text, write_reports};

// ============================================================================
// Platform-Agnostic Facade
// ============================================================================

pub use facade::{PipelineObserver, RunSummary, Stage, extract_only, run_pipeline};

// ============================================================================
// Modules
// ============================================================================

pub mod auth;
pub mod config;
pub mod enrich;
pub mod error;
pub mod extract;
pub mod facade;
pub mod github;
pub mod record;
pub mod report;
