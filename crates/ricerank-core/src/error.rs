// SPDX-License-Identifier: Apache-2.0

//! Error types for ricerank.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Every remote failure carries the [`Resource`] it concerns, and the
//! resource decides whether the failure aborts the run or only degrades a
//! single record (see [`RiceRankError::severity`]).
//! Application code should use `anyhow::Result` for top-level error handling.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A remote resource addressed by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// The curated list document (README) of a repository.
    ListDocument {
        /// Repository owner.
        owner: String,
        /// Repository name.
        name: String,
    },
    /// Metadata of one referenced repository.
    Repository {
        /// Repository path in `owner/name` form.
        path: String,
    },
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::ListDocument { owner, name } => write!(f, "README of {owner}/{name}"),
            Resource::Repository { path } => write!(f, "repository {path}"),
        }
    }
}

/// How far a failure reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Aborts the pipeline; no output is written.
    Fatal,
    /// Isolated to one record, which is kept with default values.
    Degraded,
}

/// Errors that can occur during ricerank operations.
#[derive(Error, Debug)]
pub enum RiceRankError {
    /// No usable GitHub token was provided.
    #[error("Authentication required - set GITHUB_TOKEN or enter a token when prompted")]
    NotAuthenticated,

    /// GitHub rejected the token.
    #[error("GitHub rejected the token while fetching {resource} (HTTP 401)")]
    Unauthorized {
        /// Resource being fetched.
        resource: Resource,
    },

    /// GitHub answered with an unexpected status code.
    #[error("Failed to fetch {resource}: HTTP {status}")]
    Status {
        /// Resource being fetched.
        resource: Resource,
        /// HTTP status code.
        status: u16,
    },

    /// Transport error from reqwest.
    #[error("Network error while fetching {resource}: {source}")]
    Network {
        /// Resource being fetched.
        resource: Resource,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Response body could not be understood.
    #[error("Invalid content for {resource}: {message}")]
    InvalidContent {
        /// Resource being fetched.
        resource: Resource,
        /// What was wrong with the payload.
        message: String,
    },

    /// Configuration file error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// Report could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        /// File being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Report could not be serialized.
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl RiceRankError {
    /// Returns the resource this error concerns, if any.
    #[must_use]
    pub fn resource(&self) -> Option<&Resource> {
        match self {
            RiceRankError::Unauthorized { resource }
            | RiceRankError::Status { resource, .. }
            | RiceRankError::Network { resource, .. }
            | RiceRankError::InvalidContent { resource, .. } => Some(resource),
            _ => None,
        }
    }

    /// Classifies the error as fatal or degraded.
    ///
    /// Failures about a single repository lookup are degraded; everything
    /// else (credentials, the list document, config, persistence) is fatal.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self.resource() {
            Some(Resource::Repository { .. }) => Severity::Degraded,
            _ => Severity::Fatal,
        }
    }

    /// Returns the HTTP status code carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            RiceRankError::Unauthorized { .. } => Some(401),
            RiceRankError::Status { status, .. } => Some(*status),
            RiceRankError::Network { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for RiceRankError {
    fn from(err: config::ConfigError) -> Self {
        RiceRankError::Config {
            message: err.to_string(),
        }
    }
}
