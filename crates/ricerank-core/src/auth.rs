// SPDX-License-Identifier: Apache-2.0

//! Token provider abstraction for credential resolution.
//!
//! The core library never reads credentials on its own. Callers resolve a
//! token through a [`TokenProvider`] and pass it explicitly to the GitHub
//! client, which keeps the pipeline testable with injected fake tokens.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::debug;

use crate::error::RiceRankError;

/// Fallback environment variable checked after the configured one.
const GH_TOKEN_ENV: &str = "GH_TOKEN";

/// Source of the GitHub authentication token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenSource {
    /// Token from an environment variable.
    Environment,
    /// Token typed in at an interactive prompt.
    Prompt,
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenSource::Environment => write!(f, "environment variable"),
            TokenSource::Prompt => write!(f, "interactive prompt"),
        }
    }
}

/// Provides the GitHub token for API calls.
///
/// Implementations return `None` when no token is available from their
/// sources; they do not validate the token against GitHub.
pub trait TokenProvider: Send + Sync {
    /// Retrieves the GitHub API token and where it came from.
    fn github_token(&self) -> Option<(SecretString, TokenSource)>;
}

/// Resolves the token from environment variables only.
///
/// Checks the configured variable first (normally `GITHUB_TOKEN`), then
/// `GH_TOKEN`. Empty values are treated as unset.
#[derive(Debug, Clone)]
pub struct EnvTokenProvider {
    var: String,
}

impl EnvTokenProvider {
    /// Creates a provider reading the given environment variable.
    #[must_use]
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl TokenProvider for EnvTokenProvider {
    fn github_token(&self) -> Option<(SecretString, TokenSource)> {
        for var in [self.var.as_str(), GH_TOKEN_ENV] {
            if let Ok(token) = std::env::var(var)
                && !token.trim().is_empty()
            {
                debug!(var = %var, "Using token from environment variable");
                return Some((
                    SecretString::from(token.trim().to_string()),
                    TokenSource::Environment,
                ));
            }
        }
        debug!("No token found in environment");
        None
    }
}

/// Resolves a token through `provider`, rejecting absent or blank tokens.
///
/// # Errors
///
/// Returns [`RiceRankError::NotAuthenticated`] if the provider yields nothing
/// or only whitespace.
pub fn require_token(provider: &dyn TokenProvider) -> Result<SecretString, RiceRankError> {
    match provider.github_token() {
        Some((token, source)) if !token.expose_secret().trim().is_empty() => {
            debug!(source = %source, "Resolved GitHub token");
            Ok(token)
        }
        _ => Err(RiceRankError::NotAuthenticated),
    }
}
