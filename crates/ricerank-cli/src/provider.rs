// SPDX-License-Identifier: Apache-2.0

//! CLI-specific `TokenProvider` implementation.
//!
//! Resolves the GitHub token from the environment and, failing that, asks
//! for it at a hidden interactive prompt.

use std::io::IsTerminal;

use dialoguer::Password;
use ricerank_core::{EnvTokenProvider, TokenProvider, TokenSource};
use secrecy::SecretString;
use tracing::debug;

/// CLI implementation of `TokenProvider`.
///
/// Resolves credentials from:
/// - The configured environment variable (default `GITHUB_TOKEN`), then `GH_TOKEN`
/// - An interactive prompt, when allowed and stdin is a terminal
pub struct CliTokenProvider {
    env: EnvTokenProvider,
    allow_prompt: bool,
}

impl CliTokenProvider {
    /// Creates a provider reading `token_env`, optionally prompting as a fallback.
    pub fn new(token_env: &str, allow_prompt: bool) -> Self {
        Self {
            env: EnvTokenProvider::new(token_env),
            allow_prompt,
        }
    }

    fn prompt(&self) -> Option<SecretString> {
        if !self.allow_prompt || !std::io::stdin().is_terminal() {
            debug!("Token prompt unavailable");
            return None;
        }

        match Password::new()
            .with_prompt("Please enter your GitHub token")
            .allow_empty_password(true)
            .interact()
        {
            Ok(token) => Some(SecretString::from(token.trim().to_string())),
            Err(e) => {
                debug!(error = %e, "Token prompt failed");
                None
            }
        }
    }
}

impl TokenProvider for CliTokenProvider {
    fn github_token(&self) -> Option<(SecretString, TokenSource)> {
        if let Some(found) = self.env.github_token() {
            return Some(found);
        }
        self.prompt().map(|token| (token, TokenSource::Prompt))
    }
}
