// SPDX-License-Identifier: Apache-2.0

//! CLI-specific error formatting with user-friendly hints.
//!
//! Downcasts `anyhow::Error` to `RiceRankError` and appends a hint suited to
//! the failure. The library keeps structured error data; presentation lives here.

use std::fmt;

use anyhow::Error;
use ricerank_core::RiceRankError;

/// Marker error for a run cancelled with Ctrl-C.
#[derive(Debug)]
pub struct Interrupted;

impl fmt::Display for Interrupted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Process interrupted by user")
    }
}

impl std::error::Error for Interrupted {}

/// Formats an error for CLI display with helpful hints.
///
/// If the error is not a `RiceRankError`, returns the error chain.
pub fn format_error(error: &Error) -> String {
    let Some(err) = error.downcast_ref::<RiceRankError>() else {
        return format!("{error:#}");
    };

    match err {
        RiceRankError::NotAuthenticated => format!(
            "{err}\n\nTip: Export a personal access token, e.g. `export GITHUB_TOKEN=ghp_...`."
        ),
        RiceRankError::Unauthorized { .. } => format!(
            "{err}\n\nTip: The token is invalid or expired. Create a new one at https://github.com/settings/tokens."
        ),
        RiceRankError::Status { status: 403, .. } => format!(
            "{err}\n\nTip: GitHub may be rate limiting you. Wait for the limit to reset or lower --rate."
        ),
        RiceRankError::Status { status: 404, .. } => {
            format!("{err}\n\nTip: Check the list repository passed with --repo.")
        }
        RiceRankError::Network { .. } => {
            format!("{err}\n\nTip: Check your internet connection and try again.")
        }
        RiceRankError::Config { .. } => format!(
            "{err}\n\nTip: Check your config file at {}",
            ricerank_core::config_file_path().display()
        ),
        RiceRankError::Io { .. } => {
            format!("{err}\n\nTip: Check that the output directory is writable.")
        }
        _ => err.to_string(),
    }
}
