// SPDX-License-Identifier: Apache-2.0

//! GitHub API rate limit tracking.
//!
//! GitHub reports the caller's quota on every response through the
//! `x-ratelimit-*` headers. The client reads them after each request so a
//! long enrichment run can warn before the quota runs dry.

use reqwest::header::HeaderMap;

/// GitHub API rate limit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitStatus {
    /// Number of API calls remaining in the current rate limit window.
    pub remaining: u32,
    /// Total number of API calls allowed in the rate limit window.
    pub limit: u32,
    /// Unix timestamp when the rate limit resets.
    pub reset_at: u64,
}

impl RateLimitStatus {
    /// Parses the status from response headers.
    ///
    /// Returns `None` unless both `x-ratelimit-remaining` and
    /// `x-ratelimit-limit` are present and numeric. A missing reset time
    /// reads as `0`.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        fn number<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
            headers.get(name)?.to_str().ok()?.trim().parse().ok()
        }

        Some(Self {
            remaining: number(headers, "x-ratelimit-remaining")?,
            limit: number(headers, "x-ratelimit-limit")?,
            reset_at: number(headers, "x-ratelimit-reset").unwrap_or(0),
        })
    }

    /// Returns true if rate limit is low (remaining < 100).
    #[must_use]
    pub fn is_low(&self) -> bool {
        self.remaining < 100
    }

    /// Returns a human-readable status message.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "GitHub API: {}/{} calls remaining",
            self.remaining, self.limit
        )
    }
}
