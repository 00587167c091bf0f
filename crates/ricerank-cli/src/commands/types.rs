// SPDX-License-Identifier: Apache-2.0

//! Result types returned by command handlers.
//!
//! These types allow command handlers to return data instead of printing
//! directly, improving testability and separation of concerns.

use std::path::PathBuf;

use ricerank_core::RepositoryRecord;
use serde::Serialize;

/// Result from the rank command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RankResult {
    /// List repository in `owner/name` form.
    pub source: String,
    /// Number of unique repositories found in the list.
    pub total: usize,
    /// Number of successful lookups.
    pub enriched: usize,
    /// Number of lookups that fell back to default values.
    pub degraded: usize,
    /// Path of the plain-text report.
    pub text_report: PathBuf,
    /// Path of the JSON report.
    pub json_report: PathBuf,
    /// Requested size of the summary.
    pub limit: usize,
    /// Most starred repositories, most starred first.
    pub top: Vec<RepositoryRecord>,
}

/// Result from the extract command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ExtractResult {
    /// List repository in `owner/name` form.
    pub source: String,
    /// Referenced repository urls in first-seen order.
    pub repositories: Vec<String>,
}
