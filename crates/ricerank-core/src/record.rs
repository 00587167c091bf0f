// SPDX-License-Identifier: Apache-2.0

//! Repository references and ranked records.

use serde::{Deserialize, Serialize};

/// A repository referenced by the curated list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    /// Canonical url as it appeared in the list, without sub-path or trailing slash.
    pub url: String,
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub name: String,
}

impl RepoRef {
    /// Returns the repository path in `owner/name` form, as used by the REST API.
    #[must_use]
    pub fn api_path(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.url)
    }
}

/// Metadata GitHub reports for a repository.
///
/// Fields GitHub omits or sends as `null` read as their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RepoMetadata {
    /// Number of stargazers.
    #[serde(default)]
    pub stargazers_count: u64,
    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
    /// Primary language.
    #[serde(default)]
    pub language: Option<String>,
}

/// A referenced repository together with its popularity metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    /// Canonical repository url.
    pub url: String,
    /// Star count (0 when the lookup failed).
    pub stars: u64,
    /// Description, empty when unknown.
    pub description: String,
    /// Primary language, empty when unknown.
    pub language: String,
}

impl RepositoryRecord {
    /// Record with default values, used when the lookup failed.
    #[must_use]
    pub fn degraded(repo: &RepoRef) -> Self {
        Self {
            url: repo.url.clone(),
            stars: 0,
            description: String::new(),
            language: String::new(),
        }
    }

    /// Record populated from GitHub metadata.
    #[must_use]
    pub fn from_metadata(repo: &RepoRef, metadata: RepoMetadata) -> Self {
        Self {
            url: repo.url.clone(),
            stars: metadata.stargazers_count,
            description: metadata.description.unwrap_or_default(),
            language: metadata.language.unwrap_or_default(),
        }
    }
}

/// Sorts records by star count, most starred first.
///
/// The sort is stable: records with equal star counts keep their discovery order.
pub fn rank(records: &mut [RepositoryRecord]) {
    records.sort_by(|a, b| b.stars.cmp(&a.stars));
}
