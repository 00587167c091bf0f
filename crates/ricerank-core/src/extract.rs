// SPDX-License-Identifier: Apache-2.0

//! Repository reference extraction from markdown.
//!
//! Finds `[label](url)` links whose url points at a repository on the
//! configured host, keeps only the `owner/name` part, and deduplicates while
//! preserving first-seen order. Link labels, optional link titles, file and
//! directory references (`/blob/...`, `/tree/...`, `/raw/...`), queries, and
//! fragments are discarded. Links to any other page of a repository
//! (`/issues/3`, `/releases`) are not references.

use std::collections::HashSet;

use regex::Regex;
use tracing::debug;

use crate::error::RiceRankError;
use crate::record::RepoRef;

/// Compiled matcher for repository links on one host.
#[derive(Debug, Clone)]
pub struct ReferenceExtractor {
    host: String,
    pattern: Regex,
}

impl ReferenceExtractor {
    /// Builds an extractor for links starting with `host`
    /// (e.g. `https://github.com/`).
    ///
    /// # Errors
    ///
    /// Returns `RiceRankError::Config` if the host is empty or the pattern
    /// cannot be compiled.
    pub fn new(host: &str) -> crate::Result<Self> {
        let host = if host.ends_with('/') {
            host.to_string()
        } else {
            format!("{host}/")
        };
        if host == "/" {
            return Err(RiceRankError::Config {
                message: "link host must not be empty".to_string(),
            });
        }

        // label, host/owner/name, then an optional file or directory
        // reference, trailing slash, query or fragment, and link title
        let pattern = format!(
            r#"\[[^\]]+\]\({}([^/\s)?#]+)/([^/\s)?#]+)(?:/(?:blob|tree|raw)/[^)\s]+|/)?(?:[?#][^)\s]*)?(?:\s+"[^"]*")?\)"#,
            regex::escape(&host)
        );
        let pattern = Regex::new(&pattern).map_err(|e| RiceRankError::Config {
            message: format!("invalid link pattern for host {host}: {e}"),
        })?;

        Ok(Self { host, pattern })
    }

    /// Returns the unique repositories linked from `text`, in first-seen order.
    ///
    /// Deduplication is exact and case-sensitive on the canonical url.
    #[must_use]
    pub fn extract(&self, text: &str) -> Vec<RepoRef> {
        let mut seen = HashSet::new();
        let mut refs = Vec::new();

        for caps in self.pattern.captures_iter(text) {
            let owner = &caps[1];
            let name = &caps[2];
            let url = format!("{}{owner}/{name}", self.host);
            if seen.insert(url.clone()) {
                refs.push(RepoRef {
                    url,
                    owner: owner.to_string(),
                    name: name.to_string(),
                });
            }
        }

        debug!(count = refs.len(), host = %self.host, "Extracted repository references");
        refs
    }
}

/// Convenience wrapper around [`ReferenceExtractor`].
///
/// # Errors
///
/// See [`ReferenceExtractor::new`].
pub fn extract_references(text: &str, host: &str) -> crate::Result<Vec<RepoRef>> {
    Ok(ReferenceExtractor::new(host)?.extract(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "https://github.com/";

    fn urls(text: &str) -> Vec<String> {
        extract_references(text, HOST)
            .unwrap()
            .into_iter()
            .map(|r| r.url)
            .collect()
    }

    #[test]
    fn test_sub_paths_collapse_to_one_entry() {
        let text = "- [a](https://github.com/x/y)\n- [b](https://github.com/x/y/blob/main/f.txt)\n";
        assert_eq!(urls(text), ["https://github.com/x/y"]);
    }

    #[test]
    fn test_raw_file_links_collapse_to_repository() {
        let text = "[wall](https://github.com/x/y/raw/main/wall.png)";
        assert_eq!(urls(text), ["https://github.com/x/y"]);
    }

    #[test]
    fn test_other_repository_pages_are_excluded() {
        let text = "[bug](https://github.com/x/y/issues/3) [rel](https://github.com/a/b/releases) \
                    [blob](https://github.com/c/d/blob/) [ok](https://github.com/e/f/tree/main)";
        assert_eq!(urls(text), ["https://github.com/e/f"]);
    }

    #[test]
    fn test_first_seen_order_is_preserved() {
        let text = "[1](https://github.com/b/two) [2](https://github.com/a/one) \
                    [3](https://github.com/b/two/tree/main) [4](https://github.com/c/three)";
        assert_eq!(
            urls(text),
            [
                "https://github.com/b/two",
                "https://github.com/a/one",
                "https://github.com/c/three"
            ]
        );
    }

    #[test]
    fn test_other_hosts_are_excluded() {
        let text = "[lab](https://gitlab.com/x/y) [hub](https://github.com/x/z)";
        assert_eq!(urls(text), ["https://github.com/x/z"]);
    }

    #[test]
    fn test_trailing_slash_query_and_fragment_are_stripped() {
        let text = "[a](https://github.com/x/y/) [b](https://github.com/x/y#readme) \
                    [c](https://github.com/x/y?tab=readme)";
        assert_eq!(urls(text), ["https://github.com/x/y"]);
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let text = "[a](https://github.com/x/y) [b](https://github.com/X/y)";
        assert_eq!(urls(text), ["https://github.com/x/y", "https://github.com/X/y"]);
    }

    #[test]
    fn test_owner_and_name_are_split() {
        let refs = extract_references("[dots](https://github.com/owner/my.dotfiles)", HOST).unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].owner, "owner");
        assert_eq!(refs[0].name, "my.dotfiles");
        assert_eq!(refs[0].api_path(), "owner/my.dotfiles");
    }

    #[test]
    fn test_links_with_titles_match() {
        let text = r#"[a](https://github.com/x/y "My rice")"#;
        assert_eq!(urls(text), ["https://github.com/x/y"]);
    }

    #[test]
    fn test_non_links_and_profile_urls_are_ignored() {
        let text = "https://github.com/x/y\n[profile](https://github.com/x)\n[]( https://github.com/x/y)";
        assert!(urls(text).is_empty());
    }

    #[test]
    fn test_host_without_trailing_slash() {
        let refs = extract_references("[a](https://github.com/x/y)", "https://github.com").unwrap();
        assert_eq!(refs[0].url, "https://github.com/x/y");
    }

    #[test]
    fn test_empty_host_is_rejected() {
        assert!(ReferenceExtractor::new("").is_err());
    }
}
