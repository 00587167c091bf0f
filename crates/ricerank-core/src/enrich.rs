// SPDX-License-Identifier: Apache-2.0

//! Sequential metadata enrichment with partial-failure tolerance.
//!
//! Each reference is looked up one at a time. A failed lookup degrades only
//! its own record (zero stars, empty description and language) and the run
//! continues. Requests are paced by a [`RatePolicy`] so consecutive lookups
//! start at least `1 / requests_per_second` apart.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::error::{RiceRankError, Severity};
use crate::record::{RepoMetadata, RepoRef, RepositoryRecord};

/// Source of repository metadata.
///
/// Implemented by [`crate::github::GitHubClient`]; tests substitute fakes.
#[async_trait]
pub trait RepoMetadataSource: Send + Sync {
    /// Looks up star count, description, and language of `repo`.
    async fn repository(&self, repo: &RepoRef) -> crate::Result<RepoMetadata>;
}

/// Ceiling on how often metadata requests may start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatePolicy {
    min_interval: Duration,
}

impl RatePolicy {
    /// Policy allowing at most `rps` requests per second.
    ///
    /// Zero, negative, or non-finite values disable pacing.
    #[must_use]
    pub fn per_second(rps: f64) -> Self {
        if rps.is_finite() && rps > 0.0 {
            Self {
                min_interval: Duration::from_secs_f64(1.0 / rps),
            }
        } else {
            Self::unlimited()
        }
    }

    /// Policy without any pacing.
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            min_interval: Duration::ZERO,
        }
    }

    /// Minimum spacing between request starts.
    #[must_use]
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Enforces a [`RatePolicy`] across consecutive requests.
#[derive(Debug)]
struct Pacer {
    policy: RatePolicy,
    last: Option<Instant>,
}

impl Pacer {
    fn new(policy: RatePolicy) -> Self {
        Self { policy, last: None }
    }

    /// Sleeps until the next request may start, then marks it started.
    async fn wait(&mut self) {
        if let Some(last) = self.last {
            let next = last + self.policy.min_interval;
            if next > Instant::now() {
                tokio::time::sleep_until(next).await;
            }
        }
        self.last = Some(Instant::now());
    }
}

/// Result of enriching one reference.
#[derive(Debug)]
pub enum EnrichOutcome {
    /// Metadata was fetched.
    Enriched(RepositoryRecord),
    /// Lookup failed; the record holds default values.
    Degraded {
        /// Zero/empty-field record for the reference.
        record: RepositoryRecord,
        /// Why the lookup failed.
        error: RiceRankError,
    },
}

impl EnrichOutcome {
    /// The record, whether enriched or degraded.
    #[must_use]
    pub fn record(&self) -> &RepositoryRecord {
        match self {
            EnrichOutcome::Enriched(record) | EnrichOutcome::Degraded { record, .. } => record,
        }
    }

    /// Consumes the outcome, returning the record.
    #[must_use]
    pub fn into_record(self) -> RepositoryRecord {
        match self {
            EnrichOutcome::Enriched(record) | EnrichOutcome::Degraded { record, .. } => record,
        }
    }

    /// Returns true if the lookup failed.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, EnrichOutcome::Degraded { .. })
    }
}

/// Result of an enrichment run.
#[derive(Debug, Default)]
pub struct EnrichReport {
    /// Number of references enriched successfully.
    pub enriched: usize,
    /// Number of references that fell back to default values.
    pub degraded: usize,
    /// Outcomes in discovery order.
    pub outcomes: Vec<EnrichOutcome>,
}

impl EnrichReport {
    /// Consumes the report, returning the records in discovery order.
    #[must_use]
    pub fn into_records(self) -> Vec<RepositoryRecord> {
        self.outcomes
            .into_iter()
            .map(EnrichOutcome::into_record)
            .collect()
    }
}

/// Observer notified as enrichment progresses.
pub trait EnrichObserver {
    /// Called before looking up item `current` of `total` (1-indexed).
    fn started(&self, current: usize, total: usize, repo: &RepoRef);

    /// Called after a lookup failed and the record was degraded.
    fn degraded(&self, repo: &RepoRef, error: &RiceRankError);
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl EnrichObserver for NoopObserver {
    fn started(&self, _current: usize, _total: usize, _repo: &RepoRef) {}

    fn degraded(&self, _repo: &RepoRef, _error: &RiceRankError) {}
}

/// Looks up every reference in order, one request at a time.
///
/// Degraded failures are absorbed into [`EnrichOutcome::Degraded`]. A fatal
/// failure (which a well-behaved source never produces for a single
/// repository) aborts the run.
///
/// # Errors
///
/// Returns the first error whose [`RiceRankError::severity`] is fatal.
pub async fn enrich(
    source: &dyn RepoMetadataSource,
    refs: &[RepoRef],
    policy: RatePolicy,
    observer: &dyn EnrichObserver,
) -> crate::Result<EnrichReport> {
    let total = refs.len();
    let mut pacer = Pacer::new(policy);
    let mut report = EnrichReport {
        outcomes: Vec::with_capacity(total),
        ..EnrichReport::default()
    };

    for (idx, repo) in refs.iter().enumerate() {
        pacer.wait().await;
        observer.started(idx + 1, total, repo);

        match source.repository(repo).await {
            Ok(metadata) => {
                debug!(repo = %repo, stars = metadata.stargazers_count, "Enriched");
                report.enriched += 1;
                report
                    .outcomes
                    .push(EnrichOutcome::Enriched(RepositoryRecord::from_metadata(
                        repo, metadata,
                    )));
            }
            Err(error) if error.severity() == Severity::Degraded => {
                warn!(repo = %repo, error = %error, "Lookup failed, keeping record with defaults");
                observer.degraded(repo, &error);
                report.degraded += 1;
                report.outcomes.push(EnrichOutcome::Degraded {
                    record: RepositoryRecord::degraded(repo),
                    error,
                });
            }
            Err(error) => return Err(error),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::error::Resource;

    /// Serves canned metadata; unknown paths fail with HTTP 404.
    struct FakeSource {
        stars: HashMap<&'static str, u64>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn new(stars: &[(&'static str, u64)]) -> Self {
            Self {
                stars: stars.iter().copied().collect(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RepoMetadataSource for FakeSource {
        async fn repository(&self, repo: &RepoRef) -> crate::Result<RepoMetadata> {
            let path = repo.api_path();
            self.calls.lock().unwrap().push(path.clone());
            match self.stars.get(path.as_str()) {
                Some(&stars) => Ok(RepoMetadata {
                    stargazers_count: stars,
                    description: Some(format!("{path} dots")),
                    language: Some("Shell".to_string()),
                }),
                None => Err(RiceRankError::Status {
                    resource: Resource::Repository { path },
                    status: 404,
                }),
            }
        }
    }

    /// Source that reports a fatal error for every lookup.
    struct RevokedSource;

    #[async_trait]
    impl RepoMetadataSource for RevokedSource {
        async fn repository(&self, _repo: &RepoRef) -> crate::Result<RepoMetadata> {
            Err(RiceRankError::NotAuthenticated)
        }
    }

    #[derive(Default)]
    struct Recorder {
        started: Mutex<Vec<(usize, usize, String)>>,
        degraded: Mutex<Vec<(String, Option<u16>)>>,
    }

    impl EnrichObserver for Recorder {
        fn started(&self, current: usize, total: usize, repo: &RepoRef) {
            self.started
                .lock()
                .unwrap()
                .push((current, total, repo.url.clone()));
        }

        fn degraded(&self, repo: &RepoRef, error: &RiceRankError) {
            self.degraded
                .lock()
                .unwrap()
                .push((repo.url.clone(), error.status()));
        }
    }

    fn repo(path: &str) -> RepoRef {
        let (owner, name) = path.split_once('/').unwrap();
        RepoRef {
            url: format!("https://github.com/{path}"),
            owner: owner.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_rate_policy_per_second() {
        assert_eq!(
            RatePolicy::per_second(2.0).min_interval(),
            Duration::from_millis(500)
        );
        assert_eq!(RatePolicy::per_second(0.0), RatePolicy::unlimited());
        assert_eq!(RatePolicy::per_second(-1.0), RatePolicy::unlimited());
        assert_eq!(RatePolicy::per_second(f64::NAN), RatePolicy::unlimited());
    }

    #[tokio::test]
    async fn test_degraded_lookup_does_not_stop_processing() {
        let source = FakeSource::new(&[("a/one", 5), ("c/three", 7)]);
        let refs = [repo("a/one"), repo("b/missing"), repo("c/three")];
        let observer = Recorder::default();

        let report = enrich(&source, &refs, RatePolicy::unlimited(), &observer)
            .await
            .unwrap();

        assert_eq!(report.enriched, 2);
        assert_eq!(report.degraded, 1);
        assert!(report.outcomes[1].is_degraded());

        let missing = report.outcomes[1].record();
        assert_eq!(missing.url, "https://github.com/b/missing");
        assert_eq!(missing.stars, 0);
        assert_eq!(missing.description, "");
        assert_eq!(missing.language, "");

        assert_eq!(
            *source.calls.lock().unwrap(),
            ["a/one", "b/missing", "c/three"]
        );
        assert_eq!(
            *observer.degraded.lock().unwrap(),
            [("https://github.com/b/missing".to_string(), Some(404))]
        );
    }

    #[tokio::test]
    async fn test_records_keep_discovery_order() {
        let source = FakeSource::new(&[("a/one", 1), ("b/two", 100)]);
        let refs = [repo("a/one"), repo("b/two")];

        let records = enrich(&source, &refs, RatePolicy::unlimited(), &NoopObserver)
            .await
            .unwrap()
            .into_records();

        assert_eq!(records[0].url, "https://github.com/a/one");
        assert_eq!(records[0].description, "a/one dots");
        assert_eq!(records[1].stars, 100);
    }

    #[tokio::test]
    async fn test_observer_sees_progress() {
        let source = FakeSource::new(&[("a/one", 1), ("b/two", 2)]);
        let refs = [repo("a/one"), repo("b/two")];
        let observer = Recorder::default();

        enrich(&source, &refs, RatePolicy::unlimited(), &observer)
            .await
            .unwrap();

        let started = observer.started.lock().unwrap();
        assert_eq!(started.len(), 2);
        assert_eq!(started[0], (1, 2, "https://github.com/a/one".to_string()));
        assert_eq!(started[1].0, 2);
    }

    #[tokio::test]
    async fn test_fatal_error_aborts() {
        let refs = [repo("a/one"), repo("b/two")];
        let err = enrich(&RevokedSource, &refs, RatePolicy::unlimited(), &NoopObserver)
            .await
            .unwrap_err();
        assert!(matches!(err, RiceRankError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_empty_input() {
        let source = FakeSource::new(&[]);
        let report = enrich(&source, &[], RatePolicy::per_second(1.0), &NoopObserver)
            .await
            .unwrap();
        assert_eq!(report.enriched + report.degraded, 0);
    }

    #[tokio::test]
    async fn test_rate_policy_spaces_requests() {
        let source = FakeSource::new(&[("a/one", 1), ("b/two", 2), ("c/three", 3)]);
        let refs = [repo("a/one"), repo("b/two"), repo("c/three")];

        let started = std::time::Instant::now();
        enrich(&source, &refs, RatePolicy::per_second(20.0), &NoopObserver)
            .await
            .unwrap();

        // two gaps of 50ms between three requests
        assert!(started.elapsed() >= Duration::from_millis(100));
    }
}
