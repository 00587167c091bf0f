// SPDX-License-Identifier: Apache-2.0

//! Platform-agnostic pipeline entry points.
//!
//! Wires the stages together in their fixed order:
//! fetch → extract → enrich → rank → persist. Any error returned from here
//! is fatal; per-repository failures are absorbed by the enrichment stage.

use secrecy::SecretString;
use tracing::{info, instrument};

use crate::config::AppConfig;
use crate::enrich::{EnrichObserver, NoopObserver, RatePolicy, enrich};
use crate::extract::ReferenceExtractor;
use crate::github::GitHubClient;
use crate::record::{RepoRef, RepositoryRecord, rank};
use crate::report::{ReportPaths, write_reports};

/// Pipeline stage about to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Downloading the list document.
    FetchingList,
    /// Scanning the list document for repository links.
    Extracting,
    /// Looking up metadata for `total` references.
    Enriching {
        /// Number of unique references found.
        total: usize,
    },
    /// Writing the reports.
    Saving,
}

/// Observer of the whole pipeline.
pub trait PipelineObserver: EnrichObserver {
    /// Called when a stage starts.
    fn stage(&self, _stage: Stage) {}
}

impl PipelineObserver for NoopObserver {}

/// Outcome of a successful run.
#[derive(Debug)]
pub struct RunSummary {
    /// Records ranked by stars, most starred first.
    pub records: Vec<RepositoryRecord>,
    /// Number of successful lookups.
    pub enriched: usize,
    /// Number of lookups that fell back to default values.
    pub degraded: usize,
    /// Where the reports were written.
    pub reports: ReportPaths,
}

impl RunSummary {
    /// The `n` most starred records (fewer if the run found fewer).
    #[must_use]
    pub fn top(&self, n: usize) -> &[RepositoryRecord] {
        &self.records[..n.min(self.records.len())]
    }
}

async fn fetch_references(
    client: &GitHubClient,
    config: &AppConfig,
    observer: &dyn PipelineObserver,
) -> crate::Result<Vec<RepoRef>> {
    let extractor = ReferenceExtractor::new(&config.source.link_host)?;

    observer.stage(Stage::FetchingList);
    let document = client
        .fetch_list_document(&config.source.owner, &config.source.name)
        .await?;

    observer.stage(Stage::Extracting);
    Ok(extractor.extract(&document))
}

/// Fetches the list document and returns the repositories it links to.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the list document
/// cannot be fetched or decoded.
#[instrument(skip(config, token), fields(source = %format!("{}/{}", config.source.owner, config.source.name)))]
pub async fn extract_only(config: &AppConfig, token: SecretString) -> crate::Result<Vec<RepoRef>> {
    let client = GitHubClient::new(&config.github, token)?;
    fetch_references(&client, config, &NoopObserver).await
}

/// Runs the full pipeline and writes both reports.
///
/// # Errors
///
/// Returns a fatal error if the list document cannot be fetched or decoded,
/// or the reports cannot be written. Failures before the final rename leave
/// no report files behind.
#[instrument(skip(config, token, observer), fields(source = %format!("{}/{}", config.source.owner, config.source.name)))]
pub async fn run_pipeline(
    config: &AppConfig,
    token: SecretString,
    observer: &dyn PipelineObserver,
) -> crate::Result<RunSummary> {
    let client = GitHubClient::new(&config.github, token)?;
    let refs = fetch_references(&client, config, observer).await?;

    observer.stage(Stage::Enriching { total: refs.len() });
    let policy = RatePolicy::per_second(config.enrich.requests_per_second);
    let report = enrich(&client, &refs, policy, observer).await?;
    let (enriched, degraded) = (report.enriched, report.degraded);

    let mut records = report.into_records();
    rank(&mut records);

    observer.stage(Stage::Saving);
    let reports = write_reports(&records, &config.output)?;

    info!(
        repositories = records.len(),
        enriched, degraded, "Pipeline finished"
    );

    Ok(RunSummary {
        records,
        enriched,
        degraded,
        reports,
    })
}
