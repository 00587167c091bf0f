// SPDX-License-Identifier: Apache-2.0

//! Rank the curated list by stars.

use anyhow::Result;
use ricerank_core::run_pipeline;
use tracing::info;

use super::types::RankResult;
use crate::cli::{OutputContext, RankArgs};
use crate::output::progress::ConsoleProgress;

/// Runs the full pipeline and returns the summary for display.
pub async fn run(args: RankArgs, ctx: &OutputContext) -> Result<RankResult> {
    let mut config = super::load_config(&args.source)?;
    if let Some(dir) = args.output_dir {
        config.output.dir = dir;
    }
    if let Some(top) = args.top {
        config.output.top = top;
    }
    if let Some(rate) = args.rate {
        config.enrich.requests_per_second = rate;
    }

    let token = super::resolve_token(&config, &args.source)?;

    let progress = ConsoleProgress::new(ctx);
    let summary = super::interruptible(run_pipeline(&config, token, &progress)).await;
    progress.finish();
    let summary = summary?;

    info!(
        enriched = summary.enriched,
        degraded = summary.degraded,
        "Ranking complete"
    );

    Ok(RankResult {
        source: format!("{}/{}", config.source.owner, config.source.name),
        total: summary.records.len(),
        enriched: summary.enriched,
        degraded: summary.degraded,
        text_report: summary.reports.text.clone(),
        json_report: summary.reports.json.clone(),
        limit: config.output.top,
        top: summary.top(config.output.top).to_vec(),
    })
}
