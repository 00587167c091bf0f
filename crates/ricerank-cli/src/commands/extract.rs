// SPDX-License-Identifier: Apache-2.0

//! List the repositories referenced by the curated list.

use anyhow::Result;
use ricerank_core::extract_only;

use super::types::ExtractResult;
use crate::cli::SourceArgs;

/// Fetches the list document and returns the unique references.
pub async fn run(args: &SourceArgs) -> Result<ExtractResult> {
    let config = super::load_config(args)?;
    let token = super::resolve_token(&config, args)?;

    let refs = super::interruptible(extract_only(&config, token)).await?;

    Ok(ExtractResult {
        source: format!("{}/{}", config.source.owner, config.source.name),
        repositories: refs.into_iter().map(|r| r.url).collect(),
    })
}
