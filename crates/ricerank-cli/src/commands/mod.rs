// SPDX-License-Identifier: Apache-2.0

//! Command handlers for the ricerank CLI.

pub mod completion;
pub mod extract;
pub mod rank;
pub mod types;

use std::future::Future;

use anyhow::{Context, Result};
use ricerank_core::github::parse_owner_repo;
use ricerank_core::{AppConfig, require_token};
use secrecy::SecretString;
use tracing::debug;

use crate::cli::{Commands, OutputContext, SourceArgs};
use crate::errors::Interrupted;
use crate::output;
use crate::provider::CliTokenProvider;

/// Dispatch to the appropriate command handler.
pub async fn run(command: Commands, ctx: OutputContext) -> Result<()> {
    match command {
        Commands::Rank(args) => {
            let result = rank::run(args, &ctx).await?;
            output::render(&result, &ctx)
        }
        Commands::Extract(args) => {
            let result = extract::run(&args).await?;
            output::render(&result, &ctx)
        }
        Commands::Completion { shell } => {
            completion::run(shell);
            Ok(())
        }
    }
}

/// Loads configuration and applies the list-source flags.
fn load_config(source: &SourceArgs) -> Result<AppConfig> {
    let mut config = ricerank_core::load_config().context("Failed to load configuration")?;
    debug!("Configuration loaded successfully");

    if let Some(repo) = &source.repo {
        let (owner, name) = parse_owner_repo(repo)?;
        debug!(owner = %owner, name = %name, "Overriding list repository");
        config.source.owner = owner;
        config.source.name = name;
    }
    Ok(config)
}

/// Resolves the GitHub token from the environment or the prompt.
fn resolve_token(config: &AppConfig, source: &SourceArgs) -> Result<SecretString> {
    let provider = CliTokenProvider::new(&config.github.token_env, !source.no_prompt);
    Ok(require_token(&provider)?)
}

/// Runs `fut` to completion unless Ctrl-C arrives first.
///
/// In-flight requests are dropped on interrupt; no partial results are kept.
async fn interruptible<T, E>(fut: impl Future<Output = std::result::Result<T, E>>) -> Result<T>
where
    anyhow::Error: From<E>,
{
    tokio::select! {
        result = fut => Ok(result?),
        Ok(()) = tokio::signal::ctrl_c() => Err(Interrupted.into()),
    }
}
