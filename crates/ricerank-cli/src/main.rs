// SPDX-License-Identifier: Apache-2.0

//! ricerank - rank a curated list of rice repositories by GitHub stars.
//!
//! Fetches the awesome-rices README, extracts the linked repositories,
//! looks up their metadata, and writes the ranking as text and JSON.

mod cli;
mod commands;
mod errors;
mod logging;
mod output;
mod provider;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::{Cli, OutputContext};
use crate::errors::Interrupted;

/// Exit status after Ctrl-C (128 + SIGINT).
const EXIT_INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let output_ctx = OutputContext::from_cli(cli.output, cli.quiet, cli.verbose);

    match commands::run(cli.command, output_ctx).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is::<Interrupted>() => {
            eprintln!("\n{e}");
            ExitCode::from(EXIT_INTERRUPTED)
        }
        Err(e) => {
            eprintln!("Error: {}", errors::format_error(&e));
            ExitCode::FAILURE
        }
    }
}
