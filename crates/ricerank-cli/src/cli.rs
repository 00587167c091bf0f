// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for ricerank.
//!
//! Uses clap's derive API for declarative CLI parsing.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Output format for CLI results.
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with colors (default)
    #[default]
    Text,
    /// JSON output for programmatic consumption
    Json,
}

/// Global output configuration passed to commands.
#[derive(Clone)]
pub struct OutputContext {
    /// Output format (text, json)
    pub format: OutputFormat,
    /// Suppress non-essential output (spinners, progress)
    pub quiet: bool,
    /// Enable verbose output
    pub verbose: bool,
    /// Whether stdout is a terminal (TTY)
    pub is_tty: bool,
}

impl OutputContext {
    /// Creates an `OutputContext` from CLI arguments.
    pub fn from_cli(format: OutputFormat, quiet: bool, verbose: bool) -> Self {
        Self {
            format,
            quiet,
            verbose,
            is_tty: std::io::stdout().is_terminal(),
        }
    }

    /// Returns true if progress messages should be printed.
    pub fn shows_progress(&self) -> bool {
        !self.quiet && matches!(self.format, OutputFormat::Text)
    }

    /// Returns true if interactive elements (progress bars, colors) should be shown.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && self.shows_progress()
    }
}

/// ricerank - rank a curated list of rice repositories by GitHub stars.
///
/// Fetches the awesome-rices README, collects every linked GitHub repository,
/// looks up its stars, description, and language, and writes the ranking to
/// sorted_rices.txt and sorted_rices.json.
#[derive(Parser)]
#[command(name = "ricerank")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Output format (text, json)
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    pub output: OutputFormat,

    /// Suppress non-essential output (progress)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch, enrich, and rank every repository in the list
    Rank(RankArgs),
    /// List the repositories referenced by the list without looking them up
    Extract(SourceArgs),
    /// Print a shell completion script
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Options selecting the list document and credentials.
#[derive(Args)]
pub struct SourceArgs {
    /// Repository whose README is the list (default: zemmsoares/awesome-rices)
    #[arg(long, value_name = "OWNER/NAME")]
    pub repo: Option<String>,

    /// Fail instead of prompting when no token is set in the environment
    #[arg(long)]
    pub no_prompt: bool,
}

/// Options for the `rank` command.
#[derive(Args)]
pub struct RankArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Directory to write sorted_rices.txt and sorted_rices.json into
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Number of repositories shown in the summary
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Maximum metadata requests per second (0 disables pacing)
    #[arg(long, value_name = "RPS")]
    pub rate: Option<f64>,
}
