// SPDX-License-Identifier: Apache-2.0

//! Console progress for the ranking pipeline.
//!
//! Interactive terminals get a progress bar during enrichment; otherwise
//! plain `Processing i/n: url` lines are printed. Nothing is printed in
//! quiet or JSON mode.

use std::cell::OnceCell;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use ricerank_core::{EnrichObserver, PipelineObserver, RepoRef, RiceRankError, Stage};

use crate::cli::OutputContext;

/// Pipeline observer that reports to the console.
pub struct ConsoleProgress {
    show: bool,
    interactive: bool,
    bar: OnceCell<ProgressBar>,
}

impl ConsoleProgress {
    /// Creates a reporter honoring the output context.
    pub fn new(ctx: &OutputContext) -> Self {
        Self {
            show: ctx.shows_progress(),
            interactive: ctx.is_interactive(),
            bar: OnceCell::new(),
        }
    }

    fn println(&self, line: &str) {
        if !self.show {
            return;
        }
        match self.bar.get() {
            Some(bar) if !bar.is_finished() => bar.println(line),
            _ => println!("{line}"),
        }
    }

    fn start_bar(&self, total: usize) {
        if !self.interactive {
            return;
        }
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{pos}/{len}] {bar:30.cyan/blue} {msg}")
                .expect("Invalid progress template")
                .progress_chars("=> "),
        );
        let _ = self.bar.set(bar);
    }

    /// Clears the progress bar if one is shown.
    pub fn finish(&self) {
        if let Some(bar) = self.bar.get() {
            bar.finish_and_clear();
        }
    }
}

impl EnrichObserver for ConsoleProgress {
    fn started(&self, current: usize, total: usize, repo: &RepoRef) {
        if let Some(bar) = self.bar.get() {
            bar.set_position((current - 1) as u64);
            bar.set_message(repo.url.clone());
        } else {
            self.println(&format!("Processing {current}/{total}: {repo}"));
        }
    }

    fn degraded(&self, repo: &RepoRef, error: &RiceRankError) {
        let detail = error
            .status()
            .map_or_else(|| error.to_string(), |status| status.to_string());
        self.println(
            &style(format!("Error fetching {}: {detail}", repo.api_path()))
                .yellow()
                .to_string(),
        );
    }
}

impl PipelineObserver for ConsoleProgress {
    fn stage(&self, stage: Stage) {
        match stage {
            Stage::FetchingList => self.println("Fetching README content..."),
            Stage::Extracting => self.println("Extracting GitHub URLs..."),
            Stage::Enriching { total } => {
                self.println(&format!("Found {total} repositories"));
                self.println("\nFetching repository information...");
                self.start_bar(total);
            }
            Stage::Saving => {
                self.finish();
                self.println("\nSaving results...");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    #[test]
    fn test_non_interactive_has_no_bar() {
        let ctx = OutputContext {
            format: OutputFormat::Text,
            quiet: false,
            verbose: false,
            is_tty: false,
        };
        let progress = ConsoleProgress::new(&ctx);
        progress.stage(Stage::Enriching { total: 3 });
        assert!(progress.bar.get().is_none());
    }

    #[test]
    fn test_quiet_json_prints_nothing() {
        let ctx = OutputContext {
            format: OutputFormat::Json,
            quiet: false,
            verbose: false,
            is_tty: true,
        };
        let progress = ConsoleProgress::new(&ctx);
        assert!(!progress.show);
        assert!(!progress.interactive);
    }
}
