// SPDX-License-Identifier: Apache-2.0

use console::style;
use std::io::{self, Write};

use crate::cli::OutputContext;
use crate::commands::types::RankResult;

use super::Renderable;

impl Renderable for RankResult {
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        let title = format!("Top {} Rices by Stars:", self.limit);

        writeln!(w)?;
        writeln!(w, "{}", style(&title).bold())?;
        writeln!(w, "{}", "=".repeat(title.len() - 1))?;

        for record in &self.top {
            writeln!(w)?;
            writeln!(w, "Stars: {}", style(record.stars).yellow())?;
            writeln!(w, "URL: {}", style(&record.url).cyan())?;
            if !record.description.is_empty() {
                writeln!(w, "Description: {}", record.description)?;
            }
            if !record.language.is_empty() {
                writeln!(w, "Language: {}", record.language)?;
            }
        }

        if self.degraded > 0 {
            writeln!(w)?;
            writeln!(
                w,
                "{}",
                style(format!(
                    "{} of {} repositories could not be looked up and are listed with 0 stars.",
                    self.degraded, self.total
                ))
                .yellow()
            )?;
        }

        if !ctx.quiet {
            writeln!(w)?;
            writeln!(
                w,
                "{}",
                style(format!(
                    "Saved {} and {}",
                    self.text_report.display(),
                    self.json_report.display()
                ))
                .dim()
            )?;
        }
        Ok(())
    }
}
