// SPDX-License-Identifier: Apache-2.0

use console::style;
use std::io::{self, Write};

use crate::cli::OutputContext;
use crate::commands::types::ExtractResult;

use super::Renderable;

impl Renderable for ExtractResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w)?;
        writeln!(
            w,
            "{}",
            style(format!(
                "Found {} repositories in {}:",
                self.repositories.len(),
                self.source
            ))
            .bold()
        )?;
        writeln!(w)?;

        for (i, url) in self.repositories.iter().enumerate() {
            let num = format!("{:>4}.", i + 1);
            writeln!(w, "  {} {}", style(num).dim(), style(url).cyan())?;
        }

        writeln!(w)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    #[test]
    fn test_render_numbered_list() {
        console::set_colors_enabled(false);
        let result = ExtractResult {
            source: "zemmsoares/awesome-rices".to_string(),
            repositories: vec![
                "https://github.com/x/y".to_string(),
                "https://github.com/a/b".to_string(),
            ],
        };
        let ctx = OutputContext {
            format: OutputFormat::Text,
            quiet: false,
            verbose: false,
            is_tty: false,
        };

        let mut buf = Vec::new();
        result.render_text(&mut buf, &ctx).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Found 2 repositories in zemmsoares/awesome-rices:"));
        assert!(text.contains("   1. https://github.com/x/y"));
        assert!(text.contains("   2. https://github.com/a/b"));
    }
}
