// SPDX-License-Identifier: Apache-2.0

//! Report rendering and persistence.
//!
//! Produces the plain-text report (fields omitted when empty) and the JSON
//! report (every field always present), and writes both to disk.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::config::OutputConfig;
use crate::error::RiceRankError;
use crate::record::RepositoryRecord;

/// Title line of the text report.
pub const REPORT_TITLE: &str = "Awesome Rices Sorted by Stars";

/// Underline printed below the title.
const REPORT_UNDERLINE: &str = "===========================";

/// Width of the separator line between records.
const SEPARATOR_WIDTH: usize = 50;

/// Appends the per-record fields, skipping empty description and language.
pub fn write_record_fields(out: &mut String, record: &RepositoryRecord) {
    let _ = writeln!(out, "Stars: {}", record.stars);
    let _ = writeln!(out, "URL: {}", record.url);
    if !record.description.is_empty() {
        let _ = writeln!(out, "Description: {}", record.description);
    }
    if !record.language.is_empty() {
        let _ = writeln!(out, "Language: {}", record.language);
    }
}

/// Renders the plain-text report.
#[must_use]
pub fn render_text(records: &[RepositoryRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{REPORT_TITLE}");
    let _ = writeln!(out, "{REPORT_UNDERLINE}");
    out.push('\n');

    for record in records {
        write_record_fields(&mut out, record);
        let _ = writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH));
    }
    out
}

/// Renders the JSON report: an array of `{url, stars, description, language}`
/// with 2-space indentation.
///
/// # Errors
///
/// Returns `RiceRankError::Serialize` if serialization fails.
pub fn render_json(records: &[RepositoryRecord]) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Paths of the written reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    /// Plain-text report.
    pub text: PathBuf,
    /// JSON report.
    pub json: PathBuf,
}

fn write_file(path: &Path, contents: &str) -> crate::Result<()> {
    std::fs::write(path, contents).map_err(|source| RiceRankError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Sibling path a report is written to before being moved into place.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Writes both reports for `records` as configured by `output`.
///
/// Both documents are rendered and written to `.tmp` siblings first, then
/// renamed into place. A rendering or write failure removes the staged files
/// and leaves any previous reports untouched.
///
/// # Errors
///
/// Returns `RiceRankError::Io` if the directory or a file cannot be written.
#[instrument(skip(records, output), fields(records = records.len(), dir = %output.dir.display()))]
pub fn write_reports(
    records: &[RepositoryRecord],
    output: &OutputConfig,
) -> crate::Result<ReportPaths> {
    let text = render_text(records);
    let json = render_json(records)?;

    std::fs::create_dir_all(&output.dir).map_err(|source| RiceRankError::Io {
        path: output.dir.clone(),
        source,
    })?;

    let paths = ReportPaths {
        text: output.text_path(),
        json: output.json_path(),
    };
    let reports = [(&paths.text, text), (&paths.json, json)];

    let mut staged = Vec::with_capacity(reports.len());
    for (path, contents) in &reports {
        let tmp = staging_path(path);
        if let Err(e) = write_file(&tmp, contents) {
            for leftover in staged.iter().chain(std::iter::once(&tmp)) {
                let _ = std::fs::remove_file(leftover);
            }
            return Err(e);
        }
        staged.push(tmp);
    }

    for ((path, _), tmp) in reports.iter().zip(&staged) {
        std::fs::rename(tmp, path).map_err(|source| RiceRankError::Io {
            path: (*path).clone(),
            source,
        })?;
    }

    debug!(text = %paths.text.display(), json = %paths.json.display(), "Reports written");
    Ok(paths)
}
