//! Result report export as commented CSV.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use quiz_core::model::{Report, Verdict};
use quiz_core::time::format_elapsed;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// Sentinel written in the `chosen` column for unanswered questions.
pub const UNANSWERED: &str = "unanswered";

/// File-name prefix of exported reports.
pub const REPORT_FILE_PREFIX: &str = "quiz_results_";

pub const REPORT_COLUMNS: [&str; 6] = [
    "ordinal",
    "prompt",
    "chosen",
    "correct",
    "verdict",
    "explanation",
];

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportWriteError {
    #[error("cannot create report file {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

#[derive(Serialize)]
struct ReportRow<'a> {
    ordinal: usize,
    prompt: &'a str,
    chosen: &'a str,
    correct: &'a str,
    verdict: &'a str,
    explanation: &'a str,
}

/// Suggested file name such as `quiz_results_20240131_093000.csv`.
#[must_use]
pub fn default_report_file_name(now: DateTime<Utc>) -> String {
    format!("{REPORT_FILE_PREFIX}{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// Write `report` to `out`: a `#` header block followed by one CSV row per question.
///
/// # Errors
///
/// Returns `ReportWriteError` if writing fails.
pub fn write_report<W: Write>(report: &Report, mut out: W) -> Result<(), ReportWriteError> {
    writeln!(out, "# QUIZ RESULTS")?;
    writeln!(
        out,
        "# Date: {}",
        report.completed_at.format("%d/%m/%Y %H:%M:%S UTC")
    )?;
    writeln!(out, "# Score: {:.1}%", report.percentage)?;
    writeln!(out, "# Correct: {}/{}", report.correct_count, report.total_count)?;
    if let Some(duration) = report.duration {
        writeln!(out, "# Duration: {}", format_elapsed(duration))?;
    }
    writeln!(out, "#")?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    writer.write_record(REPORT_COLUMNS)?;
    for entry in &report.entries {
        writer.serialize(ReportRow {
            ordinal: entry.ordinal,
            prompt: &entry.prompt,
            chosen: entry.chosen.map_or(UNANSWERED, |label| label.as_str()),
            correct: entry.correct.as_str(),
            verdict: if entry.verdict == Verdict::Correct {
                "correct"
            } else {
                "incorrect"
            },
            explanation: &entry.explanation,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `report` to a file at `path`, replacing any existing file.
///
/// # Errors
///
/// Returns `ReportWriteError::Create` if the file cannot be created, or other variants
/// if writing fails.
pub fn export_report(report: &Report, path: &Path) -> Result<(), ReportWriteError> {
    let file = File::create(path).map_err(|source| ReportWriteError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_report(report, BufWriter::new(file))?;
    info!(path = %path.display(), score = report.percentage, "exported report");
    Ok(())
}
