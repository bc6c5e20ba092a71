//! Question spreadsheet ingestion.
//!
//! Readers turn a file into a [`RawTable`]; [`table::drafts_from_table`] then checks the
//! required columns and hands rows to [`QuestionBank::from_drafts`] for validation.

mod delimited;
mod discovery;
mod table;
mod workbook;

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use quiz_core::model::{FieldProblem, QuestionBank, QuestionBankError};
use thiserror::Error;
use tracing::{info, warn};

pub use discovery::{PRIORITY_KEYWORDS, discover_question_file};
pub use table::{
    COL_CORRECT, COL_EXPLANATION, COL_OPTION_A, COL_OPTION_B, COL_OPTION_C, COL_OPTION_D,
    COL_PROMPT, REQUIRED_COLUMNS, column_for,
};

use table::RawTable;

/// File extensions read through the workbook reader.
pub const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// File extensions read as comma-separated text.
pub const DELIMITED_EXTENSIONS: [&str; 1] = ["csv"];

/// A single invalid cell, located the way a spreadsheet user would find it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellIssue {
    /// Spreadsheet row number (the header is row 1).
    pub row: usize,
    pub column: &'static str,
    pub problem: FieldProblem,
}

impl fmt::Display for CellIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}, column '{}': {}", self.row, self.column, self.problem)
    }
}

/// Errors surfaced while loading a question file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("question file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("unsupported question file type: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to read spreadsheet {}: {source}", path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("spreadsheet {} has no worksheet", path.display())]
    NoWorksheet { path: PathBuf },

    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column(s): {}", columns.join(", "))]
    MissingColumns { columns: Vec<&'static str> },

    #[error("{} invalid cell(s) in question file", issues.len())]
    InvalidRows { issues: Vec<CellIssue> },

    #[error(transparent)]
    Bank(QuestionBankError),
}

impl LoadError {
    /// Human-readable detail lines, one per problem, for error notifications.
    #[must_use]
    pub fn details(&self) -> Vec<String> {
        match self {
            Self::InvalidRows { issues } => issues.iter().map(ToString::to_string).collect(),
            other => vec![other.to_string()],
        }
    }
}

/// Load and validate a question file.
///
/// Nothing is returned unless every row is valid; the caller keeps its previous bank on
/// error.
///
/// # Errors
///
/// Returns `LoadError` when the file is missing or unreadable, lacks required columns,
/// or contains invalid rows.
pub fn load_questions(path: &Path) -> Result<QuestionBank, LoadError> {
    if !path.is_file() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let table = if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        workbook::read_first_sheet(path)?
    } else if DELIMITED_EXTENSIONS.contains(&extension.as_str()) {
        delimited::read_csv_path(path)?
    } else {
        return Err(LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    };

    let bank = build_bank(&table).inspect_err(|err| {
        warn!(path = %path.display(), error = %err, "question file rejected");
    })?;
    info!(path = %path.display(), questions = bank.len(), "loaded question file");
    Ok(bank)
}

/// Load questions from CSV text supplied by any reader.
///
/// # Errors
///
/// Same as [`load_questions`], minus the file-system cases.
pub fn load_questions_from_csv_reader<R: Read>(reader: R) -> Result<QuestionBank, LoadError> {
    let table = delimited::read_csv(reader)?;
    build_bank(&table)
}

fn build_bank(table: &RawTable) -> Result<QuestionBank, LoadError> {
    let drafts = table::drafts_from_table(table)?;
    QuestionBank::from_drafts(drafts).map_err(|err| match err {
        QuestionBankError::InvalidRecords { issues } => LoadError::InvalidRows {
            issues: issues
                .into_iter()
                .map(|issue| CellIssue {
                    row: table.row_number(issue.index),
                    column: column_for(issue.field),
                    problem: issue.problem,
                })
                .collect(),
        },
        other => LoadError::Bank(other),
    })
}
