//! File adapters for the quiz: question spreadsheets in, result reports out, and the
//! dotenv-style settings file.

#![forbid(unsafe_code)]

pub mod config;
pub mod report;
pub mod spreadsheet;

pub use config::{ConfigError, DEFAULT_CONFIG_FILE, load_settings, settings_from_pairs};
pub use report::{ReportWriteError, default_report_file_name, export_report, write_report};
pub use spreadsheet::{
    CellIssue, LoadError, discover_question_file, load_questions, load_questions_from_csv_reader,
};
