use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{DELIMITED_EXTENSIONS, WORKBOOK_EXTENSIONS};
use crate::report::REPORT_FILE_PREFIX;

/// File-name fragments that mark a likely question file.
pub const PRIORITY_KEYWORDS: [&str; 4] = ["cau_hoi", "tracnghiem", "quiz", "question"];

/// Pick a question file from `dir`.
///
/// Only supported extensions are considered. Files whose name contains one of
/// [`PRIORITY_KEYWORDS`] win over other files; within a group the first name in
/// lexical order wins. Office lock files and exported result reports are ignored.
/// Returns `None` when nothing suitable exists or the directory cannot be read.
#[must_use]
pub fn discover_question_file(dir: &Path) -> Option<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(dir = %dir.display(), error = %err, "cannot scan for question files");
            return None;
        }
    };

    let mut candidates: Vec<(bool, String, PathBuf)> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?.to_string();
            let lower = name.to_ascii_lowercase();
            if lower.starts_with("~$") || lower.starts_with(REPORT_FILE_PREFIX) {
                return None;
            }
            let extension = path.extension()?.to_str()?.to_ascii_lowercase();
            let supported = WORKBOOK_EXTENSIONS.contains(&extension.as_str())
                || DELIMITED_EXTENSIONS.contains(&extension.as_str());
            if !supported {
                return None;
            }
            let preferred = PRIORITY_KEYWORDS.iter().any(|key| lower.contains(key));
            Some((!preferred, name, path))
        })
        .collect();

    candidates.sort();
    let picked = candidates.into_iter().next().map(|(_, _, path)| path);
    debug!(dir = %dir.display(), picked = ?picked, "question file discovery");
    picked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn prefers_keyword_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "aaa.xlsx");
        touch(dir.path(), "my_quiz.csv");
        touch(dir.path(), "notes.txt");

        let picked = discover_question_file(dir.path()).unwrap();
        assert_eq!(picked.file_name().unwrap(), "my_quiz.csv");
    }

    #[test]
    fn falls_back_to_first_supported_file() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "zeta.xls");
        touch(dir.path(), "beta.xlsx");
        touch(dir.path(), "~$lock.xlsx");

        let picked = discover_question_file(dir.path()).unwrap();
        assert_eq!(picked.file_name().unwrap(), "beta.xlsx");
    }

    #[test]
    fn ignores_exported_reports_and_empty_dirs() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_question_file(dir.path()).is_none());

        touch(dir.path(), "quiz_results_20240101_120000.csv");
        assert!(discover_question_file(dir.path()).is_none());
    }

    #[test]
    fn missing_directory_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_question_file(&dir.path().join("nope")).is_none());
    }
}
