//! Settings file (`.env` style) reader.

use std::path::{Path, PathBuf};

use quiz_core::model::{QuizSettings, SettingsError, Theme, parse_flag, parse_minutes};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_CONFIG_FILE: &str = ".env";

pub const KEY_EXAM_MINUTES: &str = "EXAM_TIME_MIN";
pub const KEY_RANDOMIZE_QUESTIONS: &str = "RANDOMIZE_QUESTIONS";
pub const KEY_RANDOMIZE_OPTIONS: &str = "RANDOMIZE_OPTIONS";
pub const KEY_THEME: &str = "THEME";
pub const KEY_FONT_FAMILY: &str = "FONT_FAMILY";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("cannot read settings file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

/// Read settings from a dotenv-style file.
///
/// A missing file yields the defaults. Values that fail to parse are logged and the
/// default is kept; unknown keys are ignored.
///
/// # Errors
///
/// Returns `ConfigError::Read` if the file exists but cannot be opened.
pub fn load_settings(path: &Path) -> Result<QuizSettings, ConfigError> {
    if !path.exists() {
        debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(QuizSettings::default());
    }

    let iter = dotenvy::from_path_iter(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let pairs = iter.filter_map(|item| match item {
        Ok(pair) => Some(pair),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "skipping unreadable settings line");
            None
        }
    });

    Ok(settings_from_pairs(pairs))
}

/// Fold key/value pairs over the default settings.
pub fn settings_from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> QuizSettings
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .into_iter()
        .fold(QuizSettings::default(), |settings, (key, value)| {
            let (key, value) = (key.as_ref().trim(), value.as_ref());
            match apply(settings.clone(), key, value) {
                Ok(next) => next,
                Err(err) => {
                    warn!(key, error = %err, "ignoring invalid setting");
                    settings
                }
            }
        })
}

fn apply(settings: QuizSettings, key: &str, value: &str) -> Result<QuizSettings, SettingsError> {
    Ok(match key {
        KEY_EXAM_MINUTES => settings.with_exam_minutes(parse_minutes(value)?),
        KEY_RANDOMIZE_QUESTIONS => settings.with_randomize_questions(parse_flag(value)?),
        KEY_RANDOMIZE_OPTIONS => settings.with_randomize_options(parse_flag(value)?),
        KEY_THEME => settings.with_theme(Theme::parse(value)?),
        KEY_FONT_FAMILY => settings.with_font_family(value)?,
        _ => settings,
    })
}
