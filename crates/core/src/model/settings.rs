use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("exam duration must be a whole number of minutes (got {raw:?})")]
    InvalidExamMinutes { raw: String },

    #[error("expected true or false (got {raw:?})")]
    InvalidFlag { raw: String },

    #[error("theme must be dark or light (got {raw:?})")]
    InvalidTheme { raw: String },

    #[error("font family cannot be empty")]
    EmptyFontFamily,
}

/// Appearance theme of the desktop window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// # Errors
    ///
    /// Returns `SettingsError::InvalidTheme` for anything but `dark` or `light`.
    pub fn parse(raw: &str) -> Result<Self, SettingsError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(SettingsError::InvalidTheme {
                raw: raw.to_string(),
            }),
        }
    }
}

/// Startup configuration of the quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSettings {
    exam_minutes: u32,
    randomize_questions: bool,
    randomize_options: bool,
    theme: Theme,
    font_family: String,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            exam_minutes: 30,
            randomize_questions: true,
            randomize_options: true,
            theme: Theme::Dark,
            font_family: "Inter".to_string(),
        }
    }
}

impl QuizSettings {
    #[must_use]
    pub fn exam_minutes(&self) -> u32 {
        self.exam_minutes
    }

    /// Exam time limit. Zero minutes is allowed and expires on the first tick.
    #[must_use]
    pub fn exam_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.exam_minutes))
    }

    #[must_use]
    pub fn randomize_questions(&self) -> bool {
        self.randomize_questions
    }

    #[must_use]
    pub fn randomize_options(&self) -> bool {
        self.randomize_options
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    #[must_use]
    pub fn with_exam_minutes(mut self, minutes: u32) -> Self {
        self.exam_minutes = minutes;
        self
    }

    #[must_use]
    pub fn with_randomize_questions(mut self, enabled: bool) -> Self {
        self.randomize_questions = enabled;
        self
    }

    #[must_use]
    pub fn with_randomize_options(mut self, enabled: bool) -> Self {
        self.randomize_options = enabled;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// # Errors
    ///
    /// Returns `SettingsError::EmptyFontFamily` if the name is blank.
    pub fn with_font_family(mut self, family: &str) -> Result<Self, SettingsError> {
        let family = family.trim();
        if family.is_empty() {
            return Err(SettingsError::EmptyFontFamily);
        }
        self.font_family = family.to_string();
        Ok(self)
    }
}

/// Parses a minute count such as `45`.
///
/// # Errors
///
/// Returns `SettingsError::InvalidExamMinutes` for negative or non-numeric input.
pub fn parse_minutes(raw: &str) -> Result<u32, SettingsError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| SettingsError::InvalidExamMinutes {
            raw: raw.to_string(),
        })
}

/// Parses a boolean switch. Accepts `true`/`false` in any case.
///
/// # Errors
///
/// Returns `SettingsError::InvalidFlag` for any other value.
pub fn parse_flag(raw: &str) -> Result<bool, SettingsError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(SettingsError::InvalidFlag {
            raw: raw.to_string(),
        }),
    }
}
