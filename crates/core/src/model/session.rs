use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::option::OptionLabel;

/// Committed answers keyed by question index (bank order).
pub type Answers = BTreeMap<usize, OptionLabel>;

/// Session mode.
///
/// Both modes share navigation and answer recording; they differ in feedback
/// visibility and time-boxing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuizMode {
    /// Immediate per-question feedback on demand.
    #[default]
    Practice,
    /// Time-boxed, feedback deferred to submission.
    Exam,
}

impl QuizMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Practice => "practice",
            Self::Exam => "exam",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Practice => "Practice",
            Self::Exam => "Exam",
        }
    }
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of checking one answer in practice mode.
///
/// Rendering (colours, icons) is up to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub chosen: OptionLabel,
    pub correct_label: OptionLabel,
    pub is_correct: bool,
    pub explanation: String,
}
