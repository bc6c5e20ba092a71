use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::model::option::OptionLabel;
use crate::model::session::QuizMode;

/// Per-question outcome in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    Incorrect,
    /// No answer was committed. Scores like `Incorrect`.
    Unanswered,
}

impl Verdict {
    #[must_use]
    pub const fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

/// Coarse score band used for colouring results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeBand {
    /// 80% and above.
    Strong,
    /// 60% up to 80%.
    Fair,
    Weak,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// One-based position in bank order.
    pub ordinal: usize,
    pub prompt: String,
    pub chosen: Option<OptionLabel>,
    pub correct: OptionLabel,
    pub verdict: Verdict,
    pub explanation: String,
}

/// Scored summary of a session. A value, built on demand by [`crate::score`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub mode: QuizMode,
    pub completed_at: DateTime<Utc>,
    pub entries: Vec<ReportEntry>,
    pub correct_count: usize,
    pub total_count: usize,
    /// `0.0` when there are no questions.
    pub percentage: f64,
    /// Time since the exam started; only set for exam submissions.
    #[serde(skip)]
    pub duration: Option<Duration>,
}

impl Report {
    /// Entries that were not answered correctly, unanswered ones included.
    #[must_use]
    pub fn missed(&self) -> Vec<&ReportEntry> {
        self.entries
            .iter()
            .filter(|entry| !entry.verdict.is_correct())
            .collect()
    }

    #[must_use]
    pub fn unanswered_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.verdict == Verdict::Unanswered)
            .count()
    }

    #[must_use]
    pub fn grade_band(&self) -> GradeBand {
        if self.percentage >= 80.0 {
            GradeBand::Strong
        } else if self.percentage >= 60.0 {
            GradeBand::Fair
        } else {
            GradeBand::Weak
        }
    }
}
