use quiz_core::model::{Feedback, OptionLabel, QuizMode};

/// One visible option of the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub label: OptionLabel,
    pub text: String,
}

/// Presentation-facing snapshot of the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    /// Index in the question bank.
    pub index: usize,
    /// One-based position in navigation order.
    pub position: usize,
    pub total: usize,
    pub mode: QuizMode,
    pub prompt: String,
    /// Options in display order.
    pub options: Vec<OptionView>,
    /// Pending choice, or the committed answer when nothing is pending.
    pub selected: Option<OptionLabel>,
    /// Only ever present in practice mode.
    pub feedback: Option<Feedback>,
}

impl QuestionView {
    #[must_use]
    pub fn option_at(&self, slot: usize) -> Option<&OptionView> {
        self.options.get(slot)
    }

    #[must_use]
    pub fn has_option(&self, label: OptionLabel) -> bool {
        self.options.iter().any(|option| option.label == label)
    }
}
