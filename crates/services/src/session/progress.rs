use quiz_core::model::QuizMode;

/// Status-bar counts and navigation availability for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionProgress {
    pub mode: QuizMode,
    pub total: usize,
    /// One-based position in navigation order; `0` when there are no questions.
    pub position: usize,
    /// Questions with a committed answer or a pending choice.
    pub answered: usize,
    /// Questions checked in practice mode.
    pub checked: usize,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

impl SessionProgress {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
