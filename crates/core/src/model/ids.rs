use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal identifier of a question inside a loaded question set.
///
/// The value is the zero-based position of the record in the source file, so it is
/// stable for the lifetime of a session and meaningless across loads.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(usize);

impl QuestionId {
    /// Creates a new `QuestionId`
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the zero-based index into the question bank
    #[must_use]
    pub fn index(&self) -> usize {
        self.0
    }

    /// Returns the one-based ordinal shown to users
    #[must_use]
    pub fn ordinal(&self) -> usize {
        self.0 + 1
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
