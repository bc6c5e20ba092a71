use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("option label must be one of A, B, C or D (got {raw:?})")]
pub struct OptionLabelError {
    pub raw: String,
}

/// Label of a multiple-choice option.
///
/// `A`, `B` and `C` are always present on a valid question; `D` is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 4] = [Self::A, Self::B, Self::C, Self::D];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }

    /// Parses a label, ignoring surrounding whitespace and letter case.
    ///
    /// # Errors
    ///
    /// Returns `OptionLabelError` for anything other than a single A-D letter.
    pub fn parse(raw: &str) -> Result<Self, OptionLabelError> {
        match raw.trim() {
            "A" | "a" => Ok(Self::A),
            "B" | "b" => Ok(Self::B),
            "C" | "c" => Ok(Self::C),
            "D" | "d" => Ok(Self::D),
            _ => Err(OptionLabelError {
                raw: raw.to_string(),
            }),
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
