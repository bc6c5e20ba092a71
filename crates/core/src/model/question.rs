use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::option::OptionLabel;

//
// ─── FIELDS & ISSUES ───────────────────────────────────────────────────────────
//

/// A field of a question record, used to locate validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionField {
    Prompt,
    OptionA,
    OptionB,
    OptionC,
    OptionD,
    CorrectLabel,
    Explanation,
}

impl QuestionField {
    #[must_use]
    pub const fn option(label: OptionLabel) -> Self {
        match label {
            OptionLabel::A => Self::OptionA,
            OptionLabel::B => Self::OptionB,
            OptionLabel::C => Self::OptionC,
            OptionLabel::D => Self::OptionD,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prompt => "prompt",
            Self::OptionA => "option A",
            Self::OptionB => "option B",
            Self::OptionC => "option C",
            Self::OptionD => "option D",
            Self::CorrectLabel => "correct label",
            Self::Explanation => "explanation",
        }
    }
}

impl fmt::Display for QuestionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldProblem {
    #[error("must not be blank")]
    Blank,

    #[error("must be one of A, B, C or D (got {value:?})")]
    InvalidLabel { value: String },

    #[error("references option {label}, which is empty")]
    LabelNotPopulated { label: OptionLabel },
}

/// One violation found while validating a question record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("record {index}, {field}: {problem}")]
pub struct RowIssue {
    /// Zero-based position of the record in the source.
    pub index: usize,
    pub field: QuestionField,
    pub problem: FieldProblem,
}

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Unvalidated question record as read from an external source.
///
/// Every field is optional so that readers can hand over whatever they found and
/// let validation report all problems at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub prompt: Option<String>,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub option_c: Option<String>,
    pub option_d: Option<String>,
    pub correct_label: Option<String>,
    pub explanation: Option<String>,
}

impl QuestionDraft {
    /// Validate the draft as the record at `index`.
    ///
    /// # Errors
    ///
    /// Returns every `RowIssue` found in this record, not just the first one.
    pub fn validate(self, index: usize) -> Result<Question, Vec<RowIssue>> {
        let mut issues = Vec::new();
        let mut require = |value: Option<String>, field: QuestionField| {
            let value = normalize_optional(value);
            if value.is_none() {
                issues.push(RowIssue {
                    index,
                    field,
                    problem: FieldProblem::Blank,
                });
            }
            value
        };

        let prompt = require(self.prompt, QuestionField::Prompt);
        let a = require(self.option_a, QuestionField::OptionA);
        let b = require(self.option_b, QuestionField::OptionB);
        let c = require(self.option_c, QuestionField::OptionC);
        let raw_label = require(self.correct_label, QuestionField::CorrectLabel);
        let d = normalize_optional(self.option_d);

        let correct = raw_label.and_then(|raw| match OptionLabel::parse(&raw) {
            Ok(OptionLabel::D) if d.is_none() => {
                issues.push(RowIssue {
                    index,
                    field: QuestionField::CorrectLabel,
                    problem: FieldProblem::LabelNotPopulated {
                        label: OptionLabel::D,
                    },
                });
                None
            }
            Ok(label) => Some(label),
            Err(_) => {
                issues.push(RowIssue {
                    index,
                    field: QuestionField::CorrectLabel,
                    problem: FieldProblem::InvalidLabel { value: raw },
                });
                None
            }
        });

        let (Some(prompt), Some(a), Some(b), Some(c), Some(correct)) = (prompt, a, b, c, correct)
        else {
            return Err(issues);
        };

        Ok(Question {
            id: QuestionId::new(index),
            prompt,
            options: QuestionOptions { a, b, c, d },
            correct,
            explanation: normalize_optional(self.explanation).unwrap_or_default(),
        })
    }
}

/// Option texts of a question. `d` is `None` when the fourth option is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOptions {
    a: String,
    b: String,
    c: String,
    d: Option<String>,
}

impl QuestionOptions {
    #[must_use]
    pub fn get(&self, label: OptionLabel) -> Option<&str> {
        match label {
            OptionLabel::A => Some(&self.a),
            OptionLabel::B => Some(&self.b),
            OptionLabel::C => Some(&self.c),
            OptionLabel::D => self.d.as_deref(),
        }
    }

    #[must_use]
    pub fn contains(&self, label: OptionLabel) -> bool {
        self.get(label).is_some()
    }

    /// Populated labels in canonical order.
    #[must_use]
    pub fn labels(&self) -> Vec<OptionLabel> {
        OptionLabel::ALL
            .into_iter()
            .filter(|label| self.contains(*label))
            .collect()
    }
}

/// A validated multiple-choice question. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: QuestionOptions,
    correct: OptionLabel,
    explanation: String,
}

impl Question {
    /// Build a question from literals known to be valid (built-in sample data).
    pub(crate) fn from_parts(
        index: usize,
        prompt: &str,
        options: [&str; 3],
        option_d: Option<&str>,
        correct: OptionLabel,
        explanation: &str,
    ) -> Self {
        let [a, b, c] = options;
        Self {
            id: QuestionId::new(index),
            prompt: prompt.to_string(),
            options: QuestionOptions {
                a: a.to_string(),
                b: b.to_string(),
                c: c.to_string(),
                d: option_d.map(str::to_string),
            },
            correct,
            explanation: explanation.to_string(),
        }
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &QuestionOptions {
        &self.options
    }

    #[must_use]
    pub fn correct_label(&self) -> OptionLabel {
        self.correct
    }

    /// Explanation text; empty when the source had none.
    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn is_correct(&self, label: OptionLabel) -> bool {
        self.correct == label
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(correct: &str, d: Option<&str>) -> QuestionDraft {
        QuestionDraft {
            prompt: Some("  What is 2 + 2?  ".into()),
            option_a: Some("3".into()),
            option_b: Some("4".into()),
            option_c: Some("5".into()),
            option_d: d.map(Into::into),
            correct_label: Some(correct.into()),
            explanation: None,
        }
    }

    #[test]
    fn valid_draft_trims_and_keeps_d_absent() {
        let question = draft("B", Some("   ")).validate(3).unwrap();

        assert_eq!(question.id(), QuestionId::new(3));
        assert_eq!(question.prompt(), "What is 2 + 2?");
        assert_eq!(question.options().get(OptionLabel::D), None);
        assert_eq!(question.options().labels().len(), 3);
        assert_eq!(question.correct_label(), OptionLabel::B);
        assert_eq!(question.explanation(), "");
    }

    #[test]
    fn all_blank_fields_are_reported_together() {
        let issues = QuestionDraft::default().validate(0).unwrap_err();
        let fields: Vec<_> = issues.iter().map(|issue| issue.field).collect();

        assert_eq!(
            fields,
            vec![
                QuestionField::Prompt,
                QuestionField::OptionA,
                QuestionField::OptionB,
                QuestionField::OptionC,
                QuestionField::CorrectLabel,
            ]
        );
        assert!(issues.iter().all(|issue| issue.problem == FieldProblem::Blank));
    }

    #[test]
    fn invalid_label_is_reported() {
        let issues = draft("E", None).validate(1).unwrap_err();

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, QuestionField::CorrectLabel);
        assert!(matches!(issues[0].problem, FieldProblem::InvalidLabel { .. }));
    }

    #[test]
    fn label_d_requires_option_d() {
        let issues = draft("D", None).validate(1).unwrap_err();
        assert_eq!(
            issues[0].problem,
            FieldProblem::LabelNotPopulated {
                label: OptionLabel::D
            }
        );

        let question = draft("d", Some("6")).validate(1).unwrap();
        assert_eq!(question.correct_label(), OptionLabel::D);
        assert_eq!(question.options().labels(), OptionLabel::ALL.to_vec());
    }
}
