use thiserror::Error;

use crate::model::option::OptionLabel;
use crate::model::question::{Question, QuestionDraft, RowIssue};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionBankError {
    #[error("{} invalid field(s) in the question set", issues.len())]
    InvalidRecords { issues: Vec<RowIssue> },
}

/// Ordered, validated question set for a session.
///
/// A bank is either fully valid or not built at all; there is no partially loaded
/// state. Replacing the bank is the caller's signal to start a new session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Validate every draft and build the bank.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError::InvalidRecords` listing every issue across all
    /// records when at least one record is invalid.
    pub fn from_drafts(
        drafts: impl IntoIterator<Item = QuestionDraft>,
    ) -> Result<Self, QuestionBankError> {
        let mut questions = Vec::new();
        let mut issues = Vec::new();

        for (index, draft) in drafts.into_iter().enumerate() {
            match draft.validate(index) {
                Ok(question) => questions.push(question),
                Err(found) => issues.extend(found),
            }
        }

        if issues.is_empty() {
            Ok(Self { questions })
        } else {
            Err(QuestionBankError::InvalidRecords { issues })
        }
    }

    /// Built-in question set used when no question file can be found.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            questions: vec![
                Question::from_parts(
                    0,
                    "No question file was found, so this is a sample question: who created Python?",
                    ["Guido van Rossum", "Dennis Ritchie", "James Gosling"],
                    Some("Bjarne Stroustrup"),
                    OptionLabel::A,
                    "Guido van Rossum released Python in 1991.",
                ),
                Question::from_parts(
                    1,
                    "Which function prints to the screen in Python?",
                    ["echo()", "print()", "printf()"],
                    None,
                    OptionLabel::B,
                    "Python uses the built-in print() function.",
                ),
            ],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::question::{FieldProblem, QuestionField};

    fn row(prompt: &str, correct: &str) -> QuestionDraft {
        QuestionDraft {
            prompt: Some(prompt.into()),
            option_a: Some("a".into()),
            option_b: Some("b".into()),
            option_c: Some("c".into()),
            option_d: None,
            correct_label: Some(correct.into()),
            explanation: Some("because".into()),
        }
    }

    #[test]
    fn valid_rows_become_questions_in_order() {
        let bank = QuestionBank::from_drafts(vec![row("first", "A"), row("second", "C")]).unwrap();

        assert_eq!(bank.len(), 2);
        assert_eq!(bank.get(0).unwrap().prompt(), "first");
        assert_eq!(bank.get(1).unwrap().correct_label(), OptionLabel::C);
        assert_eq!(bank.get(1).unwrap().id().index(), 1);
    }

    #[test]
    fn issues_from_every_row_are_collected() {
        let err = QuestionBank::from_drafts(vec![row("ok", "A"), row(" ", "Z"), row("x", "")])
            .unwrap_err();

        let QuestionBankError::InvalidRecords { issues } = err;
        assert_eq!(issues.len(), 3);
        assert_eq!((issues[0].index, issues[0].field), (1, QuestionField::Prompt));
        assert!(matches!(issues[1].problem, FieldProblem::InvalidLabel { .. }));
        assert_eq!((issues[2].index, issues[2].field), (2, QuestionField::CorrectLabel));
    }

    #[test]
    fn empty_input_builds_empty_bank() {
        let bank = QuestionBank::from_drafts(Vec::new()).unwrap();
        assert!(bank.is_empty());
    }

    #[test]
    fn sample_bank_is_valid() {
        let bank = QuestionBank::sample();
        assert_eq!(bank.len(), 2);
        for question in bank.iter() {
            assert!(!question.prompt().is_empty());
            assert!(question.options().contains(question.correct_label()));
        }
        assert_eq!(bank.get(1).unwrap().options().get(OptionLabel::D), None);
    }
}
