use std::path::PathBuf;

use quiz_core::model::{Feedback, OptionLabel, QuizMode, Theme};
use services::{QuestionView, SessionProgress, Step};

/// Number of unanswered ordinals listed before the rest is summarised.
pub const UNANSWERED_PREVIEW: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(OptionLabel),
    Navigate(Step),
    Check,
    RequestSubmit,
    ConfirmSubmit,
    CancelSubmit,
    SwitchMode(QuizMode),
    Restart,
    CloseResults,
    LoadFile(PathBuf),
    ExportReport(PathBuf),
    SetRandomizeQuestions(bool),
    SetRandomizeOptions(bool),
    SetTheme(Theme),
    DismissNotice,
}

/// How an option button is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionTone {
    Idle,
    Selected,
    Correct,
    Wrong,
    Muted,
}

impl OptionTone {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Idle => "option",
            Self::Selected => "option option--selected",
            Self::Correct => "option option--correct",
            Self::Wrong => "option option--wrong",
            Self::Muted => "option option--muted",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub label: OptionLabel,
    /// Keyboard digit for this slot.
    pub key_hint: usize,
    pub text: String,
    pub tone: OptionTone,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub is_correct: bool,
    pub message: String,
    pub explanation: Option<String>,
}

impl FeedbackVm {
    #[must_use]
    pub fn from_feedback(feedback: &Feedback) -> Self {
        let message = if feedback.is_correct {
            "Correct!".to_string()
        } else {
            format!("Incorrect. The correct answer is {}.", feedback.correct_label)
        };
        Self {
            is_correct: feedback.is_correct,
            message,
            explanation: (!feedback.explanation.is_empty()).then(|| feedback.explanation.clone()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionCardVm {
    pub heading: String,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub feedback: Option<FeedbackVm>,
    pub mode: QuizMode,
}

impl QuestionCardVm {
    #[must_use]
    pub fn from_view(view: &QuestionView) -> Self {
        let options = view
            .options
            .iter()
            .enumerate()
            .map(|(slot, option)| OptionVm {
                label: option.label,
                key_hint: slot + 1,
                text: option.text.clone(),
                tone: option_tone(option.label, view.selected, view.feedback.as_ref()),
            })
            .collect();

        Self {
            heading: format!("Question {} of {}", view.position, view.total),
            prompt: view.prompt.clone(),
            options,
            feedback: view.feedback.as_ref().map(FeedbackVm::from_feedback),
            mode: view.mode,
        }
    }
}

#[must_use]
pub fn option_tone(
    label: OptionLabel,
    selected: Option<OptionLabel>,
    feedback: Option<&Feedback>,
) -> OptionTone {
    match feedback {
        Some(feedback) if label == feedback.correct_label => OptionTone::Correct,
        Some(feedback) if label == feedback.chosen => OptionTone::Wrong,
        Some(_) => OptionTone::Muted,
        None if selected == Some(label) => OptionTone::Selected,
        None => OptionTone::Idle,
    }
}

#[must_use]
pub fn status_text(progress: &SessionProgress) -> String {
    if progress.is_empty() {
        return "No questions loaded".to_string();
    }
    let total = progress.total;
    match progress.mode {
        QuizMode::Practice => format!(
            "Checked: {}/{total} | Answered: {}/{total}",
            progress.checked, progress.answered
        ),
        QuizMode::Exam => format!("Answered: {}/{total}", progress.answered),
    }
}

/// Confirmation text listing unanswered question numbers.
#[must_use]
pub fn unanswered_summary(ordinals: &[usize]) -> Option<String> {
    if ordinals.is_empty() {
        return None;
    }
    let listed = ordinals
        .iter()
        .take(UNANSWERED_PREVIEW)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let rest = ordinals.len().saturating_sub(UNANSWERED_PREVIEW);
    Some(if rest > 0 {
        format!("You have not answered questions {listed} and {rest} more.")
    } else {
        format!("You have not answered questions {listed}.")
    })
}

/// Map a key name (as produced by the keyboard event) to an intent.
///
/// Arrow keys navigate, `1`-`4` pick the option shown in that slot, `A`-`D` pick by
/// label and `Enter` checks in practice mode.
#[must_use]
pub fn intent_for_key(key: &str, view: &QuestionView) -> Option<QuizIntent> {
    match key {
        "ArrowLeft" => return Some(QuizIntent::Navigate(Step::Previous)),
        "ArrowRight" => return Some(QuizIntent::Navigate(Step::Next)),
        "Enter" => {
            return (view.mode == QuizMode::Practice).then_some(QuizIntent::Check);
        }
        _ => {}
    }

    if let Ok(digit) = key.parse::<usize>() {
        return digit
            .checked_sub(1)
            .and_then(|slot| view.option_at(slot))
            .map(|option| QuizIntent::Select(option.label));
    }

    OptionLabel::parse(key)
        .ok()
        .filter(|label| view.has_option(*label))
        .map(QuizIntent::Select)
}
