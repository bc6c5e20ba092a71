mod quiz_vm;
mod results_vm;
mod time_fmt;

pub use quiz_vm::{
    FeedbackVm, OptionTone, OptionVm, QuestionCardVm, QuizIntent, UNANSWERED_PREVIEW,
    intent_for_key, option_tone, status_text, unanswered_summary,
};
pub use results_vm::{ResultRowVm, ResultsVm, map_results};
pub use time_fmt::{CountdownVm, URGENT_MINUTES, countdown_vm, duration_label, format_datetime};
