mod bank;
mod ids;
mod option;
mod question;
mod report;
mod session;
mod settings;

pub use bank::{QuestionBank, QuestionBankError};
pub use ids::QuestionId;
pub use option::{OptionLabel, OptionLabelError};
pub use question::{FieldProblem, Question, QuestionDraft, QuestionField, QuestionOptions, RowIssue};
pub use report::{GradeBand, Report, ReportEntry, Verdict};
pub use session::{Answers, Feedback, QuizMode};
pub use settings::{QuizSettings, SettingsError, Theme, parse_flag, parse_minutes};
