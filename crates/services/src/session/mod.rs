mod order;
mod progress;
mod state;
mod view;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use order::OrderOptions;
pub use progress::SessionProgress;
pub use state::{QuizSession, Step, TickOutcome, TimerToken};
pub use view::{OptionView, QuestionView};
