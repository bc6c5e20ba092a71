#![forbid(unsafe_code)]

pub mod error;
pub mod quiz_service;
pub mod session;
pub mod timer;

pub use quiz_core::Clock;

pub use error::{QuizServiceError, SessionError};
pub use quiz_service::{BankSource, QuizService};
pub use session::{
    OptionView, OrderOptions, QuestionView, QuizSession, SessionProgress, Step, TickOutcome,
    TimerToken,
};
pub use timer::{Countdown, TICK_PERIOD, run_countdown};
