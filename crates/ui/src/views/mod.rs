mod controls;
mod notice;
mod quiz;
mod results;
mod settings;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use controls::QuizControls;
pub use notice::NoticeBanner;
pub use quiz::QuizView;
pub use results::ResultsPanel;
pub use settings::SettingsView;
pub use state::{Notice, NoticeKind, QuizHandle, QuizProvider, SubmitPrompt};
