use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Duration;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use quiz_core::Clock;
use quiz_core::model::{
    Feedback, OptionLabel, QuestionBank, QuizMode, QuizSettings, Report, Theme,
};
use storage::{LoadError, default_report_file_name, discover_question_file, load_questions};

use crate::error::{QuizServiceError, SessionError};
use crate::session::{
    OrderOptions, QuestionView, QuizSession, SessionProgress, Step, TickOutcome, TimerToken,
};

/// Where the current question bank came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankSource {
    File(PathBuf),
    Sample,
}

/// Controller that owns the active session together with its clock, settings and
/// random source. The presentation layer issues commands here and renders the
/// snapshots it returns.
#[derive(Debug, Clone)]
pub struct QuizService {
    clock: Clock,
    settings: QuizSettings,
    source: BankSource,
    session: QuizSession,
    rng: StdRng,
    notices: Vec<String>,
}

impl QuizService {
    /// Start a practice session over `bank`.
    #[must_use]
    pub fn new(
        bank: QuestionBank,
        source: BankSource,
        settings: QuizSettings,
        clock: Clock,
        mut rng: StdRng,
    ) -> Self {
        let session = QuizSession::new(
            Arc::new(bank),
            &settings,
            QuizMode::Practice,
            clock.now(),
            &mut rng,
        );
        Self {
            clock,
            settings,
            source,
            session,
            rng,
            notices: Vec::new(),
        }
    }

    /// Resolve the question bank at startup and start a practice session.
    ///
    /// Tries `explicit` first, then a file discovered in `search_dir`, then falls back
    /// to the built-in sample set. Never fails; problems are kept as notices for the
    /// user (see [`QuizService::take_notices`]).
    #[must_use]
    pub fn bootstrap(
        settings: QuizSettings,
        clock: Clock,
        explicit: Option<&Path>,
        search_dir: Option<&Path>,
    ) -> Self {
        let mut notices = Vec::new();

        let mut loaded = explicit.and_then(|path| try_load(path, &mut notices));
        if loaded.is_none() {
            loaded = search_dir
                .and_then(discover_question_file)
                .and_then(|path| try_load(&path, &mut notices));
        }

        let (bank, source) = loaded.unwrap_or_else(|| {
            info!("no question file available, using sample questions");
            notices.push("No question file found; using the built-in sample questions.".into());
            (QuestionBank::sample(), BankSource::Sample)
        });

        let mut service = Self::new(
            bank,
            source,
            settings,
            clock,
            StdRng::seed_from_u64(rand::random()),
        );
        service.notices = notices;
        service
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Mutable clock access, for advancing a fixed clock.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    #[must_use]
    pub fn source(&self) -> &BankSource {
        &self.source
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.session.mode()
    }

    /// Drain messages collected during startup.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    /// Short description of the loaded bank for the status panel.
    #[must_use]
    pub fn bank_label(&self) -> String {
        let count = self.session.bank().len();
        match &self.source {
            BankSource::File(path) => {
                let name = path.file_name().map_or_else(
                    || path.display().to_string(),
                    |name| name.to_string_lossy().into_owned(),
                );
                format!("{name} ({count} questions)")
            }
            BankSource::Sample => format!("Sample questions ({count})"),
        }
    }

    /// Replace the question bank with the contents of `path` and start a new session
    /// in the current mode. On error the current bank and session are untouched.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Load` when the file cannot be loaded.
    pub fn load_file(&mut self, path: &Path) -> Result<usize, QuizServiceError> {
        let bank = load_questions(path)?;
        let count = bank.len();
        self.session = QuizSession::new(
            Arc::new(bank),
            &self.settings,
            self.session.mode(),
            self.clock.now(),
            &mut self.rng,
        );
        self.source = BankSource::File(path.to_path_buf());
        info!(path = %path.display(), questions = count, "replaced question bank");
        Ok(count)
    }

    pub fn switch_mode(&mut self, mode: QuizMode) -> bool {
        let now = self.clock.now();
        self.session.switch_mode(mode, now, &mut self.rng)
    }

    /// # Errors
    ///
    /// See [`QuizSession::select_option`].
    pub fn select_option(&mut self, label: OptionLabel) -> Result<(), SessionError> {
        self.session.select_option(label)
    }

    pub fn navigate(&mut self, step: Step) -> bool {
        self.session.navigate(step)
    }

    /// # Errors
    ///
    /// See [`QuizSession::check_answer`].
    pub fn check_answer(&mut self) -> Result<Option<Feedback>, SessionError> {
        self.session.check_answer()
    }

    /// # Errors
    ///
    /// See [`QuizSession::submit`].
    pub fn submit(&mut self) -> Result<Report, SessionError> {
        let now = self.clock.now();
        self.session.submit(now, &mut self.rng)
    }

    pub fn restart(&mut self) -> Option<TimerToken> {
        let now = self.clock.now();
        self.session.restart(now, &mut self.rng)
    }

    pub fn tick(&mut self, token: TimerToken) -> TickOutcome {
        let now = self.clock.now();
        self.session.tick(token, now, &mut self.rng)
    }

    #[must_use]
    pub fn timer_token(&self) -> Option<TimerToken> {
        self.session.timer_token()
    }

    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.session.remaining(self.clock.now())
    }

    #[must_use]
    pub fn current_view(&self) -> Option<QuestionView> {
        self.session.current_view()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        self.session.progress()
    }

    #[must_use]
    pub fn count_unanswered(&self) -> usize {
        self.session.count_unanswered()
    }

    #[must_use]
    pub fn unanswered_ordinals(&self) -> Vec<usize> {
        self.session.unanswered_ordinals()
    }

    /// Takes effect from the next order regeneration.
    pub fn set_randomize_questions(&mut self, enabled: bool) {
        self.settings = self.settings.clone().with_randomize_questions(enabled);
        self.sync_order_options();
    }

    /// Takes effect from the next order regeneration.
    pub fn set_randomize_options(&mut self, enabled: bool) {
        self.settings = self.settings.clone().with_randomize_options(enabled);
        self.sync_order_options();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.settings = self.settings.clone().with_theme(theme);
    }

    /// Write `report` to `path`.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Export` when the file cannot be written.
    pub fn export_report(&self, report: &Report, path: &Path) -> Result<(), QuizServiceError> {
        storage::export_report(report, path)?;
        Ok(())
    }

    /// Suggested report file name for the current time.
    #[must_use]
    pub fn suggested_report_file_name(&self) -> String {
        default_report_file_name(self.clock.now())
    }

    fn sync_order_options(&mut self) {
        self.session.set_order_options(OrderOptions {
            randomize_questions: self.settings.randomize_questions(),
            randomize_options: self.settings.randomize_options(),
        });
    }
}

fn try_load(path: &Path, notices: &mut Vec<String>) -> Option<(QuestionBank, BankSource)> {
    match load_questions(path) {
        Ok(bank) => Some((bank, BankSource::File(path.to_path_buf()))),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not load question file");
            notices.push(format!("Could not load {}: {err}", path.display()));
            if matches!(err, LoadError::InvalidRows { .. }) {
                notices.extend(err.details());
            }
            None
        }
    }
}
