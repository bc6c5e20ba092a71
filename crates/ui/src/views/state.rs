use dioxus::prelude::*;
use dioxus::core::Task;

use quiz_core::model::Report;
use services::{
    Countdown, QuizService, QuizServiceError, TICK_PERIOD, TickOutcome, TimerToken,
    run_countdown,
};

use crate::context::AppContext;
use crate::vm::{QuizIntent, unanswered_summary};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// Dismissable message shown above the current page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub details: Vec<String>,
}

impl Notice {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
            details: Vec::new(),
        }
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
            details: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_service_error(err: &QuizServiceError) -> Self {
        let message = err.to_string();
        let details = match err {
            QuizServiceError::Load(load) => load
                .details()
                .into_iter()
                .filter(|line| *line != message)
                .collect(),
            _ => Vec::new(),
        };
        Self {
            kind: NoticeKind::Error,
            message,
            details,
        }
    }

    fn startup(mut lines: Vec<String>) -> Option<Self> {
        if lines.is_empty() {
            return None;
        }
        let message = lines.remove(0);
        Some(Self {
            kind: NoticeKind::Warning,
            message,
            details: lines,
        })
    }

    #[must_use]
    pub fn class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Info => "notice notice--info",
            NoticeKind::Warning => "notice notice--warning",
            NoticeKind::Error => "notice notice--error",
        }
    }
}

/// Pending submit confirmation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitPrompt {
    pub unanswered: usize,
    pub message: Option<String>,
}

impl SubmitPrompt {
    #[must_use]
    pub fn new(unanswered_ordinals: &[usize]) -> Self {
        Self {
            unanswered: unanswered_ordinals.len(),
            message: unanswered_summary(unanswered_ordinals),
        }
    }
}

/// Reactive quiz state shared by every view under the provider.
#[derive(Clone, Copy)]
pub struct QuizHandle {
    pub quiz: Signal<QuizService>,
    pub report: Signal<Option<Report>>,
    pub notice: Signal<Option<Notice>>,
    pub confirm: Signal<Option<SubmitPrompt>>,
    countdown: Signal<Option<(TimerToken, Task)>>,
}

impl QuizHandle {
    fn new(mut quiz: QuizService) -> Self {
        let notice = Notice::startup(quiz.take_notices());
        Self {
            quiz: Signal::new(quiz),
            report: Signal::new(None),
            notice: Signal::new(notice),
            confirm: Signal::new(None),
            countdown: Signal::new(None),
        }
    }

    /// Apply a user intent to the controller and the surrounding view state.
    pub fn dispatch(self, intent: QuizIntent) {
        let Self {
            mut quiz,
            mut report,
            mut notice,
            mut confirm,
            ..
        } = self;

        match intent {
            QuizIntent::Select(label) => {
                let result = quiz.write().select_option(label);
                if let Err(err) = result {
                    notice.set(Some(Notice::warning(err.to_string())));
                }
            }
            QuizIntent::Navigate(step) => {
                quiz.write().navigate(step);
            }
            QuizIntent::Check => {
                let result = quiz.write().check_answer();
                if let Err(err) = result {
                    notice.set(Some(Notice::warning(err.to_string())));
                }
            }
            QuizIntent::RequestSubmit => {
                let ordinals = quiz.read().unanswered_ordinals();
                confirm.set(Some(SubmitPrompt::new(&ordinals)));
            }
            QuizIntent::ConfirmSubmit => {
                confirm.set(None);
                let result = quiz.write().submit();
                match result {
                    Ok(submitted) => report.set(Some(submitted)),
                    Err(err) => notice.set(Some(Notice::warning(err.to_string()))),
                }
            }
            QuizIntent::CancelSubmit => confirm.set(None),
            QuizIntent::SwitchMode(mode) => {
                let changed = quiz.write().switch_mode(mode);
                if changed {
                    report.set(None);
                    confirm.set(None);
                }
            }
            QuizIntent::Restart => {
                quiz.write().restart();
                report.set(None);
                confirm.set(None);
            }
            QuizIntent::CloseResults => report.set(None),
            QuizIntent::LoadFile(path) => {
                let result = quiz.write().load_file(&path);
                match result {
                    Ok(count) => {
                        report.set(None);
                        confirm.set(None);
                        notice.set(Some(Notice::info(format!(
                            "Loaded {count} questions from {}.",
                            path.display()
                        ))));
                    }
                    Err(err) => notice.set(Some(Notice::from_service_error(&err))),
                }
            }
            QuizIntent::ExportReport(path) => {
                let current = report.read().clone();
                let Some(current) = current else {
                    return;
                };
                let result = quiz.read().export_report(&current, &path);
                match result {
                    Ok(()) => notice.set(Some(Notice::info(format!(
                        "Results saved to {}.",
                        path.display()
                    )))),
                    Err(err) => notice.set(Some(Notice::from_service_error(&err))),
                }
            }
            QuizIntent::SetRandomizeQuestions(enabled) => {
                quiz.write().set_randomize_questions(enabled);
            }
            QuizIntent::SetRandomizeOptions(enabled) => {
                quiz.write().set_randomize_options(enabled);
            }
            QuizIntent::SetTheme(theme) => quiz.write().set_theme(theme),
            QuizIntent::DismissNotice => notice.set(None),
        }
    }

    /// Keep exactly one countdown task alive for the armed timer token.
    fn sync_countdown(self) {
        let token = self.quiz.read().timer_token();
        let mut countdown = self.countdown;
        let armed = countdown.peek().as_ref().map(|(armed, _)| *armed);
        if armed == token {
            return;
        }

        if let Some((_, task)) = countdown.write().take() {
            task.cancel();
        }
        if let Some(token) = token {
            let task = spawn(drive_countdown(self, token));
            countdown.set(Some((token, task)));
        }
    }
}

async fn drive_countdown(handle: QuizHandle, token: TimerToken) {
    let QuizHandle {
        mut quiz,
        mut report,
        mut notice,
        mut confirm,
        ..
    } = handle;

    run_countdown(TICK_PERIOD, move || {
        let outcome = quiz.write().tick(token);
        match outcome {
            TickOutcome::Running { .. } => Countdown::Continue,
            TickOutcome::Expired(submitted) => {
                confirm.set(None);
                report.set(Some(submitted));
                notice.set(Some(Notice::warning(
                    "Time is up. The exam was submitted automatically.",
                )));
                Countdown::Stop
            }
            TickOutcome::Stopped => Countdown::Stop,
        }
    })
    .await;
}

/// Owns the quiz state for its children and drives the exam countdown.
#[component]
pub fn QuizProvider(children: Element) -> Element {
    let ctx = use_context::<AppContext>();
    let handle = use_context_provider(|| QuizHandle::new(ctx.quiz_service()));
    use_effect(move || handle.sync_countdown());

    rsx! {
        {children}
    }
}
