use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::{debug, info};

use quiz_core::model::{
    Answers, Feedback, OptionLabel, Question, QuestionBank, QuizMode, QuizSettings,
    Report,
};
use quiz_core::score;

use super::order::{OrderOptions, SessionOrder};
use super::progress::SessionProgress;
use super::view::{OptionView, QuestionView};
use crate::error::SessionError;

//
// ─── TIMER TYPES ───────────────────────────────────────────────────────────────
//

/// Navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Previous,
    Next,
}

/// Identifies one armed exam countdown.
///
/// Each arm issues a new token; leaving exam mode or submitting invalidates it, so a
/// tick carrying an old token can never submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// Result of a countdown tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Countdown still running.
    Running { remaining: Duration },
    /// Time ran out; the session was submitted and this is the result.
    Expired(Report),
    /// No countdown is armed for this token. The driver should stop.
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ExamClock {
    started_at: DateTime<Utc>,
    deadline: DateTime<Utc>,
    token: TimerToken,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Quiz session over one question bank.
///
/// Holds the navigation order, the pending choice for the current position, committed
/// answers, practice feedback and the exam countdown. All mutation goes through the
/// methods below; time and randomness are passed in by the caller.
#[derive(Debug, Clone)]
pub struct QuizSession {
    bank: Arc<QuestionBank>,
    mode: QuizMode,
    exam_duration: Duration,
    order_options: OrderOptions,
    order: SessionOrder,
    position: usize,
    answers: Answers,
    pending: Option<OptionLabel>,
    feedback: BTreeMap<usize, Feedback>,
    exam: Option<ExamClock>,
    generation: u64,
    submitted: bool,
}

impl QuizSession {
    /// Start a session in `mode`. Exam mode arms the countdown at `now`.
    pub fn new<R: Rng + ?Sized>(
        bank: Arc<QuestionBank>,
        settings: &QuizSettings,
        mode: QuizMode,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Self {
        let order_options = OrderOptions {
            randomize_questions: settings.randomize_questions(),
            randomize_options: settings.randomize_options(),
        };
        let mut session = Self {
            order: SessionOrder::default(),
            bank,
            mode,
            exam_duration: settings.exam_duration(),
            order_options,
            position: 0,
            answers: Answers::new(),
            pending: None,
            feedback: BTreeMap::new(),
            exam: None,
            generation: 0,
            submitted: false,
        };
        session.regenerate(rng);
        if mode == QuizMode::Exam {
            session.arm_exam(now);
        }
        session
    }

    #[must_use]
    pub fn bank(&self) -> &Arc<QuestionBank> {
        &self.bank
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    #[must_use]
    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    #[must_use]
    pub fn pending(&self) -> Option<OptionLabel> {
        self.pending
    }

    #[must_use]
    pub fn feedback(&self, index: usize) -> Option<&Feedback> {
        self.feedback.get(&index)
    }

    /// Bank indices in navigation order.
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order.questions
    }

    #[must_use]
    pub fn order_options(&self) -> OrderOptions {
        self.order_options
    }

    /// Zero-based position in navigation order.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bank index of the question at the current position.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.order.questions.get(self.position).copied()
    }

    /// Token of the armed countdown, if any.
    #[must_use]
    pub fn timer_token(&self) -> Option<TimerToken> {
        self.exam.map(|exam| exam.token)
    }

    #[must_use]
    pub fn exam_started_at(&self) -> Option<DateTime<Utc>> {
        self.exam.map(|exam| exam.started_at)
    }

    /// True after an exam submission until `restart` or a mode switch.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.submitted
    }

    /// Time left on the exam countdown, clamped at zero.
    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.exam
            .map(|exam| (exam.deadline - now).max(Duration::zero()))
    }

    /// Switch to `target`, resetting answers, feedback, position and order.
    ///
    /// Returns `false` and changes nothing when already in `target`.
    pub fn switch_mode<R: Rng + ?Sized>(
        &mut self,
        target: QuizMode,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> bool {
        if target == self.mode {
            return false;
        }

        self.disarm_exam();
        self.mode = target;
        self.regenerate(rng);
        if target == QuizMode::Exam {
            self.arm_exam(now);
        }
        info!(mode = %target, questions = self.bank.len(), "switched quiz mode");
        true
    }

    /// Begin a new attempt in the current mode, re-arming the exam countdown.
    pub fn restart<R: Rng + ?Sized>(&mut self, now: DateTime<Utc>, rng: &mut R) -> Option<TimerToken> {
        self.disarm_exam();
        self.regenerate(rng);
        info!(mode = %self.mode, "restarted quiz");
        if self.mode == QuizMode::Exam {
            Some(self.arm_exam(now))
        } else {
            None
        }
    }

    /// Update randomization switches. They apply from the next order regeneration.
    pub fn set_order_options(&mut self, options: OrderOptions) {
        self.order_options = options;
    }

    /// Record `label` as the pending choice for the current position.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when there is no current question,
    /// `SessionError::OptionUnavailable` when the question has no such option and
    /// `SessionError::Finished` after an exam submission.
    pub fn select_option(&mut self, label: OptionLabel) -> Result<(), SessionError> {
        self.ensure_open()?;
        let index = self.current_index().ok_or(SessionError::Empty)?;
        let question = self.bank.get(index).ok_or(SessionError::Empty)?;
        if !question.options().contains(label) {
            return Err(SessionError::OptionUnavailable { label });
        }
        self.pending = Some(label);
        Ok(())
    }

    /// Commit the pending choice, then move one step. Does not wrap.
    ///
    /// Returns whether the position changed.
    pub fn navigate(&mut self, step: Step) -> bool {
        if self.current_index().is_none() {
            return false;
        }
        self.commit_pending();

        let target = match step {
            Step::Previous => self.position.checked_sub(1),
            Step::Next => Some(self.position + 1).filter(|next| *next < self.order.len()),
        };
        match target {
            Some(position) => {
                self.position = position;
                true
            }
            None => false,
        }
    }

    /// Commit and check the choice for the current question.
    ///
    /// Returns the feedback in practice mode and `None` in exam mode, where
    /// feedback is never recorded.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoSelection` when nothing is chosen for the current
    /// question, `SessionError::Empty` without questions and `SessionError::Finished`
    /// after an exam submission.
    pub fn check_answer(&mut self) -> Result<Option<Feedback>, SessionError> {
        self.ensure_open()?;
        let index = self.current_index().ok_or(SessionError::Empty)?;
        let chosen = self
            .pending
            .or_else(|| self.answers.get(&index).copied())
            .ok_or(SessionError::NoSelection)?;
        self.commit_pending();

        if self.mode == QuizMode::Exam {
            return Ok(None);
        }

        let question = self.bank.get(index).ok_or(SessionError::Empty)?;
        let feedback = Feedback {
            chosen,
            correct_label: question.correct_label(),
            is_correct: question.is_correct(chosen),
            explanation: question.explanation().to_string(),
        };
        debug!(index, chosen = %chosen, correct = feedback.is_correct, "checked answer");
        self.feedback.insert(index, feedback.clone());
        Ok(Some(feedback))
    }

    /// Commit any pending choice, score the session and reset it.
    ///
    /// The countdown is stopped. In exam mode the session then stays finished until
    /// `restart` or a mode switch.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` when the exam was already submitted.
    pub fn submit<R: Rng + ?Sized>(
        &mut self,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Report, SessionError> {
        self.ensure_open()?;
        self.commit_pending();

        let report = score(&self.bank, &self.answers, self.exam_started_at(), now);
        self.disarm_exam();
        self.regenerate(rng);
        self.submitted = self.mode == QuizMode::Exam;
        info!(
            mode = %self.mode,
            correct = report.correct_count,
            total = report.total_count,
            "submitted quiz"
        );
        Ok(report)
    }

    /// Advance the countdown identified by `token`.
    ///
    /// Once the deadline has passed the session is submitted exactly once; every later
    /// tick, and any tick for a replaced countdown, returns `TickOutcome::Stopped`.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        token: TimerToken,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> TickOutcome {
        let Some(exam) = self.exam else {
            return TickOutcome::Stopped;
        };
        if exam.token != token {
            return TickOutcome::Stopped;
        }

        let remaining = exam.deadline - now;
        if remaining > Duration::zero() {
            return TickOutcome::Running { remaining };
        }

        info!("exam time is up, submitting");
        match self.submit(now, rng) {
            Ok(report) => TickOutcome::Expired(report),
            Err(_) => TickOutcome::Stopped,
        }
    }

    /// Questions without a committed answer or pending choice.
    #[must_use]
    pub fn count_unanswered(&self) -> usize {
        self.bank.len().saturating_sub(self.answered_count())
    }

    /// One-based bank ordinals of unanswered questions, ascending.
    #[must_use]
    pub fn unanswered_ordinals(&self) -> Vec<usize> {
        self.bank
            .iter()
            .map(Question::id)
            .filter(|id| !self.is_answered(id.index()))
            .map(|id| id.ordinal())
            .collect()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.order.len();
        SessionProgress {
            mode: self.mode,
            total,
            position: if total == 0 { 0 } else { self.position + 1 },
            answered: self.answered_count(),
            checked: self.feedback.len(),
            can_go_previous: total > 0 && self.position > 0,
            can_go_next: self.position + 1 < total,
        }
    }

    /// Snapshot of the current question for rendering.
    #[must_use]
    pub fn current_view(&self) -> Option<QuestionView> {
        let index = self.current_index()?;
        let question = self.bank.get(index)?;
        let labels = self
            .order
            .options
            .get(index)
            .cloned()
            .unwrap_or_else(|| question.options().labels());

        let options = labels
            .into_iter()
            .filter_map(|label| {
                question.options().get(label).map(|text| OptionView {
                    label,
                    text: text.to_string(),
                })
            })
            .collect();

        let selected = self.pending.or_else(|| self.answers.get(&index).copied());
        Some(QuestionView {
            index,
            position: self.position + 1,
            total: self.order.len(),
            mode: self.mode,
            prompt: question.prompt().to_string(),
            options,
            selected,
            // Feedback only describes the choice it was checked against.
            feedback: match self.mode {
                QuizMode::Practice => self
                    .feedback
                    .get(&index)
                    .filter(|feedback| selected == Some(feedback.chosen))
                    .cloned(),
                QuizMode::Exam => None,
            },
        })
    }

    fn ensure_open(&self) -> Result<(), SessionError> {
        if self.submitted {
            Err(SessionError::Finished)
        } else {
            Ok(())
        }
    }

    fn is_answered(&self, index: usize) -> bool {
        self.answers.contains_key(&index)
            || (self.pending.is_some() && self.current_index() == Some(index))
    }

    fn answered_count(&self) -> usize {
        let pending_new = match (self.pending, self.current_index()) {
            (Some(_), Some(index)) => usize::from(!self.answers.contains_key(&index)),
            _ => 0,
        };
        self.answers.len() + pending_new
    }

    fn commit_pending(&mut self) {
        if let Some(index) = self.current_index() {
            if let Some(label) = self.pending.take() {
                self.answers.insert(index, label);
            }
        }
    }

    fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.order = SessionOrder::build(&self.bank, self.order_options, rng);
        self.position = 0;
        self.answers.clear();
        self.pending = None;
        self.feedback.clear();
        self.submitted = false;
    }

    fn arm_exam(&mut self, now: DateTime<Utc>) -> TimerToken {
        self.generation += 1;
        let token = TimerToken(self.generation);
        self.exam = Some(ExamClock {
            started_at: now,
            deadline: now + self.exam_duration,
            token,
        });
        debug!(deadline = %(now + self.exam_duration), "armed exam countdown");
        token
    }

    fn disarm_exam(&mut self) {
        if self.exam.take().is_some() {
            self.generation += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionDraft;
    use quiz_core::time::fixed_now;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fixed_settings() -> QuizSettings {
        QuizSettings::default()
            .with_randomize_questions(false)
            .with_randomize_options(false)
    }

    fn bank(correct: &[&str]) -> Arc<QuestionBank> {
        let drafts = correct.iter().enumerate().map(|(i, label)| QuestionDraft {
            prompt: Some(format!("Q{i}")),
            option_a: Some("a".into()),
            option_b: Some("b".into()),
            option_c: Some("c".into()),
            option_d: Some("d".into()),
            correct_label: Some((*label).to_string()),
            explanation: Some(format!("because {label}")),
        });
        Arc::new(QuestionBank::from_drafts(drafts).unwrap())
    }

    fn practice(correct: &[&str]) -> (QuizSession, StdRng) {
        let mut rng = StdRng::seed_from_u64(11);
        let session = QuizSession::new(
            bank(correct),
            &fixed_settings(),
            QuizMode::Practice,
            fixed_now(),
            &mut rng,
        );
        (session, rng)
    }

    #[test]
    fn select_is_pending_until_navigation() {
        let (mut session, _) = practice(&["A", "B"]);
        session.select_option(OptionLabel::C).unwrap();
        assert!(session.answers().is_empty());
        assert_eq!(session.count_unanswered(), 1);

        assert!(session.navigate(Step::Next));
        assert_eq!(session.answers().get(&0), Some(&OptionLabel::C));
        assert_eq!(session.pending(), None);
    }

    #[test]
    fn navigation_commits_even_at_boundary() {
        let (mut session, _) = practice(&["A"]);
        session.select_option(OptionLabel::B).unwrap();
        assert!(!session.navigate(Step::Next));
        assert!(!session.navigate(Step::Previous));
        assert_eq!(session.answers().get(&0), Some(&OptionLabel::B));
    }

    #[test]
    fn check_without_selection_leaves_feedback_unset() {
        let (mut session, _) = practice(&["A", "B"]);
        assert_eq!(session.check_answer(), Err(SessionError::NoSelection));
        assert!(session.feedback(0).is_none());
        assert_eq!(session.progress().checked, 0);
    }

    #[test]
    fn check_in_practice_records_feedback() {
        let (mut session, _) = practice(&["A", "B"]);
        session.select_option(OptionLabel::B).unwrap();

        let feedback = session.check_answer().unwrap().unwrap();

        assert!(!feedback.is_correct);
        assert_eq!(feedback.correct_label, OptionLabel::A);
        assert_eq!(feedback.explanation, "because A");
        assert_eq!(session.answers().get(&0), Some(&OptionLabel::B));
        assert_eq!(session.current_view().unwrap().feedback, Some(feedback));
    }

    #[test]
    fn new_choice_after_check_hides_old_feedback() {
        let (mut session, _) = practice(&["A", "B"]);
        session.select_option(OptionLabel::B).unwrap();
        session.check_answer().unwrap();

        session.select_option(OptionLabel::C).unwrap();
        let view = session.current_view().unwrap();
        assert_eq!(view.selected, Some(OptionLabel::C));
        assert_eq!(view.feedback, None);
        assert_eq!(session.progress().checked, 1);

        session.select_option(OptionLabel::B).unwrap();
        let view = session.current_view().unwrap();
        assert_eq!(view.feedback.map(|feedback| feedback.chosen), Some(OptionLabel::B));
    }

    #[test]
    fn check_in_exam_records_nothing() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut session = QuizSession::new(
            bank(&["A"]),
            &fixed_settings(),
            QuizMode::Exam,
            fixed_now(),
            &mut rng,
        );
        session.select_option(OptionLabel::A).unwrap();

        assert_eq!(session.check_answer(), Ok(None));
        assert!(session.feedback(0).is_none());
        assert_eq!(session.answers().len(), 1);
    }

    #[test]
    fn unavailable_option_is_rejected() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut session = QuizSession::new(
            Arc::new(QuestionBank::sample()),
            &fixed_settings(),
            QuizMode::Practice,
            fixed_now(),
            &mut rng,
        );
        session.navigate(Step::Next);

        assert_eq!(
            session.select_option(OptionLabel::D),
            Err(SessionError::OptionUnavailable {
                label: OptionLabel::D
            })
        );
    }

    #[test]
    fn switching_to_same_mode_keeps_state() {
        let (mut session, mut rng) = practice(&["A", "B"]);
        session.select_option(OptionLabel::A).unwrap();
        session.navigate(Step::Next);

        assert!(!session.switch_mode(QuizMode::Practice, fixed_now(), &mut rng));
        assert_eq!(session.position(), 1);
        assert_eq!(session.answers().len(), 1);
    }

    #[test]
    fn switching_mode_resets_and_arms_exam() {
        let (mut session, mut rng) = practice(&["A", "B"]);
        session.select_option(OptionLabel::A).unwrap();
        session.check_answer().unwrap();
        session.navigate(Step::Next);

        assert!(session.switch_mode(QuizMode::Exam, fixed_now(), &mut rng));

        assert_eq!(session.position(), 0);
        assert!(session.answers().is_empty());
        assert_eq!(session.progress().checked, 0);
        assert!(session.timer_token().is_some());
        assert_eq!(
            session.remaining(fixed_now()),
            Some(Duration::minutes(30))
        );

        assert!(session.switch_mode(QuizMode::Practice, fixed_now(), &mut rng));
        assert!(session.timer_token().is_none());
        assert_eq!(session.remaining(fixed_now()), None);
    }

    #[test]
    fn stale_token_never_submits() {
        let (mut session, mut rng) = practice(&["A"]);
        session.switch_mode(QuizMode::Exam, fixed_now(), &mut rng);
        let old = session.timer_token().unwrap();
        session.switch_mode(QuizMode::Practice, fixed_now(), &mut rng);
        session.switch_mode(QuizMode::Exam, fixed_now(), &mut rng);

        let late = fixed_now() + Duration::hours(2);
        assert_eq!(session.tick(old, late, &mut rng), TickOutcome::Stopped);
        assert!(session.timer_token().is_some());
    }

    #[test]
    fn tick_reports_remaining_then_expires_once() {
        let (mut session, mut rng) = practice(&["A", "B"]);
        session.switch_mode(QuizMode::Exam, fixed_now(), &mut rng);
        let token = session.timer_token().unwrap();
        session.select_option(OptionLabel::A).unwrap();

        let outcome = session.tick(token, fixed_now() + Duration::minutes(29), &mut rng);
        assert_eq!(
            outcome,
            TickOutcome::Running {
                remaining: Duration::minutes(1)
            }
        );

        let end = fixed_now() + Duration::minutes(30);
        let TickOutcome::Expired(report) = session.tick(token, end, &mut rng) else {
            panic!("expected expiry");
        };
        assert_eq!(report.mode, QuizMode::Exam);
        assert_eq!(report.correct_count, 1);
        assert_eq!(report.duration, Some(Duration::minutes(30)));

        assert_eq!(session.tick(token, end, &mut rng), TickOutcome::Stopped);
        assert!(session.is_finished());
        assert_eq!(session.submit(end, &mut rng), Err(SessionError::Finished));
    }

    #[test]
    fn restart_rearms_after_exam_submission() {
        let (mut session, mut rng) = practice(&["A"]);
        session.switch_mode(QuizMode::Exam, fixed_now(), &mut rng);
        session.submit(fixed_now(), &mut rng).unwrap();
        assert!(session.timer_token().is_none());

        let later = fixed_now() + Duration::minutes(5);
        let token = session.restart(later, &mut rng).unwrap();

        assert!(!session.is_finished());
        assert_eq!(session.timer_token(), Some(token));
        assert_eq!(session.exam_started_at(), Some(later));
    }

    #[test]
    fn practice_submit_resets_and_stays_open() {
        let (mut session, mut rng) = practice(&["A", "B"]);
        session.select_option(OptionLabel::A).unwrap();

        let report = session.submit(fixed_now(), &mut rng).unwrap();

        assert_eq!(report.mode, QuizMode::Practice);
        assert_eq!(report.duration, None);
        assert_eq!(report.correct_count, 1);
        assert!(!session.is_finished());
        assert!(session.answers().is_empty());
        assert!(session.select_option(OptionLabel::B).is_ok());
    }

    #[test]
    fn unanswered_ordinals_follow_bank_order() {
        let (mut session, _) = practice(&["A", "B", "C"]);
        session.select_option(OptionLabel::A).unwrap();
        session.navigate(Step::Next);
        session.navigate(Step::Next);
        session.select_option(OptionLabel::C).unwrap();

        assert_eq!(session.unanswered_ordinals(), vec![2]);
        assert_eq!(session.count_unanswered(), 1);
    }

    #[test]
    fn empty_bank_is_inert() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = QuizSession::new(
            Arc::new(QuestionBank::default()),
            &QuizSettings::default(),
            QuizMode::Practice,
            fixed_now(),
            &mut rng,
        );

        assert!(!session.navigate(Step::Next));
        assert_eq!(session.position(), 0);
        assert!(session.current_view().is_none());
        assert_eq!(session.select_option(OptionLabel::A), Err(SessionError::Empty));
        assert_eq!(session.check_answer(), Err(SessionError::Empty));
        let progress = session.progress();
        assert_eq!(progress.position, 0);
        assert!(!progress.can_go_next && !progress.can_go_previous);
        let report = session.submit(fixed_now(), &mut rng).unwrap();
        assert!(report.percentage.abs() < f64::EPSILON);
    }

    #[test]
    fn option_order_shuffle_keeps_labels() {
        let mut rng = StdRng::seed_from_u64(99);
        let settings = QuizSettings::default().with_randomize_questions(false);
        let session = QuizSession::new(
            bank(&["B"]),
            &settings,
            QuizMode::Practice,
            fixed_now(),
            &mut rng,
        );

        let view = session.current_view().unwrap();
        let mut labels: Vec<_> = view.options.iter().map(|option| option.label).collect();
        for option in &view.options {
            assert_eq!(option.text, option.label.as_str().to_ascii_lowercase());
        }
        labels.sort();
        assert_eq!(labels, OptionLabel::ALL.to_vec());
    }
}
