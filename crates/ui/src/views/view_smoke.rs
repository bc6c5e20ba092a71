use std::fs;

use quiz_core::model::{OptionLabel, QuestionBank, QuizMode, QuizSettings, Theme};
use quiz_core::time::fixed_clock;
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{BankSource, QuizService, Step};

use super::test_harness::{ViewKind, sample_service, setup_view_harness};
use crate::vm::QuizIntent;

#[test]
fn quiz_view_smoke_renders_first_question() {
    let harness = setup_view_harness(ViewKind::Quiz, sample_service());
    let html = harness.render();

    for expected in [
        "Practice mode",
        "Question 1 of 2",
        "who created Python?",
        "Guido van Rossum",
        "Bjarne Stroustrup",
        "Check answer",
        "Checked: 0/2 | Answered: 0/2",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(!html.contains("Time left"), "practice has no countdown: {html}");
}

#[test]
fn practice_check_colours_the_options() {
    let mut harness = setup_view_harness(ViewKind::Quiz, sample_service());

    harness.dispatch(QuizIntent::Select(OptionLabel::B));
    let html = harness.render();
    assert!(html.contains("option option--selected"), "missing selection in {html}");

    harness.dispatch(QuizIntent::Check);
    let html = harness.render();
    assert!(html.contains("Incorrect. The correct answer is A."), "{html}");
    assert!(html.contains("option option--wrong"), "{html}");
    assert!(html.contains("option option--correct"), "{html}");
    assert!(
        html.contains("Explanation: Guido van Rossum released Python in 1991."),
        "{html}"
    );
    assert!(html.contains("Checked: 1/2 | Answered: 1/2"), "{html}");

    harness.dispatch(QuizIntent::Navigate(Step::Next));
    let html = harness.render();
    assert!(html.contains("Question 2 of 2"), "{html}");
    assert!(!html.contains("option option--wrong"), "{html}");
}

#[test]
fn changing_choice_after_check_clears_the_colours() {
    let mut harness = setup_view_harness(ViewKind::Quiz, sample_service());
    harness.dispatch(QuizIntent::Select(OptionLabel::B));
    harness.dispatch(QuizIntent::Check);

    harness.dispatch(QuizIntent::Select(OptionLabel::C));
    let html = harness.render();

    assert!(html.contains("option option--selected"), "{html}");
    assert!(!html.contains("option option--wrong"), "{html}");
    assert!(!html.contains("Explanation:"), "{html}");
}

#[test]
fn check_without_selection_shows_notice() {
    let mut harness = setup_view_harness(ViewKind::Quiz, sample_service());

    harness.dispatch(QuizIntent::Check);
    let html = harness.render();
    assert!(html.contains("select an answer first"), "{html}");

    harness.dispatch(QuizIntent::DismissNotice);
    assert!(!harness.render().contains("select an answer first"));
}

#[test]
fn submit_asks_for_confirmation_then_shows_results() {
    let mut harness = setup_view_harness(ViewKind::Quiz, sample_service());
    harness.dispatch(QuizIntent::Select(OptionLabel::A));

    harness.dispatch(QuizIntent::RequestSubmit);
    let html = harness.render();
    assert!(html.contains("You have not answered questions 2."), "{html}");
    assert!(html.contains("Are you sure you want to submit?"), "{html}");

    harness.dispatch(QuizIntent::CancelSubmit);
    assert!(!harness.render().contains("Are you sure"));

    harness.dispatch(QuizIntent::RequestSubmit);
    harness.dispatch(QuizIntent::ConfirmSubmit);
    let html = harness.render();
    for expected in [
        "Practice results",
        "50.0%",
        "1 / 2 correct",
        "Completed: 14/11/2023 22:13:20",
        "Not answered",
        "Review missed (1)",
        "quiz_results_20231114_221320.csv",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(!html.contains("Duration:"), "{html}");

    harness.dispatch(QuizIntent::CloseResults);
    let html = harness.render();
    assert!(html.contains("Question 1 of 2"), "{html}");
    assert!(html.contains("Checked: 0/2 | Answered: 0/2"), "{html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn exam_mode_shows_countdown_and_hides_check() {
    let mut harness = setup_view_harness(ViewKind::Quiz, sample_service());

    harness.dispatch(QuizIntent::SwitchMode(QuizMode::Exam));
    let html = harness.render();

    assert!(html.contains("Exam mode"), "{html}");
    assert!(html.contains("Time left: 30:00"), "{html}");
    assert!(html.contains("Submit exam"), "{html}");
    assert!(html.contains("Answered: 0/2"), "{html}");
    assert!(!html.contains("Check answer"), "{html}");
    assert!(!html.contains("countdown--urgent"), "{html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn submitted_exam_stays_closed_until_restart() {
    let mut harness = setup_view_harness(ViewKind::Quiz, sample_service());
    harness.dispatch(QuizIntent::SwitchMode(QuizMode::Exam));
    harness.dispatch(QuizIntent::Select(OptionLabel::A));

    harness.dispatch(QuizIntent::RequestSubmit);
    harness.dispatch(QuizIntent::ConfirmSubmit);
    let html = harness.render();
    assert!(html.contains("Exam results"), "{html}");
    assert!(html.contains("Duration: 0 min 0 s"), "{html}");

    harness.dispatch(QuizIntent::CloseResults);
    let html = harness.render();
    assert!(html.contains("The exam has been submitted."), "{html}");
    assert!(!html.contains("Time left"), "{html}");

    harness.dispatch(QuizIntent::Restart);
    let html = harness.render();
    assert!(html.contains("Question 1 of 2"), "{html}");
    assert!(html.contains("Time left: 30:00"), "{html}");
}

#[test]
fn export_writes_the_report_and_confirms() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.csv");
    let mut harness = setup_view_harness(ViewKind::Quiz, sample_service());
    harness.dispatch(QuizIntent::RequestSubmit);
    harness.dispatch(QuizIntent::ConfirmSubmit);

    harness.dispatch(QuizIntent::ExportReport(path.clone()));

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("# Date: 14/11/2023 22:13:20 UTC"), "{written}");
    assert!(written.contains("# Score: 0.0%"), "{written}");
    assert!(harness.render().contains("Results saved to"));
}

#[test]
fn invalid_question_file_keeps_bank_and_lists_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    fs::write(
        &path,
        "cau_hoi,tra_loi_a,tra_loi_b,tra_loi_c,tra_loi_d,dap_an_dung,giai_thich\n,one,two,three,four,A,\n",
    )
    .unwrap();
    let mut harness = setup_view_harness(ViewKind::Quiz, sample_service());

    harness.dispatch(QuizIntent::LoadFile(path));
    let html = harness.render();

    assert!(html.contains("notice notice--error"), "{html}");
    assert!(html.contains("1 invalid cell(s) in question file"), "{html}");
    assert!(html.contains("row 2, column"), "{html}");
    assert!(html.contains("who created Python?"), "{html}");
    assert_eq!(harness.with_quiz(QuizService::bank_label), "Sample questions (2)");
}

#[test]
fn loading_a_file_replaces_the_question() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("geo.csv");
    fs::write(
        &path,
        "cau_hoi,tra_loi_a,tra_loi_b,tra_loi_c,tra_loi_d,dap_an_dung,giai_thich\nCapital of France?,Paris,Rome,Madrid,,A,\n",
    )
    .unwrap();
    let mut harness = setup_view_harness(ViewKind::Quiz, sample_service());

    harness.dispatch(QuizIntent::LoadFile(path));
    let html = harness.render();

    assert!(html.contains("Capital of France?"), "{html}");
    assert!(html.contains("Question 1 of 1"), "{html}");
    assert!(html.contains("Loaded 1 questions from"), "{html}");
}

#[test]
fn controls_reflect_and_update_settings() {
    let mut harness = setup_view_harness(ViewKind::Controls, sample_service());
    let html = harness.render();
    assert!(html.contains("Sample questions (2)"), "{html}");
    assert!(html.contains("mode-button mode-button--active"), "{html}");

    harness.dispatch(QuizIntent::SetTheme(Theme::Light));
    harness.dispatch(QuizIntent::SetRandomizeOptions(true));

    harness.with_quiz(|quiz| {
        assert_eq!(quiz.settings().theme(), Theme::Light);
        assert!(quiz.settings().randomize_options());
        assert!(!quiz.settings().randomize_questions());
    });
}

#[test]
fn settings_view_lists_effective_values() {
    let harness = setup_view_harness(ViewKind::Settings, sample_service());
    let html = harness.render();

    for expected in ["30 minutes", "Sample questions (2)", "Inter", "dark", "Off"] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
}

#[test]
fn startup_notice_is_shown_once() {
    let empty = tempfile::tempdir().unwrap();
    let quiz = QuizService::bootstrap(
        QuizSettings::default(),
        fixed_clock(),
        None,
        Some(empty.path()),
    );
    let harness = setup_view_harness(ViewKind::Controls, quiz);
    let html = harness.render();

    assert!(html.contains("using the built-in sample questions"), "{html}");
    assert!(harness.with_quiz(|quiz| quiz.source() == &BankSource::Sample));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn countdown_submits_when_time_runs_out() {
    let quiz = QuizService::new(
        QuestionBank::sample(),
        BankSource::Sample,
        QuizSettings::default()
            .with_exam_minutes(0)
            .with_randomize_questions(false)
            .with_randomize_options(false),
        fixed_clock(),
        StdRng::seed_from_u64(1),
    );
    let mut harness = setup_view_harness(ViewKind::Quiz, quiz);
    harness.dispatch(QuizIntent::SwitchMode(QuizMode::Exam));

    for _ in 0..5 {
        harness.drive_async().await;
        if harness.with_quiz(|quiz| quiz.timer_token().is_none()) {
            break;
        }
    }
    let html = harness.render();

    assert!(html.contains("Time is up. The exam was submitted automatically."), "{html}");
    assert!(html.contains("Exam results"), "{html}");
    assert!(harness.with_quiz(|quiz| quiz.timer_token().is_none()));
}
