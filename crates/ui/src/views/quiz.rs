use dioxus::prelude::*;

use quiz_core::model::QuizMode;
use services::{SessionProgress, Step};

use crate::views::results::ResultsPanel;
use crate::views::state::{QuizHandle, SubmitPrompt};
use crate::vm::{QuestionCardVm, QuizIntent, countdown_vm, intent_for_key, status_text};

#[component]
pub fn QuizView() -> Element {
    let handle = use_context::<QuizHandle>();
    let dispatch = use_callback(move |intent: QuizIntent| handle.dispatch(intent));

    let (view, progress, countdown, finished, mode, suggested_name) = {
        let quiz = handle.quiz.read();
        (
            quiz.current_view(),
            quiz.progress(),
            quiz.remaining().map(countdown_vm),
            quiz.session().is_finished(),
            quiz.mode(),
            quiz.suggested_report_file_name(),
        )
    };
    let report = handle.report.read().clone();
    let confirm = handle.confirm.read().clone();
    let status = status_text(&progress);

    let on_key = use_callback(move |evt: KeyboardEvent| {
        if handle.report.peek().is_some() || handle.confirm.peek().is_some() {
            return;
        }
        let Some(view) = handle.quiz.peek().current_view() else {
            return;
        };
        let key = evt.data.key().to_string();
        if let Some(intent) = intent_for_key(&key, &view) {
            evt.prevent_default();
            dispatch.call(intent);
        }
    });

    rsx! {
        div { class: "page quiz-page", id: "quiz-root", tabindex: "0", onkeydown: on_key,
            header { class: "quiz-header",
                h2 { "{mode.label()} mode" }
                if let Some(countdown) = countdown {
                    span {
                        class: if countdown.urgent { "countdown countdown--urgent" } else { "countdown" },
                        "{countdown.text}"
                    }
                }
            }

            if let Some(report) = report {
                ResultsPanel { report, suggested_name, on_intent: dispatch }
            } else if finished {
                section { class: "quiz-finished",
                    p { "The exam has been submitted." }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| dispatch.call(QuizIntent::Restart),
                        "Start a new attempt"
                    }
                }
            } else if let Some(view) = view {
                QuestionCard { card: QuestionCardVm::from_view(&view), on_intent: dispatch }
                QuizFooter { progress, on_intent: dispatch }
            } else {
                p { class: "quiz-empty", "No questions loaded. Load a question file from the sidebar." }
            }

            p { class: "status-bar", "{status}" }

            if let Some(prompt) = confirm {
                SubmitDialog { prompt, on_intent: dispatch }
            }
        }
    }
}

#[component]
fn QuestionCard(card: QuestionCardVm, on_intent: Callback<QuizIntent>) -> Element {
    rsx! {
        section { class: "question-card",
            p { class: "question-card__heading", "{card.heading}" }
            h3 { class: "question-card__prompt", "{card.prompt}" }
            div { class: "options",
                for option in card.options.iter().cloned() {
                    button {
                        key: "{option.label}",
                        class: option.tone.class(),
                        r#type: "button",
                        title: "Press {option.key_hint} or {option.label}",
                        onclick: move |_| on_intent.call(QuizIntent::Select(option.label)),
                        span { class: "option__label", "{option.label}." }
                        span { class: "option__text", "{option.text}" }
                    }
                }
            }
            if let Some(feedback) = card.feedback.clone() {
                div {
                    class: if feedback.is_correct { "feedback feedback--correct" } else { "feedback feedback--wrong" },
                    p { class: "feedback__verdict", "{feedback.message}" }
                    if let Some(explanation) = feedback.explanation {
                        p { class: "feedback__explanation", "Explanation: {explanation}" }
                    }
                }
            }
        }
    }
}

#[component]
fn QuizFooter(progress: SessionProgress, on_intent: Callback<QuizIntent>) -> Element {
    let practice = progress.mode == QuizMode::Practice;
    let submit_label = if practice { "Finish" } else { "Submit exam" };

    rsx! {
        footer { class: "quiz-footer",
            button {
                class: "btn btn-secondary",
                id: "quiz-prev",
                r#type: "button",
                disabled: !progress.can_go_previous,
                onclick: move |_| on_intent.call(QuizIntent::Navigate(Step::Previous)),
                "Previous"
            }
            if practice {
                button {
                    class: "btn",
                    id: "quiz-check",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Check),
                    "Check answer"
                }
            }
            button {
                class: "btn btn-primary",
                id: "quiz-submit",
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::RequestSubmit),
                "{submit_label}"
            }
            button {
                class: "btn btn-secondary",
                id: "quiz-next",
                r#type: "button",
                disabled: !progress.can_go_next,
                onclick: move |_| on_intent.call(QuizIntent::Navigate(Step::Next)),
                "Next"
            }
        }
    }
}

#[component]
fn SubmitDialog(prompt: SubmitPrompt, on_intent: Callback<QuizIntent>) -> Element {
    rsx! {
        div { class: "dialog-overlay",
            div { class: "dialog", role: "dialog", aria_modal: "true",
                h3 { "Submit answers?" }
                if let Some(message) = prompt.message.clone() {
                    p { class: "dialog__warning", "{message}" }
                }
                p { "Are you sure you want to submit?" }
                div { class: "dialog__actions",
                    button {
                        class: "btn btn-secondary",
                        id: "submit-cancel",
                        r#type: "button",
                        onclick: move |_| on_intent.call(QuizIntent::CancelSubmit),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        id: "submit-confirm",
                        r#type: "button",
                        onclick: move |_| on_intent.call(QuizIntent::ConfirmSubmit),
                        "Submit"
                    }
                }
            }
        }
    }
}
