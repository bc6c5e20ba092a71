use std::path::PathBuf;

use dioxus::prelude::*;

use quiz_core::model::{QuizMode, Theme};

use crate::views::state::QuizHandle;
use crate::vm::QuizIntent;

/// Sidebar controls: mode, question file, shuffling and theme.
#[component]
pub fn QuizControls() -> Element {
    let handle = use_context::<QuizHandle>();
    let dispatch = use_callback(move |intent: QuizIntent| handle.dispatch(intent));
    let mut file_path = use_signal(String::new);

    let (mode, bank_label, randomize_questions, randomize_options, theme) = {
        let quiz = handle.quiz.read();
        let settings = quiz.settings();
        (
            quiz.mode(),
            quiz.bank_label(),
            settings.randomize_questions(),
            settings.randomize_options(),
            settings.theme(),
        )
    };

    let on_load = move |_: MouseEvent| {
        let path = file_path.read().trim().to_string();
        if !path.is_empty() {
            dispatch.call(QuizIntent::LoadFile(PathBuf::from(path)));
        }
    };

    rsx! {
        div { class: "controls",
            div { class: "controls__group", role: "group", aria_label: "Mode",
                for target in [QuizMode::Practice, QuizMode::Exam] {
                    button {
                        key: "{target}",
                        class: if target == mode { "mode-button mode-button--active" } else { "mode-button" },
                        r#type: "button",
                        aria_pressed: target == mode,
                        onclick: move |_| dispatch.call(QuizIntent::SwitchMode(target)),
                        "{target.label()}"
                    }
                }
            }

            p { class: "controls__bank", "{bank_label}" }

            div { class: "controls__group",
                label { r#for: "controls-file", "Question file" }
                input {
                    id: "controls-file",
                    r#type: "text",
                    placeholder: "path/to/questions.xlsx",
                    value: "{file_path}",
                    oninput: move |evt| file_path.set(evt.value()),
                }
                button {
                    class: "btn",
                    id: "controls-load",
                    r#type: "button",
                    onclick: on_load,
                    "Load"
                }
            }

            div { class: "controls__group",
                Toggle {
                    label: "Shuffle questions",
                    checked: randomize_questions,
                    on_change: move |enabled: bool| dispatch.call(QuizIntent::SetRandomizeQuestions(enabled)),
                }
                Toggle {
                    label: "Shuffle answers",
                    checked: randomize_options,
                    on_change: move |enabled: bool| dispatch.call(QuizIntent::SetRandomizeOptions(enabled)),
                }
                Toggle {
                    label: "Light theme",
                    checked: theme == Theme::Light,
                    on_change: move |light: bool| {
                        let theme = if light { Theme::Light } else { Theme::Dark };
                        dispatch.call(QuizIntent::SetTheme(theme));
                    },
                }
            }
        }
    }
}

#[component]
fn Toggle(label: &'static str, checked: bool, on_change: Callback<bool>) -> Element {
    rsx! {
        div { class: "toggle-row",
            span { "{label}" }
            button {
                class: "settings-toggle",
                r#type: "button",
                role: "switch",
                aria_checked: "{checked}",
                aria_label: label,
                onclick: move |_| on_change.call(!checked),
            }
        }
    }
}
