use dioxus::prelude::*;

use crate::views::state::QuizHandle;

const SHORTCUTS: [(&str, &str); 3] = [
    ("1-4 or A-D", "Select an answer"),
    ("Left / Right", "Previous / next question"),
    ("Enter", "Check the answer (practice)"),
];

fn on_off(enabled: bool) -> &'static str {
    if enabled { "On" } else { "Off" }
}

/// Effective configuration and keyboard help.
#[component]
pub fn SettingsView() -> Element {
    let handle = use_context::<QuizHandle>();
    let (settings, bank_label) = {
        let quiz = handle.quiz.read();
        (quiz.settings().clone(), quiz.bank_label())
    };
    let minutes = settings.exam_minutes();

    rsx! {
        div { class: "page settings-page",
            h2 { "Settings" }
            p { class: "settings-page__hint",
                "Values are read from the .env file at startup. Shuffle and theme can be changed from the sidebar."
            }
            dl { class: "settings-list",
                dt { "Question bank" }
                dd { "{bank_label}" }
                dt { "Exam length" }
                dd { "{minutes} minutes" }
                dt { "Shuffle questions" }
                dd { "{on_off(settings.randomize_questions())}" }
                dt { "Shuffle answers" }
                dd { "{on_off(settings.randomize_options())}" }
                dt { "Theme" }
                dd { "{settings.theme().as_str()}" }
                dt { "Font" }
                dd { "{settings.font_family()}" }
            }

            h3 { "Keyboard shortcuts" }
            table { class: "shortcuts",
                tbody {
                    for (keys, action) in SHORTCUTS {
                        tr { key: "{keys}",
                            td { kbd { "{keys}" } }
                            td { "{action}" }
                        }
                    }
                }
            }
        }
    }
}
