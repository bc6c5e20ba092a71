use dioxus::prelude::*;

use crate::views::state::QuizHandle;
use crate::vm::QuizIntent;

#[component]
pub fn NoticeBanner() -> Element {
    let handle = use_context::<QuizHandle>();
    let Some(notice) = handle.notice.read().clone() else {
        return rsx! {};
    };

    rsx! {
        div { class: notice.class(), role: "status",
            div { class: "notice__body",
                p { class: "notice__message", "{notice.message}" }
                if !notice.details.is_empty() {
                    ul { class: "notice__details",
                        for (idx, line) in notice.details.iter().enumerate() {
                            li { key: "{idx}", "{line}" }
                        }
                    }
                }
            }
            button {
                class: "notice__dismiss",
                r#type: "button",
                aria_label: "Dismiss",
                onclick: move |_| handle.dispatch(QuizIntent::DismissNotice),
                "×"
            }
        }
    }
}
