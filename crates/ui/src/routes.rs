use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{NoticeBanner, QuizControls, QuizHandle, QuizProvider, QuizView, SettingsView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", QuizView)] Quiz {},
        #[route("/settings", SettingsView)] Settings {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        QuizProvider {
            Shell {}
        }
    }
}

#[component]
fn Shell() -> Element {
    let handle = use_context::<QuizHandle>();
    let (theme, font) = {
        let quiz = handle.quiz.read();
        let settings = quiz.settings();
        (settings.theme().as_str(), settings.font_family().to_string())
    };

    rsx! {
        div { class: "app theme-{theme}", style: "font-family: {font}",
            Sidebar {}
            main { class: "content",
                NoticeBanner {}
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Quiz" }
            ul {
                li { Link { to: Route::Quiz {}, "Questions" } }
                li { Link { to: Route::Settings {}, "Settings" } }
            }
            QuizControls {}
        }
    }
}
