use std::path::PathBuf;

use dioxus::prelude::*;

use quiz_core::model::Report;

use crate::vm::{QuizIntent, ResultRowVm, map_results};

/// Score summary shown after a submission, with review and export actions.
#[component]
pub fn ResultsPanel(
    report: Report,
    suggested_name: String,
    on_intent: Callback<QuizIntent>,
) -> Element {
    let vm = map_results(&report);
    let mut show_missed = use_signal(|| false);
    let mut export_path = use_signal(|| suggested_name);
    let missed_count = vm.missed.len();
    let rows = if show_missed() {
        vm.missed.clone()
    } else {
        vm.rows.clone()
    };

    let on_export = move |_: MouseEvent| {
        let path = export_path.read().trim().to_string();
        if !path.is_empty() {
            on_intent.call(QuizIntent::ExportReport(PathBuf::from(path)));
        }
    };

    rsx! {
        section { class: "results",
            h2 { "{vm.title}" }
            div { class: vm.grade_class,
                span { class: "results__score", "{vm.score_label}" }
                span { class: "results__correct", "{vm.correct_label}" }
            }
            p { class: "results__meta", "Completed: {vm.completed_label}" }
            if let Some(duration) = vm.duration_label.clone() {
                p { class: "results__meta", "Duration: {duration}" }
            }

            div { class: "results__filters",
                button {
                    class: "btn btn-secondary",
                    id: "results-toggle-missed",
                    r#type: "button",
                    disabled: missed_count == 0,
                    onclick: move |_| show_missed.toggle(),
                    if show_missed() {
                        "Show all questions"
                    } else {
                        "Review missed ({missed_count})"
                    }
                }
            }

            ResultsTable { rows }

            div { class: "results__export",
                label { r#for: "results-export-path", "Save results as" }
                input {
                    id: "results-export-path",
                    r#type: "text",
                    value: "{export_path}",
                    oninput: move |evt| export_path.set(evt.value()),
                }
                button {
                    class: "btn",
                    id: "results-export",
                    r#type: "button",
                    onclick: on_export,
                    "Export CSV"
                }
            }

            div { class: "results__actions",
                button {
                    class: "btn btn-primary",
                    id: "results-restart",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Restart),
                    "New attempt"
                }
                button {
                    class: "btn btn-secondary",
                    id: "results-close",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::CloseResults),
                    "Close"
                }
            }
        }
    }
}

#[component]
fn ResultsTable(rows: Vec<ResultRowVm>) -> Element {
    if rows.is_empty() {
        return rsx! {
            p { class: "results__empty", "Nothing to review." }
        };
    }

    rsx! {
        table { class: "results__table",
            thead {
                tr {
                    th { "#" }
                    th { "Question" }
                    th { "Your answer" }
                    th { "Correct answer" }
                    th { "Result" }
                }
            }
            tbody {
                for row in rows {
                    tr { key: "{row.ordinal}",
                        td { "{row.ordinal}" }
                        td {
                            p { "{row.prompt}" }
                            if !row.explanation.is_empty() {
                                p { class: "results__explanation", "{row.explanation}" }
                            }
                        }
                        td { "{row.chosen}" }
                        td { "{row.correct}" }
                        td { class: row.verdict_class, "{row.verdict}" }
                    }
                }
            }
        }
    }
}
