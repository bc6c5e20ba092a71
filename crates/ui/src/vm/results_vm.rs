use quiz_core::model::{GradeBand, QuizMode, Report, ReportEntry, Verdict};

use super::time_fmt::{duration_label, format_datetime};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultRowVm {
    pub ordinal: usize,
    pub prompt: String,
    pub chosen: String,
    pub correct: String,
    pub verdict: &'static str,
    pub verdict_class: &'static str,
    pub explanation: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultsVm {
    pub title: &'static str,
    pub score_label: String,
    pub correct_label: String,
    pub completed_label: String,
    pub duration_label: Option<String>,
    pub grade_class: &'static str,
    pub rows: Vec<ResultRowVm>,
    pub missed: Vec<ResultRowVm>,
}

#[must_use]
pub fn map_results(report: &Report) -> ResultsVm {
    ResultsVm {
        title: match report.mode {
            QuizMode::Exam => "Exam results",
            QuizMode::Practice => "Practice results",
        },
        score_label: format!("{:.1}%", report.percentage),
        correct_label: format!(
            "{} / {} correct",
            report.correct_count, report.total_count
        ),
        completed_label: format_datetime(report.completed_at),
        duration_label: report.duration.map(duration_label),
        grade_class: match report.grade_band() {
            GradeBand::Strong => "grade grade--strong",
            GradeBand::Fair => "grade grade--fair",
            GradeBand::Weak => "grade grade--weak",
        },
        rows: report.entries.iter().map(map_row).collect(),
        missed: report.missed().into_iter().map(map_row).collect(),
    }
}

fn map_row(entry: &ReportEntry) -> ResultRowVm {
    let (verdict, verdict_class) = match entry.verdict {
        Verdict::Correct => ("Correct", "verdict verdict--correct"),
        Verdict::Incorrect => ("Incorrect", "verdict verdict--wrong"),
        Verdict::Unanswered => ("Unanswered", "verdict verdict--skipped"),
    };
    ResultRowVm {
        ordinal: entry.ordinal,
        prompt: entry.prompt.clone(),
        chosen: entry
            .chosen
            .map_or_else(|| "Not answered".to_string(), |label| label.to_string()),
        correct: entry.correct.to_string(),
        verdict,
        verdict_class,
        explanation: entry.explanation.clone(),
    }
}
