//! Scoring of a quiz session into a [`Report`].

use chrono::{DateTime, Utc};

use crate::model::{Answers, QuestionBank, QuizMode, Report, ReportEntry, Verdict};

/// Score `answers` against `bank`.
///
/// Entries follow bank order regardless of the order questions were presented in.
/// The function is pure: `now` is an argument, so identical inputs always produce an
/// identical report. The duration is only reported when `exam_started_at` is given.
#[must_use]
pub fn score(
    bank: &QuestionBank,
    answers: &Answers,
    exam_started_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Report {
    let entries: Vec<ReportEntry> = bank
        .iter()
        .map(|question| {
            let chosen = answers.get(&question.id().index()).copied();
            let verdict = match chosen {
                None => Verdict::Unanswered,
                Some(label) if question.is_correct(label) => Verdict::Correct,
                Some(_) => Verdict::Incorrect,
            };
            ReportEntry {
                ordinal: question.id().ordinal(),
                prompt: question.prompt().to_string(),
                chosen,
                correct: question.correct_label(),
                verdict,
                explanation: question.explanation().to_string(),
            }
        })
        .collect();

    let correct_count = entries
        .iter()
        .filter(|entry| entry.verdict.is_correct())
        .count();
    let total_count = entries.len();

    Report {
        mode: if exam_started_at.is_some() {
            QuizMode::Exam
        } else {
            QuizMode::Practice
        },
        completed_at: now,
        entries,
        correct_count,
        total_count,
        percentage: percentage(correct_count, total_count),
        duration: exam_started_at.map(|started| (now - started).max(chrono::Duration::zero())),
    }
}

#[allow(clippy::cast_precision_loss)]
fn percentage(correct: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * correct as f64 / total as f64
    }
}
