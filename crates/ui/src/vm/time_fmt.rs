use chrono::{DateTime, Duration, Utc};
use quiz_core::time::{format_countdown, format_elapsed};

/// Minutes left below which the countdown is shown as urgent.
pub const URGENT_MINUTES: i64 = 5;

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%d/%m/%Y %H:%M:%S").to_string()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountdownVm {
    pub text: String,
    pub urgent: bool,
}

#[must_use]
pub fn countdown_vm(remaining: Duration) -> CountdownVm {
    CountdownVm {
        text: format!("Time left: {}", format_countdown(remaining)),
        urgent: remaining < Duration::minutes(URGENT_MINUTES),
    }
}

#[must_use]
pub fn duration_label(elapsed: Duration) -> String {
    format_elapsed(elapsed)
}
