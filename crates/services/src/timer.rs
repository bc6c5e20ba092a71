//! Exam countdown driver.

use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};

/// Production tick period of the exam countdown.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Decision returned by a countdown callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Continue,
    Stop,
}

/// Call `on_tick` every `period` until it returns `Countdown::Stop`.
///
/// The first call happens one full period after start. Dropping or aborting the
/// future cancels the countdown.
pub async fn run_countdown<F>(period: Duration, mut on_tick: F)
where
    F: FnMut() -> Countdown,
{
    let mut ticks = interval(period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticks.tick().await;

    loop {
        ticks.tick().await;
        if on_tick() == Countdown::Stop {
            break;
        }
    }
}
