//! Cycle scheduling
//!
//! The poll loop waits on a [`Ticker`] between cycles instead of sleeping
//! directly, so tests can drive it without a wall clock.

use std::ops::ControlFlow;
use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

#[allow(async_fn_in_trait)]
pub trait Ticker {
    /// Wait for the next cycle. `Break` ends the poll loop.
    async fn tick(&mut self) -> ControlFlow<()>;
}

/// Fixed-period ticker; the first tick is one full period away
#[derive(Debug)]
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }
}

impl Ticker for IntervalTicker {
    async fn tick(&mut self) -> ControlFlow<()> {
        self.interval.tick().await;
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_tick_waits_a_full_period() {
        let start = Instant::now();
        let mut ticker = IntervalTicker::new(Duration::from_secs(3600));
        assert_eq!(ticker.period(), Duration::from_secs(3600));

        assert_eq!(ticker.tick().await, ControlFlow::Continue(()));
        assert!(start.elapsed() >= Duration::from_secs(3600));

        assert_eq!(ticker.tick().await, ControlFlow::Continue(()));
        assert!(start.elapsed() >= Duration::from_secs(7200));
    }
}
