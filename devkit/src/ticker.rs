/*!
Tickers for driving the poll loop in tests
*/

use clientstatus_core::Ticker;
use std::ops::ControlFlow;

/// Lets the loop continue `remaining` times, then stops it
#[derive(Debug)]
pub struct CountdownTicker {
    remaining: u64,
    ticks: u64,
}

impl CountdownTicker {
    pub fn new(continues: u64) -> Self {
        Self {
            remaining: continues,
            ticks: 0,
        }
    }

    /// Ticker that lets exactly `cycles` cycles run
    pub fn cycles(cycles: u64) -> Self {
        Self::new(cycles.saturating_sub(1))
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Ticker for CountdownTicker {
    async fn tick(&mut self) -> ControlFlow<()> {
        self.ticks += 1;
        tokio::task::yield_now().await;
        if self.remaining == 0 {
            return ControlFlow::Break(());
        }
        self.remaining -= 1;
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_countdown_breaks_after_budget() {
        let mut ticker = CountdownTicker::cycles(3);
        assert_eq!(ticker.tick().await, ControlFlow::Continue(()));
        assert_eq!(ticker.tick().await, ControlFlow::Continue(()));
        assert_eq!(ticker.tick().await, ControlFlow::Break(()));
        assert_eq!(ticker.ticks(), 3);
    }
}
