//! Tick scheduling driven by the engine's speed
//!
//! The scheduler mirrors [`Speed`]: while a session runs it fires once per
//! interval, and when the interval changes the pending tick is dropped and
//! the next one lands a full new period later. A paused speed stops ticking
//! altogether.

use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::game::Speed;

pub struct TickScheduler {
    period: Option<Duration>,
    timer: Option<Interval>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self {
            period: None,
            timer: None,
        }
    }

    /// Current tick period, `None` while paused
    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Follow the engine's speed; returns true if the schedule changed
    ///
    /// Must be called from within a tokio runtime.
    pub fn sync(&mut self, speed: Speed) -> bool {
        let period = speed.interval();
        if period == self.period {
            return false;
        }

        self.period = period;
        self.timer = period.map(|period| {
            let mut timer = interval_at(Instant::now() + period, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            timer
        });
        true
    }

    /// Wait for the next tick; never resolves while paused
    pub async fn tick(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn millis(ms: u64) -> Speed {
        Speed::Every(Duration::from_millis(ms))
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_at_period() {
        let mut scheduler = TickScheduler::new();
        assert!(scheduler.sync(millis(100)));

        let start = Instant::now();
        scheduler.tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(100));

        scheduler.tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_speed_keeps_schedule() {
        let mut scheduler = TickScheduler::new();
        scheduler.sync(millis(100));
        let start = Instant::now();

        tokio::time::advance(Duration::from_millis(60)).await;
        assert!(!scheduler.sync(millis(100)));

        scheduler.tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_speed_change_reschedules() {
        let mut scheduler = TickScheduler::new();
        scheduler.sync(millis(100));
        let start = Instant::now();

        tokio::time::advance(Duration::from_millis(60)).await;
        assert!(scheduler.sync(millis(80)));
        assert_eq!(scheduler.period(), Some(Duration::from_millis(80)));

        scheduler.tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(140));
    }

    #[tokio::test(start_paused = true)]
    async fn test_paused_never_ticks() {
        let mut scheduler = TickScheduler::new();
        scheduler.sync(millis(100));
        assert!(scheduler.sync(Speed::Paused));
        assert_eq!(scheduler.period(), None);

        let waited =
            tokio::time::timeout(Duration::from_secs(10), scheduler.tick()).await;
        assert!(waited.is_err());
    }
}
