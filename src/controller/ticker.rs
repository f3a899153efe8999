//! Periodic progress updates while a track is playing

use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Interval that only exists while playback is running.
///
/// Must be started from within a tokio runtime.
#[derive(Debug)]
pub struct ProgressTicker {
    period: Duration,
    interval: Option<Interval>,
}

impl ProgressTicker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// Start ticking one period from now. No-op if already running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.interval = Some(interval);
        tracing::trace!(period_ms = self.period.as_millis() as u64, "Progress ticker started");
    }

    pub fn stop(&mut self) {
        if self.interval.take().is_some() {
            tracing::trace!("Progress ticker stopped");
        }
    }

    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
