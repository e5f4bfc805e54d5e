use super::{classify, Buckets};
use crate::models::Snapshot;
use chrono::{Duration, NaiveDateTime};
use std::time::Instant;

/// Keeps the buckets in step with the latest snapshot and the passing of time.
///
/// Classification runs as soon as a new snapshot arrives and again on every
/// tick, so records move from active to expired even when no new data does.
#[derive(Debug)]
pub struct Refresher {
    snapshot: Snapshot,
    buckets: Buckets,
    recent_window: Duration,
    interval: std::time::Duration,
    last_tick: Option<Instant>,
}

impl Refresher {
    pub fn new(recent_window: Duration, interval: std::time::Duration) -> Self {
        Self {
            snapshot: Snapshot::new(),
            buckets: Buckets::default(),
            recent_window,
            interval,
            last_tick: None,
        }
    }

    pub fn buckets(&self) -> &Buckets {
        &self.buckets
    }

    /// Replace the snapshot and reclassify immediately
    pub fn set_snapshot(&mut self, snapshot: Snapshot, now: NaiveDateTime) {
        self.snapshot = snapshot;
        self.reclassify(now);
    }

    /// Reclassify the current snapshot against a new "now"
    pub fn tick(&mut self, now: NaiveDateTime) {
        self.reclassify(now);
    }

    /// Whether the refresh interval has elapsed.
    ///
    /// The first call only arms the timer.
    pub fn is_due(&mut self, at: Instant) -> bool {
        match self.last_tick {
            Some(last) => at.duration_since(last) >= self.interval,
            None => {
                self.last_tick = Some(at);
                false
            }
        }
    }

    /// Restart the interval from `at`
    pub fn reset_timer(&mut self, at: Instant) {
        self.last_tick = Some(at);
    }

    /// Drop the expired bucket locally after a clear; the next tick rebuilds it
    /// from whatever the snapshot says
    pub fn clear_expired_locally(&mut self) {
        self.buckets.expired.clear();
    }

    fn reclassify(&mut self, now: NaiveDateTime) {
        self.buckets = classify(&self.snapshot, now, self.recent_window);
        tracing::debug!(
            "Reclassified: {} active, {} expired",
            self.buckets.active.len(),
            self.buckets.expired.len()
        );
    }
}
