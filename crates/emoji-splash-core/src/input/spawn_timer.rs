//! Fixed-interval repeating timer for held-pointer spawning
//!
//! Missed intervals are not replayed in bulk: at most `max_ticks` fire for one
//! advance and any remaining backlog is dropped.

use std::time::Duration;

/// Repeating timer driven by elapsed time
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    interval: Duration,
    elapsed: Duration,
    max_ticks: u32,
    active: bool,
}

impl SpawnTimer {
    pub fn new(interval: Duration, max_ticks: u32) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
            max_ticks: max_ticks.max(1),
            active: false,
        }
    }

    /// (Re)start the timer; the first tick fires one full interval from now
    pub fn start(&mut self) {
        self.elapsed = Duration::ZERO;
        self.active = true;
    }

    /// Cancel the timer; pending time is discarded
    pub fn cancel(&mut self) {
        self.elapsed = Duration::ZERO;
        self.active = false;
    }

    /// Feed elapsed time and return how many ticks fired
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if !self.active || self.interval.is_zero() {
            return 0;
        }

        self.elapsed += dt;
        let mut ticks = 0;
        while self.elapsed >= self.interval && ticks < self.max_ticks {
            self.elapsed -= self.interval;
            ticks += 1;
        }

        if self.elapsed >= self.interval {
            log::debug!(
                "Spawn timer: dropping {:.1}ms of backlog after {} ticks",
                self.elapsed.as_secs_f64() * 1000.0,
                ticks
            );
            self.elapsed = Duration::ZERO;
        }
        ticks
    }
}
