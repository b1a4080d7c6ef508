//! Fixed-rate simulation clock
//!
//! The solver always advances in ticks of the same length. Real elapsed time is
//! accumulated and converted into whole ticks, independent of how often frames
//! are drawn. If the host stalls, at most `max_catch_up_steps` ticks run for a
//! single advance and the rest of the backlog is dropped.

use std::time::Duration;

use crate::config::PhysicsConfig;

/// Converts elapsed time into a number of fixed solver steps
#[derive(Debug, Clone)]
pub struct SimulationClock {
    tick: Duration,
    accumulator: Duration,
    max_steps: u32,
    running: bool,
    total_steps: u64,
}

impl SimulationClock {
    pub fn new(config: &PhysicsConfig) -> Self {
        Self {
            tick: config.tick_duration(),
            accumulator: Duration::ZERO,
            max_steps: config.max_catch_up_steps.max(1),
            running: true,
            total_steps: 0,
        }
    }

    /// Feed elapsed time, returning how many solver steps are due now
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.running {
            return 0;
        }

        self.accumulator += elapsed;
        let mut steps = 0;
        while self.accumulator >= self.tick && steps < self.max_steps {
            self.accumulator -= self.tick;
            steps += 1;
        }

        if self.accumulator >= self.tick {
            log::debug!(
                "Clock: dropping {:.1}ms of backlog after {} steps",
                self.accumulator.as_secs_f64() * 1000.0,
                steps
            );
            self.accumulator = Duration::ZERO;
        }

        self.total_steps += steps as u64;
        steps
    }

    /// Stop producing steps; further advances return 0
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = Duration::ZERO;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> SimulationClock {
        SimulationClock::new(&PhysicsConfig {
            tick_rate_hz: 100,
            max_catch_up_steps: 5,
            ..Default::default()
        })
    }

    #[test]
    fn test_partial_ticks_accumulate() {
        let mut clock = clock();
        assert_eq!(clock.advance(Duration::from_millis(4)), 0);
        assert_eq!(clock.advance(Duration::from_millis(4)), 0);
        assert_eq!(clock.advance(Duration::from_millis(4)), 1);
        assert_eq!(clock.total_steps(), 1);
    }

    #[test]
    fn test_steps_independent_of_frame_rate() {
        let mut fast = clock();
        let mut slow = clock();

        let fast_steps: u32 = (0..20).map(|_| fast.advance(Duration::from_millis(5))).sum();
        let slow_steps: u32 = (0..4).map(|_| slow.advance(Duration::from_millis(25))).sum();

        assert_eq!(fast_steps, 10);
        assert_eq!(slow_steps, 10);
        assert_eq!(slow.advance(Duration::from_millis(25)), 2);
    }

    #[test]
    fn test_backlog_is_capped() {
        let mut clock = clock();
        assert_eq!(clock.advance(Duration::from_secs(2)), 5);
        assert_eq!(clock.advance(Duration::ZERO), 0);
    }

    #[test]
    fn test_stopped_clock_never_steps() {
        let mut clock = clock();
        clock.stop();
        assert!(!clock.is_running());
        assert_eq!(clock.advance(Duration::from_secs(1)), 0);
    }
}
