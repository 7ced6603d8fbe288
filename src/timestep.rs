//! Fixed-timestep accumulation for the host loop.
//!
//! The host measures wall-clock time between frames and asks how many
//! simulation ticks to run. Long gaps are clamped so a stall never turns
//! into a burst of catch-up ticks that would teleport the snake.

use std::time::Duration;

use tracing::debug;

use crate::constants::timestep::MAX_TICKS_PER_UPDATE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTimestep {
    step: Duration,
    accumulator: Duration,
    max_ticks: u32,
}

impl FixedTimestep {
    pub fn new(step: Duration) -> Self {
        Self::with_max_ticks(step, MAX_TICKS_PER_UPDATE)
    }

    /// `max_ticks` bounds the ticks a single update can produce; it is at least one.
    pub fn with_max_ticks(step: Duration, max_ticks: u32) -> Self {
        Self {
            step,
            accumulator: Duration::ZERO,
            max_ticks: max_ticks.max(1),
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Adds `elapsed` wall-clock time and returns how many ticks are due.
    ///
    /// The fractional remainder carries into the next update.
    pub fn accumulate(&mut self, elapsed: Duration) -> u32 {
        if self.step.is_zero() {
            return 0;
        }

        let limit = self.step * self.max_ticks;
        let elapsed = if self.accumulator + elapsed > limit {
            debug!(elapsed = ?elapsed, limit = ?limit, "Clamping long frame gap");
            limit.saturating_sub(self.accumulator)
        } else {
            elapsed
        };
        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_ticks {
            self.accumulator -= self.step;
            ticks += 1;
        }
        ticks
    }

    /// Progress toward the next tick in `[0, 1)`, for render interpolation.
    pub fn alpha(&self) -> f32 {
        if self.step.is_zero() {
            return 0.0;
        }
        (self.accumulator.as_secs_f64() / self.step.as_secs_f64()) as f32
    }

    /// Time left until the next tick is due.
    pub fn until_next(&self) -> Duration {
        self.step.saturating_sub(self.accumulator)
    }

    /// Drops any accumulated remainder, e.g. after the host resumes from a pause.
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}
