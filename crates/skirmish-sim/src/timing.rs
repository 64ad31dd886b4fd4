//! Fixed timestep accumulator.
//!
//! Converts variable frame times into a whole number of fixed AI ticks.

/// Fixed-step accumulator with spiral-of-death protection.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// Fixed tick length in milliseconds
    step_ms: u64,
    /// Unconsumed time
    accumulator: u64,
    /// Maximum ticks returned per frame
    max_steps: u32,
}

impl FixedTimestep {
    /// Creates an accumulator for `step_ms` ticks.
    #[must_use]
    pub fn new(step_ms: u64) -> Self {
        Self {
            step_ms: step_ms.max(1),
            accumulator: 0,
            max_steps: 10,
        }
    }

    /// Sets the cap on ticks per frame.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Returns the fixed tick length.
    #[must_use]
    pub fn step_ms(&self) -> u64 {
        self.step_ms
    }

    /// Adds `frame_ms` of elapsed time. Returns the number of ticks to run.
    pub fn accumulate(&mut self, frame_ms: u64) -> u32 {
        self.accumulator += frame_ms;
        let mut count = 0;

        while self.accumulator >= self.step_ms && count < self.max_steps {
            self.accumulator -= self.step_ms;
            count += 1;
        }

        // Still behind after the cap: drop the backlog
        if self.accumulator > self.step_ms * 2 {
            self.accumulator = 0;
        }

        count
    }

    /// Unconsumed time in milliseconds.
    #[must_use]
    pub fn pending_ms(&self) -> u64 {
        self.accumulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_steps() {
        let mut timestep = FixedTimestep::new(16);
        assert_eq!(timestep.accumulate(32), 2);
        assert_eq!(timestep.pending_ms(), 0);
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut timestep = FixedTimestep::new(16);
        assert_eq!(timestep.accumulate(20), 1);
        assert_eq!(timestep.pending_ms(), 4);
        assert_eq!(timestep.accumulate(12), 1);
        assert_eq!(timestep.pending_ms(), 0);
    }

    #[test]
    fn test_spiral_prevention() {
        let mut timestep = FixedTimestep::new(16).with_max_steps(10);
        assert_eq!(timestep.accumulate(1000), 10);
        assert_eq!(timestep.pending_ms(), 0);
    }
}
