//! Game time and the injectable clock.
//!
//! All cooldowns and timers in the AI core compare [`Timestamp`]s read from a
//! [`Clock`] handed to the system, so tests and replays control time instead of
//! reading the wall clock.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Point in game time, in milliseconds since an arbitrary epoch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch.
    pub const ZERO: Self = Self(0);

    /// Creates a timestamp from milliseconds.
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Returns the timestamp in milliseconds.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the timestamp in seconds.
    #[must_use]
    pub fn as_secs_f32(self) -> f32 {
        (self.0 as f64 / 1000.0) as f32
    }

    /// Milliseconds elapsed since `earlier`, zero if `earlier` is in the future.
    #[must_use]
    pub const fn saturating_since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Returns this timestamp shifted forward by `ms`.
    #[must_use]
    pub const fn add_millis(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }
}

/// Source of game time.
pub trait Clock {
    /// Returns the current time.
    fn now(&self) -> Timestamp;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Monotonic wall clock anchored at construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    /// Creates a clock whose epoch is now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.start.elapsed().as_millis() as u64)
    }
}

/// Manually driven clock. Clones share the same underlying time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock starting at `start_ms`.
    #[must_use]
    pub fn new(start_ms: u64) -> Self {
        Self {
            millis: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    /// Sets the current time.
    pub fn set(&self, time: Timestamp) {
        self.millis.store(time.as_millis(), Ordering::Relaxed);
    }

    /// Advances the clock by `ms` milliseconds.
    pub fn advance(&self, ms: u64) {
        self.millis.fetch_add(ms, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.millis.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturating_since() {
        let a = Timestamp::from_millis(500);
        let b = Timestamp::from_millis(2_500);
        assert_eq!(b.saturating_since(a), 2_000);
        assert_eq!(a.saturating_since(b), 0);
    }

    #[test]
    fn test_as_secs() {
        assert!((Timestamp::from_millis(1_500).as_secs_f32() - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_manual_clock_set_and_advance() {
        let clock = ManualClock::new(0);
        clock.set(Timestamp::from_millis(100));
        clock.advance(50);
        assert_eq!(clock.now().as_millis(), 150);
    }

    #[test]
    fn test_clock_by_reference() {
        fn read<C: Clock>(clock: C) -> Timestamp {
            clock.now()
        }
        let clock = ManualClock::new(9);
        assert_eq!(read(&clock), Timestamp::from_millis(9));
    }

    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
