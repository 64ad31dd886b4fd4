//! ID types for simulated actors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for enemy IDs.
static ENEMY_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Stable unique identifier for an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u64);

impl EnemyId {
    /// Allocates a new unique enemy ID.
    #[must_use]
    pub fn new() -> Self {
        Self(ENEMY_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Creates an enemy ID from a raw value (static world placement, saves).
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl Default for EnemyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "enemy#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_roundtrip() {
        let id = EnemyId::from_raw(42);
        assert_eq!(id.raw(), 42);
    }

    #[test]
    fn test_display() {
        assert_eq!(EnemyId::from_raw(7).to_string(), "enemy#7");
    }
}
