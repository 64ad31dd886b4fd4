//! Profiling counters for diagnostic overlays.

use serde::{Deserialize, Serialize};

/// Shallow profile of the AI tick. Not used for throttling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Wall-clock duration of the last tick in milliseconds
    pub last_update_ms: f64,
    /// Running count of bounds clamp operations
    pub collision_checks: u64,
    /// Registered enemies that are not dead
    pub active_enemies: usize,
    /// Ticks run so far
    pub total_ticks: u64,
}
