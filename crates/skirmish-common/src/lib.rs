//! # Skirmish Common
//!
//! Common types and utilities shared by the Skirmish crates.
//!
//! This crate provides:
//! - ID types (EnemyId)
//! - Time types and the injectable clock (Timestamp, Clock)
//! - 2D vector helpers over `glam::Vec2`
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod ids;
pub mod math;
pub mod time;

pub use glam::Vec2;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::ids::*;
    pub use crate::math::*;
    pub use crate::time::*;
    pub use glam::Vec2;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_id_generation() {
        let id1 = EnemyId::new();
        let id2 = EnemyId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new(1_000);
        let handle = clock.clone();

        handle.advance(250);
        assert_eq!(clock.now(), Timestamp::from_millis(1_250));
    }

    #[test]
    fn test_direction_is_finite_at_same_point() {
        let p = Vec2::new(10.0, 10.0);
        let dir = direction(p, p);
        assert_eq!(dir, Vec2::ZERO);
    }
}
