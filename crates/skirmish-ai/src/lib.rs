//! # Skirmish AI
//!
//! Enemy AI simulation core.
//!
//! This crate drives every hostile actor through a fixed-tick update:
//! - Enemy snapshots and the visible lifecycle state
//! - Per-enemy state machine (idle, pursuit, attack, retreat)
//! - Distance-gated activation and world-bound clamping
//! - Cooldown-based attack cycles polled by the caller
//! - Coarse spatial bucketing (kept current, reserved for broad-phase use)
//! - Debug trace events and profiling counters
//!
//! Time comes from an injected [`Clock`](skirmish_common::Clock), so every
//! cooldown and patrol path is reproducible under test.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod attack;
pub mod bounds;
pub mod config;
pub mod enemy;
pub mod error;
pub mod events;
pub mod metrics;
pub mod movement;
pub mod spatial;
pub mod state;
pub mod system;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::attack::*;
    pub use crate::bounds::*;
    pub use crate::config::*;
    pub use crate::enemy::*;
    pub use crate::error::*;
    pub use crate::events::*;
    pub use crate::metrics::*;
    pub use crate::movement::*;
    pub use crate::spatial::*;
    pub use crate::state::*;
    pub use crate::system::*;
}

pub use prelude::*;
