//! # Skirmish Sim
//!
//! Headless driver for the enemy AI core.
//!
//! Plays the caller's role: owns the authoritative enemy table, feeds the
//! AI on a fixed timestep, polls attack cycles and applies damage.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod arena;
pub mod config;
pub mod timing;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::arena::*;
    pub use crate::config::*;
    pub use crate::timing::*;
}

pub use prelude::*;
