//! Movement targets per behavioral state.
//!
//! Speeds are expressed per baseline frame; `delta_ms / baseline_frame_ms`
//! scales them to the actual tick length.

use glam::Vec2;
use skirmish_common::{direction, Timestamp};

use crate::config::AiConfig;
use crate::state::AiState;

/// Inputs for one movement step.
#[derive(Debug, Clone, Copy)]
pub struct MovementInput {
    /// Current enemy position
    pub position: Vec2,
    /// Player position
    pub player_position: Vec2,
    /// Patrol anchor
    pub patrol_center: Vec2,
    /// Patrol radius of the enemy
    pub patrol_radius: f32,
    /// Enemy speed per baseline frame
    pub speed: f32,
    /// Tick length in milliseconds
    pub delta_ms: f32,
    /// Current time
    pub now: Timestamp,
}

/// Point on the patrol circle at `now`.
///
/// Depends only on time, not on the tick length.
#[must_use]
pub fn patrol_target(center: Vec2, patrol_radius: f32, now: Timestamp, config: &AiConfig) -> Vec2 {
    let angle = now.as_secs_f32() * config.patrol_angular_speed;
    let radius = patrol_radius * config.patrol_radius_factor;
    center + Vec2::new(angle.cos(), angle.sin()) * radius
}

/// Step toward the player at the pursuit speed.
///
/// The step is not capped at the player; a long tick carries the enemy past
/// it and the bounds clamp takes care of the world edge.
#[must_use]
pub fn pursuit_target(position: Vec2, player: Vec2, speed: f32, delta_ms: f32, config: &AiConfig) -> Vec2 {
    let step = speed * (delta_ms / config.baseline_frame_ms) * config.pursuit_speed_multiplier;
    position + direction(position, player) * step
}

/// Step away from the player at base speed.
#[must_use]
pub fn retreat_target(position: Vec2, player: Vec2, speed: f32, delta_ms: f32, config: &AiConfig) -> Vec2 {
    let step = speed * (delta_ms / config.baseline_frame_ms);
    position - direction(position, player) * step
}

/// Target position for `state`. Before bounds clamping.
///
/// A tick with no elapsed time never moves the enemy, whatever its state.
#[must_use]
pub fn movement_target(state: AiState, input: &MovementInput, config: &AiConfig) -> Vec2 {
    if input.delta_ms <= 0.0 {
        return input.position;
    }
    match state {
        AiState::Idle => patrol_target(input.patrol_center, input.patrol_radius, input.now, config),
        AiState::Pursuit | AiState::Attack => pursuit_target(
            input.position,
            input.player_position,
            input.speed,
            input.delta_ms,
            config,
        ),
        AiState::Retreat => retreat_target(
            input.position,
            input.player_position,
            input.speed,
            input.delta_ms,
            config,
        ),
    }
}
