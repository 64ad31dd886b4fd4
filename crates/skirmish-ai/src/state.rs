//! Behavioral state machine.
//!
//! Transition table (evaluated for the current state only, at most one
//! transition per tick):
//!
//! | From    | Condition                                   | To      |
//! |---------|---------------------------------------------|---------|
//! | Idle    | line of sight and distance <= detection     | Pursuit |
//! | Pursuit | health < max * pursuit_retreat_health       | Retreat |
//! | Pursuit | distance <= attack range                    | Attack  |
//! | Pursuit | distance > detection * lose_interest_factor | Idle    |
//! | Attack  | health < max * attack_retreat_health        | Retreat |
//! | Attack  | distance > attack range * attack_break      | Pursuit |
//! | Retreat | health > max * recover_health               | Pursuit |
//! | Retreat | distance > detection * give_up_factor       | Idle    |

use serde::{Deserialize, Serialize};
use skirmish_common::Timestamp;

use crate::config::AiConfig;
use crate::enemy::EnemyState;

/// Internal behavioral state of an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AiState {
    /// Wandering around the patrol center
    #[default]
    Idle,
    /// Moving toward the player
    Pursuit,
    /// In attack range of the player
    Attack,
    /// Moving away from the player
    Retreat,
}

impl AiState {
    /// Maps the internal state onto the visible lifecycle state.
    ///
    /// Retreat is reported as `Patrol`; renderers cannot tell the two apart.
    #[must_use]
    pub const fn visible_state(self) -> EnemyState {
        match self {
            Self::Idle | Self::Retreat => EnemyState::Patrol,
            Self::Pursuit | Self::Attack => EnemyState::Chase,
        }
    }

    /// Returns display name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pursuit => "pursuit",
            Self::Attack => "attack",
            Self::Retreat => "retreat",
        }
    }
}

/// Per-state scratch memory. Reset on every transition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateData {}

/// AI state record owned by the system, one per live enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiStateRecord {
    /// Current behavioral state
    pub state: AiState,
    /// When the state last changed
    pub last_state_change: Timestamp,
    /// Scratch data for the current state
    pub state_data: StateData,
}

impl AiStateRecord {
    /// Creates an idle record.
    #[must_use]
    pub fn new(now: Timestamp) -> Self {
        Self {
            state: AiState::Idle,
            last_state_change: now,
            state_data: StateData::default(),
        }
    }

    /// Moves to `next`, stamping the change and clearing scratch data.
    ///
    /// Returns the previous state.
    pub fn transition(&mut self, next: AiState, now: Timestamp) -> AiState {
        let previous = self.state;
        self.state = next;
        self.last_state_change = now;
        self.state_data = StateData::default();
        previous
    }

    /// Milliseconds spent in the current state.
    #[must_use]
    pub fn time_in_state(&self, now: Timestamp) -> u64 {
        now.saturating_since(self.last_state_change)
    }
}

/// Inputs the transition rules look at.
#[derive(Debug, Clone, Copy)]
pub struct TransitionContext {
    /// Distance from enemy to player
    pub distance: f32,
    /// Whether line of sight holds
    pub line_of_sight: bool,
    /// Enemy health as a fraction of max health
    pub health_fraction: f32,
    /// Enemy detection radius
    pub detection_radius: f32,
    /// Enemy attack range
    pub attack_range: f32,
}

/// Evaluates the current state's row of the transition table.
///
/// Returns `None` when the state holds.
#[must_use]
pub fn next_state(current: AiState, ctx: &TransitionContext, config: &AiConfig) -> Option<AiState> {
    match current {
        AiState::Idle => {
            (ctx.line_of_sight && ctx.distance <= ctx.detection_radius).then_some(AiState::Pursuit)
        },
        AiState::Pursuit => {
            if ctx.health_fraction < config.pursuit_retreat_health {
                Some(AiState::Retreat)
            } else if ctx.distance <= ctx.attack_range {
                Some(AiState::Attack)
            } else if ctx.distance > ctx.detection_radius * config.lose_interest_factor {
                Some(AiState::Idle)
            } else {
                None
            }
        },
        AiState::Attack => {
            if ctx.health_fraction < config.attack_retreat_health {
                Some(AiState::Retreat)
            } else if ctx.distance > ctx.attack_range * config.attack_break_factor {
                Some(AiState::Pursuit)
            } else {
                None
            }
        },
        AiState::Retreat => {
            if ctx.health_fraction > config.recover_health {
                Some(AiState::Pursuit)
            } else if ctx.distance > ctx.detection_radius * config.give_up_factor {
                Some(AiState::Idle)
            } else {
                None
            }
        },
    }
}
