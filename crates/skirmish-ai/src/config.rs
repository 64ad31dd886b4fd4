//! Tuning parameters for the enemy AI.
//!
//! Every distance is in world units and every duration in milliseconds.

use serde::{Deserialize, Serialize};

/// Tuning table for [`EnemyAiSystem`](crate::EnemyAiSystem).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    // === Activation ===
    /// Enemies farther than this from the player are parked at their patrol center
    pub activation_radius: f32,
    /// Attack triggers are only evaluated within this distance
    pub attack_check_radius: f32,
    /// Line of sight holds up to this distance
    pub line_of_sight_range: f32,

    // === Attack cycle ===
    /// Cooldown assigned to newly registered enemies
    pub default_cooldown_ms: u64,
    /// Attack range assigned to newly registered enemies
    pub default_attack_range: f32,
    /// How long `is_attacking` stays raised after a trigger
    pub attack_flash_ms: u64,

    // === World ===
    /// World width
    pub world_width: f32,
    /// World height
    pub world_height: f32,
    /// Distance enemies keep from every world edge
    pub world_margin: f32,
    /// Spatial grid cell size
    pub grid_cell_size: f32,

    // === Movement ===
    /// Frame duration that movement speeds are expressed against
    pub baseline_frame_ms: f32,
    /// Speed multiplier while pursuing or attacking
    pub pursuit_speed_multiplier: f32,
    /// Patrol circle radius as a fraction of the enemy's patrol radius
    pub patrol_radius_factor: f32,
    /// Patrol angular speed in radians per second
    pub patrol_angular_speed: f32,

    // === Transitions ===
    /// Pursuit gives up beyond `detection_radius * lose_interest_factor`
    pub lose_interest_factor: f32,
    /// Attack falls back to pursuit beyond `attack_range * attack_break_factor`
    pub attack_break_factor: f32,
    /// Pursuit retreats below this health fraction
    pub pursuit_retreat_health: f32,
    /// Attack retreats below this health fraction
    pub attack_retreat_health: f32,
    /// Retreat resumes pursuit above this health fraction
    pub recover_health: f32,
    /// Retreat goes idle beyond `detection_radius * give_up_factor`
    pub give_up_factor: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            activation_radius: 800.0,
            attack_check_radius: 150.0,
            line_of_sight_range: 600.0,

            default_cooldown_ms: 2000,
            default_attack_range: 50.0,
            attack_flash_ms: 500,

            world_width: 4000.0,
            world_height: 4000.0,
            world_margin: 50.0,
            grid_cell_size: 200.0,

            baseline_frame_ms: 16.0,
            pursuit_speed_multiplier: 1.2,
            patrol_radius_factor: 0.3,
            patrol_angular_speed: 0.5,

            lose_interest_factor: 1.5,
            attack_break_factor: 1.2,
            pursuit_retreat_health: 0.3,
            attack_retreat_health: 0.2,
            recover_health: 0.5,
            give_up_factor: 2.0,
        }
    }
}

impl AiConfig {
    /// Clamps every value into a usable range.
    pub fn validate(&mut self) {
        self.activation_radius = self.activation_radius.max(1.0);
        self.attack_check_radius = self.attack_check_radius.max(0.0);
        self.line_of_sight_range = self.line_of_sight_range.max(0.0);

        self.default_attack_range = self.default_attack_range.max(0.0);

        self.world_width = self.world_width.max(1.0);
        self.world_height = self.world_height.max(1.0);
        let max_margin = self.world_width.min(self.world_height) * 0.5;
        self.world_margin = self.world_margin.clamp(0.0, max_margin);
        self.grid_cell_size = self.grid_cell_size.max(1.0);

        self.baseline_frame_ms = self.baseline_frame_ms.max(1.0);
        self.pursuit_speed_multiplier = self.pursuit_speed_multiplier.max(0.0);
        self.patrol_radius_factor = self.patrol_radius_factor.max(0.0);

        self.lose_interest_factor = self.lose_interest_factor.max(1.0);
        self.attack_break_factor = self.attack_break_factor.max(1.0);
        self.pursuit_retreat_health = self.pursuit_retreat_health.clamp(0.0, 1.0);
        self.attack_retreat_health = self.attack_retreat_health.clamp(0.0, 1.0);
        self.recover_health = self.recover_health.clamp(0.0, 1.0);
        self.give_up_factor = self.give_up_factor.max(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AiConfig::default();
        assert_eq!(config.activation_radius, 800.0);
        assert_eq!(config.attack_check_radius, 150.0);
        assert_eq!(config.grid_cell_size, 200.0);
        assert_eq!(config.default_cooldown_ms, 2000);
        assert_eq!(config.default_attack_range, 50.0);
        assert_eq!(config.world_width, 4000.0);
    }

    #[test]
    fn test_validate_clamps() {
        let mut config = AiConfig {
            world_margin: 10_000.0,
            recover_health: 3.0,
            grid_cell_size: 0.0,
            ..AiConfig::default()
        };

        config.validate();

        assert_eq!(config.world_margin, 2000.0);
        assert_eq!(config.recover_health, 1.0);
        assert_eq!(config.grid_cell_size, 1.0);
    }

    #[test]
    fn test_validate_keeps_defaults() {
        let mut config = AiConfig::default();
        config.validate();
        assert_eq!(config, AiConfig::default());
    }
}
