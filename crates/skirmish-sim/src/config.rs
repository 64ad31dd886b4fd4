//! Driver configuration.
//!
//! Loaded from a TOML file; every field falls back to its default, and the
//! `[ai]` table carries the AI tuning.

use serde::{Deserialize, Serialize};
use skirmish_ai::AiConfig;
use skirmish_common::{SkirmishError, SkirmishResult};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Default configuration file name.
pub const CONFIG_FILE: &str = "skirmish.toml";

/// Headless simulation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Timing ===
    /// AI tick length in milliseconds
    pub tick_ms: u64,
    /// Interval of the attack-check / damage pass
    pub attack_check_interval_ms: u64,
    /// Total simulated time
    pub duration_ms: u64,

    // === World ===
    /// RNG seed for enemy placement
    pub seed: u64,
    /// Number of enemies to spawn
    pub enemy_count: usize,
    /// Enemies spawn within this distance of the player's loop center
    pub spawn_radius: f32,

    // === Player ===
    /// Center of the player's scripted loop
    pub player_start: [f32; 2],
    /// Radius of the player's scripted loop
    pub player_path_radius: f32,
    /// Player angular speed along the loop, radians per second
    pub player_path_speed: f32,
    /// Player maximum health
    pub player_max_health: f32,
    /// Player attack
    pub player_attack: f32,
    /// Player defense
    pub player_defense: f32,
    /// Player melee reach
    pub player_reach: f32,

    // === Debug ===
    /// Enable AI debug tracing
    pub debug_ai: bool,

    /// AI tuning
    pub ai: AiConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            attack_check_interval_ms: 100,
            duration_ms: 60_000,

            seed: 42,
            enemy_count: 40,
            spawn_radius: 900.0,

            player_start: [2000.0, 2000.0],
            player_path_radius: 400.0,
            player_path_speed: 0.2,
            player_max_health: 500.0,
            player_attack: 12.0,
            player_defense: 3.0,
            player_reach: 60.0,

            debug_ai: false,

            ai: AiConfig::default(),
        }
    }
}

impl SimConfig {
    /// Load configuration from a path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file {} not found, using defaults", path.display());
            return Self::default();
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read config file: {e}");
                return Self::default();
            },
        };

        match toml::from_str::<Self>(&contents) {
            Ok(mut config) => {
                config.validate();
                info!("Loaded config from {}", path.display());
                config
            },
            Err(e) => {
                warn!("Failed to parse config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> SkirmishResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| SkirmishError::Config(e.to_string()))?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        self.tick_ms = self.tick_ms.clamp(1, 1000);
        self.attack_check_interval_ms = self.attack_check_interval_ms.max(self.tick_ms);
        self.enemy_count = self.enemy_count.min(10_000);
        self.spawn_radius = self.spawn_radius.max(0.0);
        self.player_path_radius = self.player_path_radius.max(0.0);
        self.player_max_health = self.player_max_health.max(1.0);
        self.player_reach = self.player_reach.max(0.0);
        self.ai.validate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.tick_ms, 16);
        assert_eq!(config.attack_check_interval_ms, 100);
        assert_eq!(config.ai.activation_radius, 800.0);
    }

    #[test]
    fn test_config_validation() {
        let mut config = SimConfig {
            tick_ms: 0,
            attack_check_interval_ms: 0,
            player_max_health: -5.0,
            ..SimConfig::default()
        };

        config.validate();

        assert_eq!(config.tick_ms, 1);
        assert_eq!(config.attack_check_interval_ms, 1);
        assert_eq!(config.player_max_health, 1.0);
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join(CONFIG_FILE);

        let mut config = SimConfig::default();
        config.enemy_count = 7;
        config.debug_ai = true;
        config.ai.default_cooldown_ms = 1500;

        config.save_to(&config_path).expect("Failed to save config");

        let loaded = SimConfig::load_from(&config_path);
        assert_eq!(loaded.enemy_count, 7);
        assert!(loaded.debug_ai);
        assert_eq!(loaded.ai.default_cooldown_ms, 1500);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "enemy_count = 3\n[ai]\nactivation_radius = 500.0\n")
            .expect("Failed to write config");

        let loaded = SimConfig::load_from(&config_path);
        assert_eq!(loaded.enemy_count, 3);
        assert_eq!(loaded.tick_ms, 16);
        assert_eq!(loaded.ai.activation_radius, 500.0);
        assert_eq!(loaded.ai.attack_check_radius, 150.0);
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = SimConfig::load_from("/nonexistent/path/skirmish.toml");
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn test_config_load_garbage() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "this is = = not toml").expect("Failed to write config");

        assert_eq!(SimConfig::load_from(&config_path), SimConfig::default());
    }
}
