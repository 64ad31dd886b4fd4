//! Enemy snapshots exchanged with the game-state store and renderer.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use skirmish_common::{EnemyId, Timestamp};

/// Lifecycle state of an enemy as seen by renderers and the game-state store.
///
/// The tick only ever derives `Patrol`, `Chase` and `Dead`; `Attack` and
/// `Retreat` are accepted on input so snapshots authored elsewhere round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EnemyState {
    /// Idle or wandering around the patrol center
    #[default]
    Patrol,
    /// Closing in on the player
    Chase,
    /// Swinging at the player
    Attack,
    /// Backing away from the player
    Retreat,
    /// Health reached zero; permanently inert
    Dead,
}

impl EnemyState {
    /// Returns display name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Patrol => "patrol",
            Self::Chase => "chase",
            Self::Attack => "attack",
            Self::Retreat => "retreat",
            Self::Dead => "dead",
        }
    }
}

/// Combat statistics of an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatStats {
    /// Damage dealt per hit
    pub attack: f32,
    /// Damage reduction
    pub defense: f32,
    /// Movement per baseline frame
    pub speed: f32,
}

impl Default for CombatStats {
    fn default() -> Self {
        Self {
            attack: 10.0,
            defense: 2.0,
            speed: 2.0,
        }
    }
}

/// Combat-relevant player statistics supplied with every tick.
///
/// Not consulted by the transition rules; carried for balancing hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Player attack
    pub attack: f32,
    /// Player defense
    pub defense: f32,
    /// Player maximum health
    pub max_health: f32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            attack: 12.0,
            defense: 3.0,
            max_health: 100.0,
        }
    }
}

/// Snapshot of one hostile actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Stable unique id
    pub id: EnemyId,
    /// Current health; `<= 0` means dead
    pub health: f32,
    /// Maximum health
    pub max_health: f32,
    /// Combat stats
    pub stats: CombatStats,
    /// World position
    pub position: Vec2,
    /// Fixed anchor for idle wandering
    pub patrol_center: Vec2,
    /// Patrol radius around the center
    pub patrol_radius: f32,
    /// Range at which an idle enemy notices the player
    pub detection_radius: f32,
    /// Visible lifecycle state
    pub state: EnemyState,
    /// Time of the most recent attack trigger
    pub last_action: Option<Timestamp>,
}

impl Enemy {
    /// Creates an enemy at `position`, patrolling around that same point.
    #[must_use]
    pub fn new(id: EnemyId, position: Vec2, max_health: f32) -> Self {
        Self {
            id,
            health: max_health,
            max_health,
            stats: CombatStats::default(),
            position,
            patrol_center: position,
            patrol_radius: 100.0,
            detection_radius: 100.0,
            state: EnemyState::Patrol,
            last_action: None,
        }
    }

    /// Sets combat stats.
    #[must_use]
    pub const fn with_stats(mut self, stats: CombatStats) -> Self {
        self.stats = stats;
        self
    }

    /// Sets movement speed.
    #[must_use]
    pub const fn with_speed(mut self, speed: f32) -> Self {
        self.stats.speed = speed;
        self
    }

    /// Sets the detection radius.
    #[must_use]
    pub const fn with_detection_radius(mut self, radius: f32) -> Self {
        self.detection_radius = radius;
        self
    }

    /// Sets the patrol radius.
    #[must_use]
    pub const fn with_patrol_radius(mut self, radius: f32) -> Self {
        self.patrol_radius = radius;
        self
    }

    /// Sets the patrol center.
    #[must_use]
    pub const fn with_patrol_center(mut self, center: Vec2) -> Self {
        self.patrol_center = center;
        self
    }

    /// Sets current health, capped at max health.
    #[must_use]
    pub fn with_health(mut self, health: f32) -> Self {
        self.health = health.min(self.max_health);
        self
    }

    /// Returns whether the enemy is logically dead.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.state == EnemyState::Dead || self.health <= 0.0
    }

    /// Returns health as a fraction of max health.
    #[must_use]
    pub fn health_fraction(&self) -> f32 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_creation() {
        let enemy = Enemy::new(EnemyId::from_raw(1), Vec2::new(10.0, 20.0), 60.0);
        assert_eq!(enemy.position, Vec2::new(10.0, 20.0));
        assert_eq!(enemy.patrol_center, enemy.position);
        assert_eq!(enemy.health, 60.0);
        assert_eq!(enemy.state, EnemyState::Patrol);
        assert!(enemy.last_action.is_none());
    }

    #[test]
    fn test_enemy_builders() {
        let enemy = Enemy::new(EnemyId::from_raw(2), Vec2::ZERO, 50.0)
            .with_speed(3.0)
            .with_detection_radius(80.0)
            .with_patrol_radius(120.0)
            .with_health(500.0);

        assert_eq!(enemy.stats.speed, 3.0);
        assert_eq!(enemy.detection_radius, 80.0);
        assert_eq!(enemy.patrol_radius, 120.0);
        assert_eq!(enemy.health, 50.0);
    }

    #[test]
    fn test_enemy_is_dead() {
        let mut enemy = Enemy::new(EnemyId::from_raw(3), Vec2::ZERO, 10.0);
        assert!(!enemy.is_dead());

        enemy.health = 0.0;
        assert!(enemy.is_dead());
    }

    #[test]
    fn test_health_fraction() {
        let enemy = Enemy::new(EnemyId::from_raw(4), Vec2::ZERO, 80.0).with_health(20.0);
        assert!((enemy.health_fraction() - 0.25).abs() < 0.001);
    }
}
