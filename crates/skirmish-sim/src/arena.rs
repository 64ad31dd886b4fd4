//! Headless arena: the game-state side of the AI core.
//!
//! Owns the authoritative enemy table and the player, drives the AI on a
//! fixed timestep, merges the returned snapshots and resolves hits on a
//! coarser interval by polling each enemy's attack cycle.

use glam::Vec2;
use skirmish_ai::{CombatStats, Enemy, EnemyAiSystem, EnemyState, PlayerStats};
use skirmish_common::{distance, EnemyId, ManualClock, SkirmishResult, Timestamp};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::config::SimConfig;
use crate::timing::FixedTimestep;

/// The player as the arena tracks it.
#[derive(Debug, Clone)]
pub struct Player {
    /// Current position
    pub position: Vec2,
    /// Current health
    pub health: f32,
    /// Combat stats
    pub stats: PlayerStats,
}

impl Player {
    /// Returns whether the player is down.
    #[must_use]
    pub fn is_down(&self) -> bool {
        self.health <= 0.0
    }
}

/// Running totals of a simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ArenaReport {
    /// AI ticks run
    pub ticks: u64,
    /// Simulated time in milliseconds
    pub elapsed_ms: u64,
    /// Hits the player took
    pub hits_taken: u32,
    /// Total damage the player took
    pub damage_taken: f32,
    /// Strikes the player landed
    pub strikes_landed: u32,
    /// Enemies that died
    pub enemies_killed: u32,
    /// Trace events drained from the AI
    pub trace_events: u64,
    /// Whether the player went down
    pub player_down: bool,
}

/// Headless simulation of one player against a crowd of enemies.
#[derive(Debug)]
pub struct Arena {
    config: SimConfig,
    clock: ManualClock,
    ai: EnemyAiSystem<ManualClock>,
    timestep: FixedTimestep,
    /// Authoritative enemy snapshots
    enemies: HashMap<EnemyId, Enemy>,
    player: Player,
    /// Last attack flash already turned into damage, per enemy
    resolved_flashes: HashMap<EnemyId, Timestamp>,
    next_attack_check_ms: u64,
    report: ArenaReport,
}

impl Arena {
    /// Creates an arena and spawns the configured enemies.
    #[must_use]
    pub fn new(mut config: SimConfig) -> Self {
        config.validate();

        let clock = ManualClock::new(0);
        let mut ai = EnemyAiSystem::new(config.ai.clone(), clock.clone());
        ai.enable_debug_mode(config.debug_ai);

        let start = Vec2::from(config.player_start);
        let player = Player {
            position: start,
            health: config.player_max_health,
            stats: PlayerStats {
                attack: config.player_attack,
                defense: config.player_defense,
                max_health: config.player_max_health,
            },
        };

        let mut arena = Self {
            timestep: FixedTimestep::new(config.tick_ms),
            next_attack_check_ms: config.attack_check_interval_ms,
            config,
            clock,
            ai,
            enemies: HashMap::new(),
            player,
            resolved_flashes: HashMap::new(),
            report: ArenaReport::default(),
        };
        arena.spawn_enemies();
        arena
    }

    fn spawn_enemies(&mut self) {
        let mut rng = fastrand::Rng::with_seed(self.config.seed);
        let center = Vec2::from(self.config.player_start);
        let bounds = self.ai.bounds();
        let spread = self.config.spawn_radius;

        for _ in 0..self.config.enemy_count {
            let offset = Vec2::new(
                (rng.f32() * 2.0 - 1.0) * spread,
                (rng.f32() * 2.0 - 1.0) * spread,
            );
            let position = bounds.clamp(center + offset);
            let max_health = 30.0 + rng.f32() * 50.0;
            let stats = CombatStats {
                attack: 5.0 + rng.f32() * 10.0,
                defense: rng.f32() * 4.0,
                speed: 1.0 + rng.f32() * 2.0,
            };

            let enemy = Enemy::new(EnemyId::new(), position, max_health)
                .with_stats(stats)
                .with_detection_radius(70.0 + rng.f32() * 50.0)
                .with_patrol_radius(60.0 + rng.f32() * 90.0);

            self.ai.add_enemy(enemy.clone());
            self.enemies.insert(enemy.id, enemy);
        }

        info!("Spawned {} enemies", self.enemies.len());
    }

    /// Returns the player.
    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Returns the authoritative enemy table.
    #[must_use]
    pub fn enemies(&self) -> &HashMap<EnemyId, Enemy> {
        &self.enemies
    }

    /// Returns the AI core.
    #[must_use]
    pub fn ai(&self) -> &EnemyAiSystem<ManualClock> {
        &self.ai
    }

    /// Returns the running totals.
    #[must_use]
    pub fn report(&self) -> ArenaReport {
        self.report
    }

    /// Feeds `frame_ms` of wall time through the fixed timestep.
    ///
    /// Returns the number of AI ticks run.
    pub fn advance(&mut self, frame_ms: u64) -> u32 {
        let ticks = self.timestep.accumulate(frame_ms);
        for _ in 0..ticks {
            if self.player.is_down() {
                break;
            }
            self.tick();
        }
        ticks
    }

    /// Runs until the configured duration elapses or the player goes down.
    pub fn run(&mut self) -> ArenaReport {
        let step = self.config.tick_ms;
        while self.report.elapsed_ms < self.config.duration_ms && !self.player.is_down() {
            self.advance(step);
        }
        self.report.player_down = self.player.is_down();
        self.report
    }

    /// One fixed AI tick plus, when due, the hit-resolution pass.
    fn tick(&mut self) {
        let step = self.config.tick_ms;
        self.clock.advance(step);
        self.report.elapsed_ms += step;
        self.report.ticks += 1;

        self.player.position = self.player_path_position();

        let snapshots =
            self.ai
                .update_enemies(self.player.position, &self.player.stats, step as f32);
        self.merge(snapshots);

        if self.report.elapsed_ms >= self.next_attack_check_ms {
            self.next_attack_check_ms += self.config.attack_check_interval_ms;
            self.resolve_enemy_attacks();
            self.player_strike();
        }

        if self.ai.is_debug_mode() {
            self.report.trace_events += self.ai.drain_events().len() as u64;
        }
    }

    fn player_path_position(&self) -> Vec2 {
        let center = Vec2::from(self.config.player_start);
        let angle = (self.report.elapsed_ms as f32 / 1000.0) * self.config.player_path_speed;
        let pos = center + Vec2::new(angle.cos(), angle.sin()) * self.config.player_path_radius;
        self.ai.bounds().clamp(pos)
    }

    fn merge(&mut self, snapshots: Vec<Enemy>) {
        for snapshot in snapshots {
            let newly_dead = snapshot.state == EnemyState::Dead
                && self
                    .enemies
                    .get(&snapshot.id)
                    .is_some_and(|e| e.state != EnemyState::Dead);
            if newly_dead {
                self.report.enemies_killed += 1;
                debug!("{} died", snapshot.id);
            }
            self.enemies.insert(snapshot.id, snapshot);
        }
    }

    /// Applies damage for every attack flash whose hit our own range check confirms.
    fn resolve_enemy_attacks(&mut self) {
        for enemy in self.enemies.values() {
            if enemy.state == EnemyState::Dead {
                continue;
            }
            let Some(cycle) = self.ai.get_attack_cycle(enemy.id) else {
                continue;
            };
            let Some(attack_time) = cycle.last_attack_time else {
                continue;
            };
            if !cycle.is_attacking
                || self.resolved_flashes.get(&enemy.id) == Some(&attack_time)
                || distance(enemy.position, self.player.position) > cycle.attack_range
            {
                continue;
            }

            let damage = (enemy.stats.attack - self.player.stats.defense).max(1.0);
            self.player.health -= damage;
            self.report.hits_taken += 1;
            self.report.damage_taken += damage;
            self.resolved_flashes.insert(enemy.id, attack_time);
            debug!(
                "{} hit player for {damage:.1} ({:.1} left)",
                enemy.id, self.player.health
            );
        }

        if self.player.is_down() {
            info!("Player down after {} ms", self.report.elapsed_ms);
        }
    }

    /// The player hits the nearest living enemy within reach.
    fn player_strike(&mut self) {
        let reach = self.config.player_reach;
        if reach <= 0.0 {
            return;
        }
        let target = self
            .enemies
            .values()
            .filter(|e| e.state != EnemyState::Dead && e.health > 0.0)
            .map(|e| (e, distance(e.position, self.player.position)))
            .filter(|(_, d)| *d <= reach)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(e, _)| (e.id, e.stats.defense));

        let Some((id, defense)) = target else {
            return;
        };
        let damage = (self.player.stats.attack - defense).max(1.0);
        if let Err(e) = self.strike_enemy(id, damage) {
            warn!("Strike on {id} rejected: {e}");
        }
    }

    /// Deals `damage` to an enemy and mirrors the new health into the table.
    ///
    /// Returns the enemy's remaining health.
    pub fn strike_enemy(&mut self, id: EnemyId, damage: f32) -> SkirmishResult<f32> {
        let remaining = self.ai.damage_enemy(id, damage)?;
        self.report.strikes_landed += 1;
        if let Some(enemy) = self.enemies.get_mut(&id) {
            enemy.health = remaining;
        }
        Ok(remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_common::{Clock, SkirmishError};

    fn small_config() -> SimConfig {
        SimConfig {
            enemy_count: 12,
            duration_ms: 20_000,
            spawn_radius: 300.0,
            ..SimConfig::default()
        }
    }

    #[test]
    fn test_spawn_registers_with_ai() {
        let arena = Arena::new(small_config());
        assert_eq!(arena.enemies().len(), 12);
        assert_eq!(arena.ai().len(), 12);
        for id in arena.enemies().keys() {
            assert!(arena.ai().get_enemy_state(*id).is_some());
        }
    }

    #[test]
    fn test_advance_runs_fixed_ticks() {
        let mut arena = Arena::new(small_config());
        assert_eq!(arena.advance(40), 2);
        assert_eq!(arena.report().ticks, 2);
        assert_eq!(arena.report().elapsed_ms, 32);
        assert_eq!(arena.ai().clock().now(), Timestamp::from_millis(32));
    }

    #[test]
    fn test_run_is_deterministic() {
        let mut a = Arena::new(small_config());
        let mut b = Arena::new(small_config());
        let report_a = a.run();
        let report_b = b.run();

        assert_eq!(report_a.hits_taken, report_b.hits_taken);
        assert_eq!(report_a.strikes_landed, report_b.strikes_landed);
        assert_eq!(report_a.enemies_killed, report_b.enemies_killed);
        assert_eq!(report_a.ticks, report_b.ticks);
    }

    #[test]
    fn test_enemies_stay_in_bounds() {
        let mut arena = Arena::new(small_config());
        arena.run();
        let bounds = arena.ai().bounds();
        for enemy in arena.enemies().values() {
            assert!(bounds.contains(enemy.position));
        }
    }

    #[test]
    fn test_stationary_player_gets_hit() {
        let config = SimConfig {
            enemy_count: 6,
            spawn_radius: 60.0,
            player_path_radius: 0.0,
            duration_ms: 10_000,
            player_reach: 0.0,
            ..SimConfig::default()
        };
        let mut arena = Arena::new(config);
        let report = arena.run();

        assert!(report.hits_taken > 0);
        assert!(report.damage_taken > 0.0);
        assert!(arena.player().health < 500.0);
    }

    #[test]
    fn test_each_flash_hits_once() {
        let config = SimConfig {
            enemy_count: 1,
            spawn_radius: 0.0,
            player_path_radius: 0.0,
            duration_ms: 1_900,
            player_reach: 0.0,
            attack_check_interval_ms: 16,
            ..SimConfig::default()
        };
        let mut arena = Arena::new(config);
        let report = arena.run();

        // One trigger inside the first cooldown window
        assert_eq!(report.hits_taken, 1);
    }

    #[test]
    fn test_player_strikes_kill_enemies() {
        let config = SimConfig {
            enemy_count: 3,
            spawn_radius: 30.0,
            player_path_radius: 0.0,
            duration_ms: 30_000,
            player_attack: 40.0,
            player_max_health: 10_000.0,
            ..SimConfig::default()
        };
        let mut arena = Arena::new(config);
        let report = arena.run();

        assert!(report.strikes_landed > 0);
        assert_eq!(report.enemies_killed, 3);
        assert_eq!(arena.ai().active_count(), 0);
    }

    #[test]
    fn test_strike_enemy() {
        let mut arena = Arena::new(small_config());
        let id = *arena.enemies().keys().next().expect("enemies spawned");
        let before = arena.enemies()[&id].health;

        let remaining = arena.strike_enemy(id, 5.0).expect("strike should land");
        assert!((remaining - (before - 5.0)).abs() < 1e-4);
        assert_eq!(arena.enemies()[&id].health, remaining);
        assert_eq!(arena.report().strikes_landed, 1);
    }

    #[test]
    fn test_strike_unknown_enemy_is_error() {
        let mut arena = Arena::new(small_config());
        let result = arena.strike_enemy(EnemyId::from_raw(u64::MAX), 5.0);
        assert!(matches!(result, Err(SkirmishError::Ai(_))));
        assert_eq!(arena.report().strikes_landed, 0);
    }

    #[test]
    fn test_debug_events_are_drained() {
        let config = SimConfig {
            debug_ai: true,
            enemy_count: 4,
            spawn_radius: 40.0,
            player_path_radius: 0.0,
            duration_ms: 2_000,
            ..SimConfig::default()
        };
        let mut arena = Arena::new(config);
        let report = arena.run();
        assert!(report.trace_events > 0);
    }
}
