//! Enemy AI system: registry, state machine driver and tick loop.

use ahash::AHashMap;
use glam::Vec2;
use skirmish_common::{distance, Clock, EnemyId, Timestamp};
use std::time::Instant;
use tracing::{debug, warn};

use crate::attack::{AttackCycle, AttackCycleView};
use crate::bounds::WorldBounds;
use crate::config::AiConfig;
use crate::enemy::{Enemy, EnemyState, PlayerStats};
use crate::error::{AiError, AiResult};
use crate::events::{AiEvent, EventBus};
use crate::metrics::PerformanceMetrics;
use crate::movement::{movement_target, MovementInput};
use crate::spatial::SpatialGrid;
use crate::state::{next_state, AiState, AiStateRecord, TransitionContext};

/// Owns per-enemy AI state and runs the update tick.
///
/// All timers read the injected clock `C`; nothing in here touches the wall
/// clock except the profiling counter in [`PerformanceMetrics`].
#[derive(Debug)]
pub struct EnemyAiSystem<C: Clock> {
    config: AiConfig,
    bounds: WorldBounds,
    clock: C,
    /// Registered enemy snapshots
    enemies: AHashMap<EnemyId, Enemy>,
    /// Behavioral state per live enemy
    ai_states: AHashMap<EnemyId, AiStateRecord>,
    /// Cooldown bookkeeping per live enemy
    attack_cycles: AHashMap<EnemyId, AttackCycle>,
    grid: SpatialGrid,
    metrics: PerformanceMetrics,
    debug_mode: bool,
    events: EventBus,
}

impl<C: Clock> EnemyAiSystem<C> {
    /// Creates an empty system. The config is validated first.
    #[must_use]
    pub fn new(mut config: AiConfig, clock: C) -> Self {
        config.validate();
        Self {
            bounds: WorldBounds::from_config(&config),
            grid: SpatialGrid::new(config.grid_cell_size),
            config,
            clock,
            enemies: AHashMap::new(),
            ai_states: AHashMap::new(),
            attack_cycles: AHashMap::new(),
            metrics: PerformanceMetrics::default(),
            debug_mode: false,
            events: EventBus::default(),
        }
    }

    /// Creates an empty system with default tuning.
    #[must_use]
    pub fn with_defaults(clock: C) -> Self {
        Self::new(AiConfig::default(), clock)
    }

    /// Returns the tuning in effect.
    #[must_use]
    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Returns the world bounds.
    #[must_use]
    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    /// Returns the clock.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ------------------------------------------------------------------
    // Registry
    // ------------------------------------------------------------------

    /// Registers an enemy, overwriting any existing entry with the same id.
    ///
    /// The enemy starts idle with a ready attack cycle. An enemy that arrives
    /// already dead is stored inert, without AI records.
    pub fn add_enemy(&mut self, mut enemy: Enemy) {
        let id = enemy.id;
        let now = self.clock.now();

        if enemy.is_dead() {
            enemy.state = EnemyState::Dead;
            self.ai_states.remove(&id);
            self.attack_cycles.remove(&id);
            self.grid.remove(id);
        } else {
            self.ai_states.insert(id, AiStateRecord::new(now));
            self.attack_cycles.insert(
                id,
                AttackCycle::new(self.config.default_cooldown_ms, self.config.default_attack_range),
            );
            self.grid.update(id, enemy.position);
        }

        if self.debug_mode {
            debug!("Registered {id} at ({:.1}, {:.1})", enemy.position.x, enemy.position.y);
        }
        self.enemies.insert(id, enemy);
    }

    /// Removes an enemy from every table. Returns its last snapshot.
    pub fn remove_enemy(&mut self, id: EnemyId) -> Option<Enemy> {
        self.ai_states.remove(&id);
        self.attack_cycles.remove(&id);
        self.grid.remove(id);
        let removed = self.enemies.remove(&id);
        if removed.is_some() && self.debug_mode {
            debug!("Removed {id}");
        }
        removed
    }

    /// Gets an enemy snapshot.
    #[must_use]
    pub fn get_enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.get(&id)
    }

    /// Returns iterator over all registered enemies.
    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.values()
    }

    /// Returns whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: EnemyId) -> bool {
        self.enemies.contains_key(&id)
    }

    /// Number of registered enemies, dead ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    /// Returns whether no enemies are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Number of registered enemies that are not dead.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.enemies.values().filter(|e| e.state != EnemyState::Dead).count()
    }

    /// Pushes authoritative health into the core, capped at max health.
    ///
    /// Dead enemies stay dead; the call is accepted and ignored. A health at
    /// or below zero takes effect on the next tick.
    pub fn set_enemy_health(&mut self, id: EnemyId, health: f32) -> AiResult<()> {
        if !health.is_finite() {
            return Err(AiError::InvalidHealth { id, value: health });
        }
        let enemy = self.enemies.get_mut(&id).ok_or(AiError::NotRegistered(id))?;
        if enemy.state != EnemyState::Dead {
            enemy.health = health.min(enemy.max_health);
        }
        Ok(())
    }

    /// Subtracts `amount` from an enemy's health. Returns the new health.
    pub fn damage_enemy(&mut self, id: EnemyId, amount: f32) -> AiResult<f32> {
        let current = self.enemies.get(&id).ok_or(AiError::NotRegistered(id))?.health;
        self.set_enemy_health(id, current - amount.max(0.0))?;
        Ok(self.enemies.get(&id).map_or(current, |e| e.health))
    }

    // ------------------------------------------------------------------
    // Tick
    // ------------------------------------------------------------------

    /// Advances every registered enemy by one tick and returns the snapshots.
    ///
    /// `player_stats` is carried for balancing hooks and does not influence
    /// the transitions. `delta_ms` is the tick length in milliseconds. An
    /// enemy whose records are inconsistent is logged and returned unchanged;
    /// the rest of the batch still runs.
    pub fn update_enemies(
        &mut self,
        player_position: Vec2,
        _player_stats: &PlayerStats,
        delta_ms: f32,
    ) -> Vec<Enemy> {
        let started = Instant::now();
        let now = self.clock.now();

        let ids: Vec<EnemyId> = self.enemies.keys().copied().collect();
        let mut snapshots = Vec::with_capacity(ids.len());

        for id in ids {
            let original = match self.enemies.get(&id) {
                Some(enemy) => enemy.clone(),
                None => continue,
            };

            let mut enemy = original.clone();
            match self.step_enemy(&mut enemy, player_position, delta_ms, now) {
                Ok(()) => {
                    self.enemies.insert(id, enemy.clone());
                    snapshots.push(enemy);
                },
                Err(err) => {
                    warn!("Skipping {id} this tick: {err}");
                    snapshots.push(original);
                },
            }
        }

        self.metrics.active_enemies = self.active_count();
        self.metrics.total_ticks += 1;
        self.metrics.last_update_ms = started.elapsed().as_secs_f64() * 1000.0;

        snapshots
    }

    /// Runs one enemy through the tick pipeline.
    fn step_enemy(
        &mut self,
        enemy: &mut Enemy,
        player: Vec2,
        delta_ms: f32,
        now: Timestamp,
    ) -> AiResult<()> {
        let id = enemy.id;

        if enemy.state == EnemyState::Dead {
            return Ok(());
        }
        if enemy.health <= 0.0 {
            self.mark_dead(enemy);
            return Ok(());
        }

        let dist = distance(enemy.position, player);

        // Dormant far from the player: park at the patrol center
        if dist > self.config.activation_radius {
            let record = self.ai_states.get_mut(&id).ok_or(AiError::MissingAiState(id))?;
            let previous = (record.state != AiState::Idle)
                .then(|| record.transition(AiState::Idle, now));

            enemy.position = enemy.patrol_center;
            enemy.state = EnemyState::Patrol;
            self.grid.update(id, enemy.position);

            if let Some(from) = previous {
                self.trace(AiEvent::StateChanged {
                    enemy: id,
                    from,
                    to: AiState::Idle,
                    at: now,
                });
                self.trace(AiEvent::EnemyDeactivated {
                    enemy: id,
                    patrol_center: enemy.patrol_center,
                });
            }
            return Ok(());
        }

        let attack_range = self
            .attack_cycles
            .get(&id)
            .ok_or(AiError::MissingAttackCycle(id))?
            .attack_range;
        let line_of_sight = self.has_line_of_sight(dist);

        // State machine: one transition at most
        let ctx = TransitionContext {
            distance: dist,
            line_of_sight,
            health_fraction: enemy.health_fraction(),
            detection_radius: enemy.detection_radius,
            attack_range,
        };
        let record = self.ai_states.get_mut(&id).ok_or(AiError::MissingAiState(id))?;
        let held_ms = record.time_in_state(now);
        let transition = next_state(record.state, &ctx, &self.config)
            .map(|next| (record.transition(next, now), next));
        let state = record.state;
        enemy.state = state.visible_state();

        if let Some((from, to)) = transition {
            if self.debug_mode {
                debug!("{id} left {} after {held_ms} ms", from.display_name());
            }
            if from == AiState::Idle && to == AiState::Pursuit {
                self.trace(AiEvent::PlayerDetected {
                    enemy: id,
                    distance: dist,
                });
            }
            self.trace(AiEvent::StateChanged {
                enemy: id,
                from,
                to,
                at: now,
            });
        }

        // Movement
        let input = MovementInput {
            position: enemy.position,
            player_position: player,
            patrol_center: enemy.patrol_center,
            patrol_radius: enemy.patrol_radius,
            speed: enemy.stats.speed,
            delta_ms,
            now,
        };
        let target = movement_target(state, &input, &self.config);
        enemy.position = self.constrain(target);

        // Attack
        if dist <= self.config.attack_check_radius {
            let flash_ms = self.config.attack_flash_ms;
            let cycle = self
                .attack_cycles
                .get_mut(&id)
                .ok_or(AiError::MissingAttackCycle(id))?;
            if dist <= cycle.attack_range && cycle.ready(now) && line_of_sight {
                cycle.trigger(now, flash_ms);
                enemy.last_action = Some(now);
                self.trace(AiEvent::AttackTriggered {
                    enemy: id,
                    distance: dist,
                    at: now,
                });
            }
        }

        enemy.position = self.constrain(enemy.position);
        self.grid.update(id, enemy.position);
        Ok(())
    }

    /// Forces an enemy inert and drops its AI records.
    fn mark_dead(&mut self, enemy: &mut Enemy) {
        let id = enemy.id;
        enemy.state = EnemyState::Dead;
        self.ai_states.remove(&id);
        self.attack_cycles.remove(&id);
        self.grid.remove(id);
        self.trace(AiEvent::EnemyDied { enemy: id });
    }

    /// Applies world-bound constraints, counting the check.
    fn constrain(&mut self, pos: Vec2) -> Vec2 {
        self.metrics.collision_checks += 1;
        self.bounds.clamp(pos)
    }

    /// Distance-only visibility; no occlusion.
    fn has_line_of_sight(&self, dist: f32) -> bool {
        dist <= self.config.line_of_sight_range
    }

    // ------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------

    /// Toggles verbose tracing and event publishing.
    pub fn enable_debug_mode(&mut self, enabled: bool) {
        self.debug_mode = enabled;
        debug!("Enemy AI debug mode {}", if enabled { "on" } else { "off" });
    }

    /// Returns whether debug mode is on.
    #[must_use]
    pub fn is_debug_mode(&self) -> bool {
        self.debug_mode
    }

    /// Gets an enemy's AI state record. `None` for unknown or dead enemies.
    #[must_use]
    pub fn get_enemy_state(&self, id: EnemyId) -> Option<&AiStateRecord> {
        self.ai_states.get(&id)
    }

    /// Gets an enemy's attack cycle with `is_attacking` resolved now.
    #[must_use]
    pub fn get_attack_cycle(&self, id: EnemyId) -> Option<AttackCycleView> {
        let now = self.clock.now();
        self.attack_cycles.get(&id).map(|cycle| cycle.view(now))
    }

    /// Returns the profiling counters.
    #[must_use]
    pub fn get_performance_metrics(&self) -> PerformanceMetrics {
        self.metrics
    }

    /// Returns the spatial grid.
    #[must_use]
    pub fn spatial_grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Drains trace events collected while debug mode was on.
    pub fn drain_events(&self) -> Vec<AiEvent> {
        self.events.drain()
    }

    fn trace(&self, event: AiEvent) {
        if !self.debug_mode {
            return;
        }
        match &event {
            AiEvent::StateChanged { enemy, from, to, .. } => {
                debug!("{enemy}: {} -> {}", from.display_name(), to.display_name());
            },
            AiEvent::PlayerDetected { enemy, distance } => {
                debug!("{enemy}: player detected at {distance:.1}");
            },
            AiEvent::AttackTriggered { enemy, distance, .. } => {
                debug!("{enemy}: attack at {distance:.1}");
            },
            AiEvent::EnemyDied { enemy } => debug!("{enemy}: died"),
            AiEvent::EnemyDeactivated { enemy, .. } => {
                debug!("{enemy}: out of range, back to patrol center");
            },
        }
        self.events.publish(event);
    }
}
