//! Attack cooldown bookkeeping.

use serde::{Deserialize, Serialize};
use skirmish_common::Timestamp;

/// Attack cycle record owned by the system, one per live enemy.
///
/// `is_attacking` is not stored; it is derived from `attacking_until` so the
/// flag clears on its own once the flash window has passed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackCycle {
    /// Time of the last successful trigger, `None` if never attacked
    pub last_attack_time: Option<Timestamp>,
    /// Minimum time between triggers
    pub cooldown_ms: u64,
    /// The attack flag stays raised until this instant
    pub attacking_until: Option<Timestamp>,
    /// Distance under which an attack may trigger
    pub attack_range: f32,
}

impl AttackCycle {
    /// Creates a ready, idle attack cycle.
    #[must_use]
    pub const fn new(cooldown_ms: u64, attack_range: f32) -> Self {
        Self {
            last_attack_time: None,
            cooldown_ms,
            attacking_until: None,
            attack_range,
        }
    }

    /// Returns whether the cooldown has elapsed.
    #[must_use]
    pub fn ready(&self, now: Timestamp) -> bool {
        self.last_attack_time
            .map_or(true, |last| now.saturating_since(last) >= self.cooldown_ms)
    }

    /// Returns whether the attack flag is raised at `now`.
    #[must_use]
    pub fn is_attacking(&self, now: Timestamp) -> bool {
        self.attacking_until.is_some_and(|until| now < until)
    }

    /// Milliseconds until the next attack may trigger.
    #[must_use]
    pub fn cooldown_remaining(&self, now: Timestamp) -> u64 {
        self.last_attack_time.map_or(0, |last| {
            self.cooldown_ms.saturating_sub(now.saturating_since(last))
        })
    }

    /// Records a trigger at `now`, raising the flag for `flash_ms`.
    pub fn trigger(&mut self, now: Timestamp, flash_ms: u64) {
        self.last_attack_time = Some(now);
        self.attacking_until = Some(now.add_millis(flash_ms));
    }

    /// Read-only snapshot with the flag resolved at `now`.
    #[must_use]
    pub fn view(&self, now: Timestamp) -> AttackCycleView {
        AttackCycleView {
            last_attack_time: self.last_attack_time,
            cooldown_ms: self.cooldown_ms,
            cooldown_remaining_ms: self.cooldown_remaining(now),
            is_attacking: self.is_attacking(now),
            attack_range: self.attack_range,
        }
    }
}

/// Snapshot of an attack cycle handed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackCycleView {
    /// Time of the last successful trigger
    pub last_attack_time: Option<Timestamp>,
    /// Minimum time between triggers
    pub cooldown_ms: u64,
    /// Time left before the next trigger may happen
    pub cooldown_remaining_ms: u64,
    /// Whether the enemy hit this window
    pub is_attacking: bool,
    /// Attack range
    pub attack_range: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Timestamp {
        Timestamp::from_millis(v)
    }

    #[test]
    fn test_new_cycle_is_ready() {
        let cycle = AttackCycle::new(2000, 50.0);
        assert!(cycle.ready(ms(0)));
        assert!(!cycle.is_attacking(ms(0)));
        assert_eq!(cycle.cooldown_remaining(ms(0)), 0);
    }

    #[test]
    fn test_trigger_starts_cooldown() {
        let mut cycle = AttackCycle::new(2000, 50.0);
        cycle.trigger(ms(1000), 500);

        assert!(!cycle.ready(ms(1100)));
        assert_eq!(cycle.cooldown_remaining(ms(1100)), 1900);
        assert!(!cycle.ready(ms(2999)));
        assert!(cycle.ready(ms(3000)));
    }

    #[test]
    fn test_flag_clears_after_flash() {
        let mut cycle = AttackCycle::new(2000, 50.0);
        cycle.trigger(ms(1000), 500);

        assert!(cycle.is_attacking(ms(1000)));
        assert!(cycle.is_attacking(ms(1499)));
        assert!(!cycle.is_attacking(ms(1500)));
    }

    #[test]
    fn test_view_resolves_flag() {
        let mut cycle = AttackCycle::new(2000, 50.0);
        cycle.trigger(ms(0), 500);

        assert!(cycle.view(ms(100)).is_attacking);
        assert!(!cycle.view(ms(600)).is_attacking);
        assert_eq!(cycle.view(ms(600)).last_attack_time, Some(ms(0)));
    }
}
