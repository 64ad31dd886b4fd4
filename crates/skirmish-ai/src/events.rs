//! Debug trace events published while debug mode is on.

use crossbeam_channel::{bounded, Receiver, Sender};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use skirmish_common::{EnemyId, Timestamp};

use crate::state::AiState;

/// Something worth tracing happened to an enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AiEvent {
    /// Internal state changed
    StateChanged {
        /// Enemy
        enemy: EnemyId,
        /// Previous state
        from: AiState,
        /// New state
        to: AiState,
        /// When
        at: Timestamp,
    },
    /// An idle enemy noticed the player
    PlayerDetected {
        /// Enemy
        enemy: EnemyId,
        /// Distance at detection
        distance: f32,
    },
    /// An attack triggered
    AttackTriggered {
        /// Enemy
        enemy: EnemyId,
        /// Distance at trigger
        distance: f32,
        /// When
        at: Timestamp,
    },
    /// Enemy health reached zero
    EnemyDied {
        /// Enemy
        enemy: EnemyId,
    },
    /// Enemy left the activation radius and was parked at its patrol center
    EnemyDeactivated {
        /// Enemy
        enemy: EnemyId,
        /// Patrol center it was moved to
        patrol_center: Vec2,
    },
}

/// Bounded bus collecting trace events until drained.
#[derive(Debug)]
pub struct EventBus {
    sender: Sender<AiEvent>,
    receiver: Receiver<AiEvent>,
    capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl EventBus {
    /// Creates a new event bus with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
        }
    }

    /// Publishes an event. Dropped if the bus is full.
    pub fn publish(&self, event: AiEvent) {
        let _ = self.sender.try_send(event);
    }

    /// Drains all pending events.
    pub fn drain(&self) -> Vec<AiEvent> {
        self.receiver.try_iter().collect()
    }

    /// Returns the number of pending events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Returns the channel capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_and_drain() {
        let bus = EventBus::new(8);
        bus.publish(AiEvent::EnemyDied {
            enemy: EnemyId::from_raw(1),
        });

        assert_eq!(bus.pending_count(), 1);
        let events = bus.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(bus.pending_count(), 0);
    }

    #[test]
    fn test_full_bus_drops() {
        let bus = EventBus::new(2);
        for raw in 0..5 {
            bus.publish(AiEvent::EnemyDied {
                enemy: EnemyId::from_raw(raw),
            });
        }
        assert_eq!(bus.drain().len(), 2);
        assert_eq!(bus.capacity(), 2);
    }
}
