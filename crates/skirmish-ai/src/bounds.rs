//! World-bound constraints.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::AiConfig;

/// Rectangular playable area with an inner margin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    /// World width
    pub width: f32,
    /// World height
    pub height: f32,
    /// Distance kept from every edge
    pub margin: f32,
}

impl WorldBounds {
    /// Creates bounds.
    #[must_use]
    pub const fn new(width: f32, height: f32, margin: f32) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    /// Creates bounds from the AI config.
    #[must_use]
    pub const fn from_config(config: &AiConfig) -> Self {
        Self::new(config.world_width, config.world_height, config.world_margin)
    }

    /// Smallest allowed corner.
    #[must_use]
    pub fn min(&self) -> Vec2 {
        Vec2::splat(self.margin)
    }

    /// Largest allowed corner.
    #[must_use]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.width - self.margin, self.height - self.margin)
    }

    /// Clamps `pos` into the playable area.
    #[must_use]
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        pos.clamp(self.min(), self.max())
    }

    /// Returns whether `pos` is inside the playable area.
    #[must_use]
    pub fn contains(&self, pos: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        pos.x >= min.x && pos.x <= max.x && pos.y >= min.y && pos.y <= max.y
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::from_config(&AiConfig::default())
    }
}
