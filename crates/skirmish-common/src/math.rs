//! 2D vector helpers.

use glam::Vec2;

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Normalizes `v`, returning the zero vector for zero (or non-finite) length.
#[must_use]
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    v.normalize_or_zero()
}

/// Unit vector pointing from `from` to `to`, or zero if the points coincide.
#[must_use]
pub fn direction(from: Vec2, to: Vec2) -> Vec2 {
    normalize_or_zero(to - from)
}
