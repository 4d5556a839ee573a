//! Hit testing and steering math
//!
//! Hits are axis-aligned: two centers collide when they are closer than the
//! threshold on *both* axes. Cheaper than a distance test and close enough
//! for square sprites.

use glam::Vec2;

/// Result of testing a pursuer against the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Absolute per-axis separation between the two centers
    pub separation: Vec2,
}

/// Axis-aligned proximity test between two centers
///
/// Strict comparison: centers exactly `threshold` apart on an axis do not collide.
pub fn proximity_collision(a: Vec2, b: Vec2, threshold: f32) -> CollisionResult {
    let separation = (a - b).abs();
    CollisionResult {
        hit: separation.x < threshold && separation.y < threshold,
        separation,
    }
}

/// Unit direction from `from` toward `to`
///
/// A zero-length vector divides by 1 instead, yielding a zero direction.
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    let len = delta.length();
    let len = if len > 0.0 { len } else { 1.0 };
    delta / len
}
