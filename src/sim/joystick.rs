//! Virtual touch joystick
//!
//! Appears where a touch starts on the left part of the arena, the knob
//! follows the pointer within the base radius, and the output is a direction
//! with each axis in [-1, 1]. One pointer owns the stick at a time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::JOYSTICK_IDLE_OFFSET;
use crate::tuning::Tuning;

/// Pointer identifier as reported by the host
pub type PointerId = i32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Joystick {
    pub active: bool,
    /// Pointer that currently owns the stick
    pub pointer_id: Option<PointerId>,
    /// Base center
    pub center: Vec2,
    pub radius: f32,
    /// Knob offset from center, never longer than `radius`
    pub offset: Vec2,
    /// Normalized output, each axis in [-1, 1]
    pub dir: Vec2,
    /// Touches must start left of this x
    region_max_x: f32,
    /// Center is clamped into [margin, arena - margin]
    anchor_margin: f32,
    arena: Vec2,
}

impl Joystick {
    pub fn new(tuning: &Tuning) -> Self {
        let arena = tuning.arena();
        Self {
            active: false,
            pointer_id: None,
            center: Vec2::new(JOYSTICK_IDLE_OFFSET, arena.y - JOYSTICK_IDLE_OFFSET),
            radius: tuning.joystick_radius,
            offset: Vec2::ZERO,
            dir: Vec2::ZERO,
            region_max_x: arena.x * tuning.joystick_region_fraction,
            anchor_margin: tuning.joystick_anchor_margin,
            arena,
        }
    }

    /// Knob position for drawing
    #[inline]
    pub fn knob(&self) -> Vec2 {
        self.center + self.offset
    }

    /// Try to take ownership for a new pointer
    ///
    /// Rejected when a pointer already owns the stick, when the game is not
    /// accepting movement, or when the touch starts right of the input region.
    /// Returns whether the stick was activated.
    pub fn pointer_down(&mut self, id: PointerId, pos: Vec2, playing: bool) -> bool {
        if self.active || !playing || pos.x > self.region_max_x {
            return false;
        }

        self.active = true;
        self.pointer_id = Some(id);
        self.center = crate::clamp_to_arena(pos, self.arena, self.anchor_margin);
        self.offset = Vec2::ZERO;
        self.dir = Vec2::ZERO;
        true
    }

    /// Follow the owning pointer
    pub fn pointer_move(&mut self, id: PointerId, pos: Vec2) {
        if !self.active || self.pointer_id != Some(id) {
            return;
        }

        let v = pos - self.center;
        let len = v.length();
        let len = if len > 0.0 { len } else { 1.0 };

        // Knob cannot leave the base
        let scaled = v * (self.radius / len).min(1.0);
        self.offset = scaled;
        self.dir = (scaled / self.radius).clamp(Vec2::NEG_ONE, Vec2::ONE);
    }

    /// Release on pointer up or cancel from the owning pointer
    pub fn pointer_up(&mut self, id: PointerId) {
        if !self.active || self.pointer_id != Some(id) {
            return;
        }

        self.active = false;
        self.pointer_id = None;
        self.offset = Vec2::ZERO;
        self.dir = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn stick() -> Joystick {
        Joystick::new(&Tuning::default())
    }

    #[test]
    fn test_idle_anchor() {
        let joy = stick();
        assert!(!joy.active);
        assert_eq!(joy.center, Vec2::new(90.0, 360.0));
        assert_eq!(joy.dir, Vec2::ZERO);
    }

    #[test]
    fn test_activate_on_left_side() {
        let mut joy = stick();
        assert!(joy.pointer_down(1, Vec2::new(200.0, 200.0), true));
        assert!(joy.active);
        assert_eq!(joy.pointer_id, Some(1));
        assert_eq!(joy.center, Vec2::new(200.0, 200.0));
    }

    #[test]
    fn test_anchor_clamped_to_margins() {
        let mut joy = stick();
        joy.pointer_down(1, Vec2::new(10.0, 440.0), true);
        assert_eq!(joy.center, Vec2::new(60.0, 390.0));
    }

    #[test]
    fn test_right_side_rejected() {
        let mut joy = stick();
        // 0.55 * 800 = 440
        assert!(!joy.pointer_down(1, Vec2::new(441.0, 200.0), true));
        assert!(!joy.active);

        // Moves from the never-adopted pointer do nothing
        joy.pointer_move(1, Vec2::new(500.0, 200.0));
        assert_eq!(joy.dir, Vec2::ZERO);
    }

    #[test]
    fn test_region_boundary_inclusive() {
        let mut joy = stick();
        assert!(joy.pointer_down(1, Vec2::new(440.0, 200.0), true));
    }

    #[test]
    fn test_rejected_when_not_playing() {
        let mut joy = stick();
        assert!(!joy.pointer_down(1, Vec2::new(100.0, 200.0), false));
        assert!(!joy.active);
    }

    #[test]
    fn test_second_pointer_ignored() {
        let mut joy = stick();
        joy.pointer_down(1, Vec2::new(200.0, 200.0), true);
        assert!(!joy.pointer_down(2, Vec2::new(100.0, 100.0), true));
        assert_eq!(joy.pointer_id, Some(1));
        assert_eq!(joy.center, Vec2::new(200.0, 200.0));

        joy.pointer_move(2, Vec2::new(300.0, 200.0));
        assert_eq!(joy.dir, Vec2::ZERO);

        joy.pointer_up(2);
        assert!(joy.active);
    }

    #[test]
    fn test_partial_deflection() {
        let mut joy = stick();
        joy.pointer_down(1, Vec2::new(200.0, 200.0), true);
        joy.pointer_move(1, Vec2::new(222.0, 200.0));
        assert!((joy.dir.x - 0.5).abs() < 1e-6);
        assert_eq!(joy.dir.y, 0.0);
        assert_eq!(joy.knob(), Vec2::new(222.0, 200.0));
    }

    #[test]
    fn test_knob_clamped_to_radius() {
        let mut joy = stick();
        joy.pointer_down(1, Vec2::new(200.0, 200.0), true);
        joy.pointer_move(1, Vec2::new(200.0, 400.0));
        assert!((joy.offset.length() - 44.0).abs() < 1e-4);
        assert!((joy.dir.y - 1.0).abs() < 1e-6);
        assert!(joy.dir.x.abs() < 1e-6);
    }

    #[test]
    fn test_move_onto_center_is_zero() {
        let mut joy = stick();
        joy.pointer_down(1, Vec2::new(200.0, 200.0), true);
        joy.pointer_move(1, Vec2::new(230.0, 200.0));
        joy.pointer_move(1, Vec2::new(200.0, 200.0));
        assert_eq!(joy.dir, Vec2::ZERO);
        assert!(!joy.dir.x.is_nan());
    }

    #[test]
    fn test_release() {
        let mut joy = stick();
        joy.pointer_down(7, Vec2::new(200.0, 200.0), true);
        joy.pointer_move(7, Vec2::new(250.0, 250.0));
        joy.pointer_up(7);
        assert!(!joy.active);
        assert_eq!(joy.pointer_id, None);
        assert_eq!(joy.dir, Vec2::ZERO);

        // A new pointer can take over
        assert!(joy.pointer_down(8, Vec2::new(100.0, 100.0), true));
    }

    proptest! {
        #[test]
        fn prop_direction_bounded(x in -2000.0f32..2000.0, y in -2000.0f32..2000.0) {
            let mut joy = stick();
            joy.pointer_down(1, Vec2::new(200.0, 200.0), true);
            joy.pointer_move(1, Vec2::new(x, y));
            prop_assert!(joy.dir.x.abs() <= 1.0 && joy.dir.y.abs() <= 1.0);
            prop_assert!(joy.offset.length() <= joy.radius + 1e-3);
        }
    }
}
