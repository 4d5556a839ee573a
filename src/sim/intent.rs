//! Movement intent: keyboard + joystick combined into one direction

use glam::Vec2;

use crate::platform::input::KeyState;

/// Combine held keys and joystick deflection into a unit (or zero) vector
///
/// Contributions are additive. The result is normalized, so diagonals are not
/// faster and partial joystick deflection only picks a direction.
pub fn movement_intent(keys: &KeyState, joystick_dir: Vec2) -> Vec2 {
    let intent = keys.axis() + joystick_dir;
    let len = intent.length();
    if len > 0.0 { intent / len } else { Vec2::ZERO }
}
