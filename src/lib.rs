//! Bot Dodger - A top-down avoidance arcade game
//!
//! Core modules:
//! - `sim`: Simulation core (difficulty ramp, spawning, pursuit, game state)
//! - `platform`: Host input plumbing (keys, pointer events, event queue)
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 450.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 220.0; // px/sec
    /// Margin the player is clamped to from each arena edge
    pub const PLAYER_HALF_SIZE: f32 = 12.0;

    /// Pursuer defaults
    pub const PURSUER_BASE_SPEED: f32 = 70.0; // px/sec
    pub const PURSUER_HALF_SIZE: f32 = 9.0;
    /// Pursuers spawn this far outside the arena edge
    pub const SPAWN_MARGIN: f32 = 20.0;
    /// Population cap
    pub const MAX_PURSUERS: usize = 60;

    /// Axis-aligned hit distance between player and pursuer centers
    pub const COLLISION_THRESHOLD: f32 = 16.0;

    /// Difficulty ramp (from 900ms down to 260ms, speed bonus up to 180 px/s)
    pub const START_SPAWN_INTERVAL_MS: f32 = 900.0;
    pub const MIN_SPAWN_INTERVAL_MS: f32 = 260.0;
    pub const SPAWN_INTERVAL_DECAY_MS: f32 = 10.0;
    pub const SPEED_BONUS_PER_SEC: f32 = 1.2;
    pub const MAX_SPEED_BONUS: f32 = 180.0;

    /// Touch joystick
    pub const JOYSTICK_RADIUS: f32 = 44.0;
    pub const JOYSTICK_KNOB_RADIUS: f32 = 18.0;
    /// Pointer-down must start left of this fraction of the arena width
    pub const JOYSTICK_REGION_FRACTION: f32 = 0.55;
    /// Anchor is kept at least this far from the arena edges
    pub const JOYSTICK_ANCHOR_MARGIN: f32 = 60.0;
    /// Idle anchor offset from the bottom-left corner
    pub const JOYSTICK_IDLE_OFFSET: f32 = 90.0;
}

/// HUD copy shown by the presentation layer
pub mod hud {
    pub const TITLE: &str = "Dev Bot Dodger";
    pub const CONTROLS_HINT: &str = "WASD/Arrows • Touch joystick";
    pub const GAME_OVER_TITLE: &str = "You got rugged.";
    pub const GAME_OVER_SUBTITLE: &str = "Tap to retry • Press R";
}

/// Clamp a point into `[margin, size - margin]` on both axes
#[inline]
pub fn clamp_to_arena(pos: Vec2, arena: Vec2, margin: f32) -> Vec2 {
    let min = Vec2::splat(margin);
    let max = (arena - Vec2::splat(margin)).max(min);
    pos.clamp(min, max)
}

/// Format whole seconds as `mm:ss` (minutes keep growing past 99)
pub fn format_uptime(elapsed_secs: u64) -> String {
    format!("{:02}:{:02}", elapsed_secs / 60, elapsed_secs % 60)
}
