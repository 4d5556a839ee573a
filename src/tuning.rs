//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`] so a host can override them
//! without rebuilding. Defaults match `crate::consts`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::difficulty::DifficultyCurve;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Player ===
    /// Movement speed (px/sec)
    pub player_speed: f32,
    /// Clamp margin from each arena edge
    pub player_half_size: f32,

    // === Pursuers ===
    pub pursuer_base_speed: f32,
    pub pursuer_half_size: f32,
    pub spawn_margin: f32,
    pub max_pursuers: usize,
    pub collision_threshold: f32,

    // === Difficulty ===
    pub difficulty: DifficultyCurve,

    // === Joystick ===
    pub joystick_radius: f32,
    pub joystick_region_fraction: f32,
    pub joystick_anchor_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            player_speed: PLAYER_SPEED,
            player_half_size: PLAYER_HALF_SIZE,

            pursuer_base_speed: PURSUER_BASE_SPEED,
            pursuer_half_size: PURSUER_HALF_SIZE,
            spawn_margin: SPAWN_MARGIN,
            max_pursuers: MAX_PURSUERS,
            collision_threshold: COLLISION_THRESHOLD,

            difficulty: DifficultyCurve::default(),

            joystick_radius: JOYSTICK_RADIUS,
            joystick_region_fraction: JOYSTICK_REGION_FRACTION,
            joystick_anchor_margin: JOYSTICK_ANCHOR_MARGIN,
        }
    }
}

impl Tuning {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bot_dodger_tuning";

    /// Arena size as a vector
    #[inline]
    pub fn arena(&self) -> Vec2 {
        Vec2::new(self.arena_width, self.arena_height)
    }

    /// Arena center (player start position)
    #[inline]
    pub fn arena_center(&self) -> Vec2 {
        self.arena() / 2.0
    }

    /// Parse tuning from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Clamp out-of-range values into something the simulation can run with
    pub fn sanitized(mut self) -> Self {
        let defaults = Tuning::default();

        fn positive(name: &str, value: f32, fallback: f32) -> f32 {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                log::warn!("Tuning: {} = {} is invalid, using {}", name, value, fallback);
                fallback
            }
        }

        fn non_negative(name: &str, value: f32, fallback: f32) -> f32 {
            if value.is_finite() && value >= 0.0 {
                value
            } else {
                log::warn!("Tuning: {} = {} is invalid, using {}", name, value, fallback);
                fallback
            }
        }

        self.arena_width = positive("arena_width", self.arena_width, defaults.arena_width);
        self.arena_height = positive("arena_height", self.arena_height, defaults.arena_height);
        self.player_speed = non_negative("player_speed", self.player_speed, defaults.player_speed);
        self.player_half_size =
            non_negative("player_half_size", self.player_half_size, defaults.player_half_size);
        self.pursuer_base_speed = non_negative(
            "pursuer_base_speed",
            self.pursuer_base_speed,
            defaults.pursuer_base_speed,
        );
        self.pursuer_half_size =
            non_negative("pursuer_half_size", self.pursuer_half_size, defaults.pursuer_half_size);
        self.spawn_margin = non_negative("spawn_margin", self.spawn_margin, defaults.spawn_margin);
        self.collision_threshold = non_negative(
            "collision_threshold",
            self.collision_threshold,
            defaults.collision_threshold,
        );
        self.joystick_radius =
            positive("joystick_radius", self.joystick_radius, defaults.joystick_radius);
        self.joystick_anchor_margin = non_negative(
            "joystick_anchor_margin",
            self.joystick_anchor_margin,
            defaults.joystick_anchor_margin,
        );

        let fraction = self.joystick_region_fraction;
        if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
            log::warn!(
                "Tuning: joystick_region_fraction = {} is invalid, using {}",
                fraction,
                defaults.joystick_region_fraction
            );
            self.joystick_region_fraction = defaults.joystick_region_fraction;
        }

        self.difficulty = self.difficulty.sanitized();
        self
    }

    /// Load tuning overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning overrides from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring malformed tuning overrides: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
