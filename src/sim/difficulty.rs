//! Difficulty ramp
//!
//! Spawn interval and pursuer speed bonus are pure functions of whole
//! elapsed seconds. Both ramps are linear and clamped, so there is no state
//! to reset: a restart simply starts from t = 0 again.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Linear difficulty curve with a floor on spawn interval and a ceiling on speed bonus
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyCurve {
    /// Spawn interval at t = 0 (ms)
    pub start_interval_ms: f32,
    /// Spawn interval never drops below this (ms)
    pub min_interval_ms: f32,
    /// Interval reduction per elapsed second (ms)
    pub interval_decay_ms: f32,
    /// Speed bonus gained per elapsed second (px/sec)
    pub speed_bonus_per_sec: f32,
    /// Speed bonus never exceeds this (px/sec)
    pub max_speed_bonus: f32,
}

impl Default for DifficultyCurve {
    fn default() -> Self {
        Self {
            start_interval_ms: START_SPAWN_INTERVAL_MS,
            min_interval_ms: MIN_SPAWN_INTERVAL_MS,
            interval_decay_ms: SPAWN_INTERVAL_DECAY_MS,
            speed_bonus_per_sec: SPEED_BONUS_PER_SEC,
            max_speed_bonus: MAX_SPEED_BONUS,
        }
    }
}

impl DifficultyCurve {
    /// Milliseconds between spawns after `elapsed_secs` whole seconds
    pub fn spawn_interval_ms(&self, elapsed_secs: u64) -> f32 {
        let t = elapsed_secs as f32;
        (self.start_interval_ms - self.interval_decay_ms * t)
            .clamp(self.min_interval_ms, self.start_interval_ms)
    }

    /// Extra pursuer speed (px/sec) after `elapsed_secs` whole seconds
    pub fn speed_bonus(&self, elapsed_secs: u64) -> f32 {
        let t = elapsed_secs as f32;
        (self.speed_bonus_per_sec * t).clamp(0.0, self.max_speed_bonus)
    }

    /// Keep the curve well-formed: positive floor, floor <= start, non-negative slopes
    pub(crate) fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let finite_or = |v: f32, d: f32| if v.is_finite() { v } else { d };

        self.min_interval_ms = finite_or(self.min_interval_ms, defaults.min_interval_ms).max(1.0);
        self.start_interval_ms =
            finite_or(self.start_interval_ms, defaults.start_interval_ms).max(self.min_interval_ms);
        self.interval_decay_ms = finite_or(self.interval_decay_ms, defaults.interval_decay_ms).max(0.0);
        self.speed_bonus_per_sec =
            finite_or(self.speed_bonus_per_sec, defaults.speed_bonus_per_sec).max(0.0);
        self.max_speed_bonus = finite_or(self.max_speed_bonus, defaults.max_speed_bonus).max(0.0);

        if self != Self::default() {
            log::debug!("Custom difficulty curve: {:?}", self);
        }
        self
    }
}
