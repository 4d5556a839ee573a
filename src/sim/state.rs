//! Game state and core simulation types
//!
//! One [`GameState`] is one game instance: it owns the player, the swarm,
//! the joystick, timers and the pending input queue. Nothing is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::joystick::Joystick;
use super::spawn::{self, BUBBLE_LINES, SpawnController};
use super::swarm::PursuerSwarm;
use crate::platform::input::{InputEvent, InputQueue, KeyState};
use crate::tuning::Tuning;
use crate::{clamp_to_arena, format_uptime, hud};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Caught; world is frozen until restart
    GameOver,
}

/// The player's token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// px/sec
    pub speed: f32,
    /// Clamp margin from the arena edges
    pub half_size: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.arena_center(),
            speed: tuning.player_speed,
            half_size: tuning.player_half_size,
        }
    }

    /// Move along `intent` for `dt` seconds, staying inside the arena
    pub fn step(&mut self, intent: Vec2, dt: f32, arena: Vec2) {
        let next = self.pos + intent * self.speed * dt;
        self.pos = clamp_to_arena(next, arena, self.half_size);
    }
}

/// Complete state of one game session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance values this session was built with
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn placement RNG (keeps advancing across restarts)
    pub(crate) rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    pub player: Player,
    pub swarm: PursuerSwarm,
    pub joystick: Joystick,
    pub keys: KeyState,
    pub spawner: SpawnController,
    /// Time survived this round (ms)
    pub(crate) elapsed_ms: f64,
    /// Events waiting for the next frame
    pub(crate) events: InputQueue,
}

impl GameState {
    /// Create a new game state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Out-of-range tuning values are clamped before the session uses them
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            player: Player::new(&tuning),
            swarm: PursuerSwarm::new(),
            joystick: Joystick::new(&tuning),
            keys: KeyState::default(),
            spawner: SpawnController::new(),
            elapsed_ms: 0.0,
            events: InputQueue::new(),
            tuning,
        }
    }

    /// Queue an input event; it is applied at the start of the next tick
    pub fn push_event(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Number of events waiting for the next tick
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Whole seconds survived this round
    pub fn elapsed_secs(&self) -> u64 {
        (self.elapsed_ms / 1000.0).floor() as u64
    }

    /// `mm:ss` label for the HUD
    pub fn uptime(&self) -> String {
        format_uptime(self.elapsed_secs())
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Spawn one pursuer just outside a random arena edge
    pub fn spawn_pursuer(&mut self) -> u32 {
        let pos = spawn::spawn_position(
            &mut self.rng,
            self.tuning.arena(),
            self.tuning.spawn_margin,
        );
        let line = spawn::pick_line(&mut self.rng);
        self.swarm.spawn(
            pos,
            self.tuning.pursuer_base_speed,
            self.tuning.pursuer_half_size,
            line,
        )
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        let game_over = self.is_game_over();
        Snapshot {
            phase: self.phase,
            elapsed_secs: self.elapsed_secs(),
            uptime: self.uptime(),
            player: self.player.pos,
            pursuers: self
                .swarm
                .iter()
                .map(|p| PursuerView {
                    id: p.id,
                    pos: p.pos,
                    half_size: p.half_size,
                    line: BUBBLE_LINES[p.line % BUBBLE_LINES.len()].to_string(),
                })
                .collect(),
            joystick: self.joystick.active.then(|| JoystickView {
                center: self.joystick.center,
                knob: self.joystick.knob(),
                radius: self.joystick.radius,
            }),
            game_over_title: game_over.then(|| hud::GAME_OVER_TITLE.to_string()),
            game_over_subtitle: game_over.then(|| hud::GAME_OVER_SUBTITLE.to_string()),
        }
    }
}

/// Pursuer as seen by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PursuerView {
    pub id: u32,
    pub pos: Vec2,
    pub half_size: f32,
    /// Chat bubble text drawn above the pursuer
    pub line: String,
}

/// Joystick base and knob while a touch is active
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JoystickView {
    pub center: Vec2,
    pub knob: Vec2,
    pub radius: f32,
}

/// Everything the host needs to draw a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub elapsed_secs: u64,
    pub uptime: String,
    pub player: Vec2,
    pub pursuers: Vec<PursuerView>,
    pub joystick: Option<JoystickView>,
    pub game_over_title: Option<String>,
    pub game_over_subtitle: Option<String>,
}
