//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Variable frame delta in, state mutations out
//! - Seeded RNG only
//! - Stable iteration order (spawn order)

pub mod collision;
pub mod difficulty;
pub mod intent;
pub mod joystick;
pub mod spawn;
pub mod state;
pub mod swarm;
pub mod tick;

pub use collision::{CollisionResult, direction_to, proximity_collision};
pub use difficulty::DifficultyCurve;
pub use intent::movement_intent;
pub use joystick::{Joystick, PointerId};
pub use spawn::{BUBBLE_LINES, Edge, SpawnController};
pub use state::{GamePhase, GameState, JoystickView, Player, PursuerView, Snapshot};
pub use swarm::{Pursuer, PursuerSwarm};
pub use tick::{apply_event, restart, tick};
