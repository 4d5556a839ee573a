//! Pursuer spawning
//!
//! Frame time is accumulated and consumed one spawn interval at a time, so a
//! long frame (backgrounded tab, debugger pause) catches up with several
//! spawns instead of silently dropping them.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Chat bubble lines carried by pursuers
pub const BUBBLE_LINES: [&str; 10] = [
    "Link wallet to claim",
    "Urgent: wallet compromised",
    "Send 0.5 SOL to verify",
    "AirDrop ending in 5 mins",
    "Click to mint for free",
    "Support here: dm admin",
    "Your account is flagged",
    "Claim rewards now",
    "We need your seed phrase",
    "Verify to unlock access",
];

/// Arena edge a pursuer enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];
}

/// Spawn-timer accumulator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnController {
    timer_ms: f32,
}

impl SpawnController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated time not yet consumed by a spawn
    pub fn timer_ms(&self) -> f32 {
        self.timer_ms
    }

    pub fn reset(&mut self) {
        self.timer_ms = 0.0;
    }

    /// Add a frame's time and return how many pursuers to spawn now
    ///
    /// One interval is consumed per spawn. Once `live + spawns` reaches `cap`
    /// the remaining time is kept in the accumulator.
    pub fn advance(&mut self, delta_ms: f32, interval_ms: f32, live: usize, cap: usize) -> usize {
        self.timer_ms += delta_ms.max(0.0);

        // A non-positive interval would never drain the accumulator
        let interval_ms = interval_ms.max(1.0);

        let mut spawns = 0;
        while self.timer_ms >= interval_ms && live + spawns < cap {
            self.timer_ms -= interval_ms;
            spawns += 1;
        }
        spawns
    }
}

/// Position just outside the given edge, uniform along it
pub fn edge_position<R: Rng>(rng: &mut R, edge: Edge, arena: Vec2, margin: f32) -> Vec2 {
    match edge {
        Edge::Left => Vec2::new(-margin, rng.random_range(0.0..=arena.y)),
        Edge::Right => Vec2::new(arena.x + margin, rng.random_range(0.0..=arena.y)),
        Edge::Top => Vec2::new(rng.random_range(0.0..=arena.x), -margin),
        Edge::Bottom => Vec2::new(rng.random_range(0.0..=arena.x), arena.y + margin),
    }
}

/// Random off-screen spawn position on one of the four edges
pub fn spawn_position<R: Rng>(rng: &mut R, arena: Vec2, margin: f32) -> Vec2 {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    edge_position(rng, edge, arena, margin)
}

/// Random bubble line index
pub fn pick_line<R: Rng>(rng: &mut R) -> usize {
    rng.random_range(0..BUBBLE_LINES.len())
}
