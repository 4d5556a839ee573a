//! Pursuer swarm: direct pursuit and hit testing

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{direction_to, proximity_collision};

/// A pursuing bot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pursuer {
    pub id: u32,
    pub pos: Vec2,
    /// Base speed before the difficulty bonus (px/sec)
    pub speed: f32,
    pub half_size: f32,
    /// Index into `spawn::BUBBLE_LINES`
    pub line: usize,
}

impl Pursuer {
    /// Move straight toward `target` at `speed` px/sec for `dt` seconds
    pub fn steer_toward(&mut self, target: Vec2, speed: f32, dt: f32) {
        self.pos += direction_to(self.pos, target) * speed * dt;
    }
}

/// Owns the live pursuers in spawn order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PursuerSwarm {
    pursuers: Vec<Pursuer>,
    /// Next entity ID
    next_id: u32,
}

impl Default for PursuerSwarm {
    fn default() -> Self {
        Self::new()
    }
}

impl PursuerSwarm {
    pub fn new() -> Self {
        Self {
            pursuers: Vec::new(),
            next_id: 1,
        }
    }

    /// Add a pursuer and return its ID
    pub fn spawn(&mut self, pos: Vec2, speed: f32, half_size: f32, line: usize) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.pursuers.push(Pursuer {
            id,
            pos,
            speed,
            half_size,
            line,
        });
        id
    }

    /// Steer every pursuer toward the player, then hit-test it
    ///
    /// Returns the ID of the first pursuer (in spawn order) that ends up
    /// within `threshold` of the player on both axes. Pursuers after it are
    /// not moved this frame.
    pub fn step_all(
        &mut self,
        player_pos: Vec2,
        dt: f32,
        speed_bonus: f32,
        threshold: f32,
    ) -> Option<u32> {
        for pursuer in &mut self.pursuers {
            pursuer.steer_toward(player_pos, pursuer.speed + speed_bonus, dt);

            if proximity_collision(player_pos, pursuer.pos, threshold).hit {
                return Some(pursuer.id);
            }
        }
        None
    }

    /// Remove every pursuer (restart)
    pub fn clear(&mut self) {
        self.pursuers.clear();
    }

    pub fn len(&self) -> usize {
        self.pursuers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pursuers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pursuer> {
        self.pursuers.iter()
    }

    pub fn get(&self, id: u32) -> Option<&Pursuer> {
        self.pursuers.iter().find(|p| p.id == id)
    }
}
