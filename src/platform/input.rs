//! Input events and keyboard state
//!
//! Platform code pushes events as they arrive; game code reads the resulting
//! state once per frame.

use std::collections::VecDeque;

use glam::Vec2;

use crate::sim::joystick::PointerId;

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    W,
    A,
    S,
    D,
    /// Restart after game over
    R,
}

impl Key {
    /// Keys that contribute to movement
    pub const DIRECTIONAL: [Key; 8] = [
        Key::ArrowUp,
        Key::ArrowDown,
        Key::ArrowLeft,
        Key::ArrowRight,
        Key::W,
        Key::A,
        Key::S,
        Key::D,
    ];

    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "w" | "W" => Some(Key::W),
            "a" | "A" => Some(Key::A),
            "s" | "S" => Some(Key::S),
            "d" | "D" => Some(Key::D),
            "r" | "R" => Some(Key::R),
            _ => None,
        }
    }

    /// Screen-space direction (y grows downward)
    pub fn direction(self) -> Vec2 {
        match self {
            Key::ArrowUp | Key::W => Vec2::new(0.0, -1.0),
            Key::ArrowDown | Key::S => Vec2::new(0.0, 1.0),
            Key::ArrowLeft | Key::A => Vec2::new(-1.0, 0.0),
            Key::ArrowRight | Key::D => Vec2::new(1.0, 0.0),
            Key::R => Vec2::ZERO,
        }
    }

    #[inline]
    fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// Currently held keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    held: u16,
}

impl KeyState {
    pub fn press(&mut self, key: Key) {
        self.held |= key.bit();
    }

    pub fn release(&mut self, key: Key) {
        self.held &= !key.bit();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held & key.bit() != 0
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Raw keyboard axis: -1, 0 or +1 per axis
    ///
    /// Arrow and WASD keys for the same direction count once.
    pub fn axis(&self) -> Vec2 {
        const PAIRS: [(Key, Key); 4] = [
            (Key::ArrowUp, Key::W),
            (Key::ArrowDown, Key::S),
            (Key::ArrowLeft, Key::A),
            (Key::ArrowRight, Key::D),
        ];
        PAIRS
            .into_iter()
            .filter(|&(arrow, letter)| self.is_held(arrow) || self.is_held(letter))
            .fold(Vec2::ZERO, |axis, (arrow, _)| axis + arrow.direction())
    }
}

/// Raw input as delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    PointerDown { id: PointerId, pos: Vec2 },
    PointerMove { id: PointerId, pos: Vec2 },
    PointerUp { id: PointerId, pos: Vec2 },
    PointerCancel { id: PointerId },
    /// Window lost focus; key-up events will not arrive for held keys
    FocusLost,
}

/// Single-consumer event buffer, drained at the next frame boundary
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for processing at the next frame boundary
    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Take every queued event in arrival order
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
