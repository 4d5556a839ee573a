//! Platform abstraction layer
//!
//! Host-facing input plumbing. Browser (or native) event callbacks translate
//! raw events into [`input::InputEvent`]s and push them into the session's
//! queue; the simulation drains the queue at the start of each frame.

pub mod input;

pub use input::{InputEvent, InputQueue, Key, KeyState};
