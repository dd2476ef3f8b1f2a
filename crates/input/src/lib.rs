//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] plus the
//! pause/restart/quit commands the interactive loop handles itself.

pub mod map;

pub use blocktris_types as types;

pub use map::{handle_key_event, should_pause, should_quit, should_restart};
