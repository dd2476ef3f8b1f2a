//! Terminal rendering for interactive play.
//!
//! Snapshots are drawn into a [`FrameBuffer`] by [`GameView`] (pure, testable)
//! and flushed by [`TerminalRenderer`], which only rewrites changed cells.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blocktris_core as core;
pub use blocktris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::{AnchorY, GameView, Overlay, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
