//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **no dependencies** on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Unit tests for every rule
//! - **Portable**: Runs behind the terminal loop and the session server alike
//!
//! # Module Structure
//!
//! - [`board`]: fixed-size game board with collision queries and line clearing
//! - [`engine`]: the game engine (active/next piece, score, level, lines)
//! - [`pieces`]: tetromino shapes and the clockwise rotation rule
//! - [`rng`]: uniform random piece generation
//! - [`scoring`]: line clear and hard drop points, level progression
//! - [`snapshot`]: owned state copies for renderers and clients
//! - [`step`]: gravity/action sequences with spawn and game-over follow-up
//! - [`config`]: board size and seed from the environment
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: every draw picks one of the 7 kinds with equal odds
//! - **Simple rotation**: rotate in place if the result fits; no kicks; O never rotates
//! - **Immediate lock**: a piece locks the moment a down move is blocked
//! - **Scoring**: 100/300/500/800 × level for 1-4 lines; hard drop +1 per row
//! - **Levels**: `1 + lines / 10`
//!
//! # Example
//!
//! ```
//! use blocktris_core::GameEngine;
//!
//! let mut game = GameEngine::with_seed(10, 20, 12345).unwrap();
//!
//! game.move_right();
//! game.rotate();
//! game.hard_drop();
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! assert!(game.spawn_next_piece());
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod step;

pub use blocktris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::EngineConfig;
pub use engine::{ActivePiece, GameEngine};
pub use error::EngineError;
pub use pieces::{rotate_cw, spawn_shape, PieceShape};
pub use rng::SimpleRng;
pub use scoring::{hard_drop_score, level_for_lines, line_clear_score};
pub use snapshot::GameSnapshot;
pub use step::{apply_action, tick, StepOutcome};
