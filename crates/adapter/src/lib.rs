//! Adapter module - remote play via TCP socket with a JSON protocol
//!
//! This module exposes the engine to remote clients. Each request names a
//! session; every session owns its own engine, so clients never share state
//! unless they use the same session id.
//!
//! # Protocol Overview
//!
//! The adapter implements a **line-delimited JSON protocol** over TCP. Each
//! request gets exactly one reply line, echoing the request `seq`.
//!
//! ## Client → Server
//!
//! - **new**: start or replace the session's game
//! - **state**: read the session's state (creates the session on first use)
//! - **move**: apply `direction` = `left` | `right` | `down` | `rotate` | `drop`
//! - **tick**: one gravity step (down, or lock + spawn)
//!
//! ## Server → Client
//!
//! - **state**: board, piece, piece_type, piece_x, piece_y, next_piece,
//!   score, level, lines, game_over
//! - **error**: `code` + `message` (`invalid_json`, `invalid_command`,
//!   `invalid_direction`, `game_over`, `session_limit`, `internal`)
//!
//! Requests without a `session` field use a per-connection session that is
//! dropped when the connection closes.
//!
//! # Environment Variables
//!
//! - `BLOCKTRIS_HOST`: Bind address (default: "127.0.0.1")
//! - `BLOCKTRIS_PORT`: Port number (default: 7878)
//! - `BLOCKTRIS_MAX_SESSIONS`: Session cap (default: 64)
//! - `BLOCKTRIS_LOG_PATH`: Optional wire log file
//! - `BLOCKTRIS_BOARD_WIDTH` / `BLOCKTRIS_BOARD_HEIGHT` / `BLOCKTRIS_SEED`: engine settings
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"new","seq":1,"session":"alice"}
//! Server -> Client: {"type":"state","seq":1,"session":"alice","board":[[0,...],...],"piece":[[1,0],[0,1],[1,1],[2,1]],"piece_type":"T","piece_x":3,"piece_y":0,"next_piece":"I","score":0,"level":1,"lines":0,"game_over":false}
//! Client -> Server: {"type":"move","seq":2,"session":"alice","direction":"drop"}
//! Client -> Server: {"type":"tick","seq":3,"session":"alice"}
//! ```
//!
//! # Testing
//!
//! ```bash
//! nc 127.0.0.1 7878
//! {"type":"state","seq":1}
//! ```

pub mod protocol;
pub mod server;
pub mod session;

pub use blocktris_core as core;
pub use blocktris_types as types;

pub use protocol::*;
pub use server::{connection_session_id, handle_line, run_server, ServerConfig};
pub use session::{Session, SessionError, SessionRegistry};
