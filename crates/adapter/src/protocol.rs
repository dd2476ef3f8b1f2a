//! Protocol module - JSON message types for the session server
//!
//! Line-delimited JSON: one request object per line, one reply object per line.
//! Every message carries `type` and `seq`; replies echo the request `seq`.

use serde::{Deserialize, Serialize};

use crate::core::GameSnapshot;
use crate::types::GameAction;

// ============== Client -> Server Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// Start (or replace) the session's game
    New,
    /// Read the current state
    State,
    /// Apply one action named by `direction`
    Move,
    /// One gravity step
    Tick,
}

/// Raw request as it appears on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMessage {
    #[serde(rename = "type")]
    pub kind: RequestKind,
    #[serde(default)]
    pub seq: u64,
    /// Session id; connections without one share a per-connection session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
    /// `left`, `right`, `down`, `rotate` or `drop` (case-insensitive); `move` only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

/// Validated request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    New,
    State,
    Move(GameAction),
    Tick,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    pub seq: u64,
    pub session: Option<String>,
    pub request: Request,
}

// ============== Server -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateType {
    #[serde(rename = "state")]
    State,
}

impl Default for StateType {
    fn default() -> Self {
        Self::State
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

impl Default for ErrorType {
    fn default() -> Self {
        Self::Error
    }
}

/// Full game state reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: StateType,
    pub seq: u64,
    pub session: String,
    pub board: Vec<Vec<u8>>,
    pub piece: Vec<[i32; 2]>,
    pub piece_type: Option<String>,
    pub piece_x: i32,
    pub piece_y: i32,
    pub next_piece: Option<String>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub game_over: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Line is not a valid request object
    InvalidJson,
    /// Request is well-formed JSON but missing required fields
    InvalidCommand,
    /// `direction` is not one of the five actions
    InvalidDirection,
    /// The session's game has ended; only `new` and `state` are accepted
    GameOver,
    /// Creating the session would exceed the server's session cap
    SessionLimit,
    /// The engine could not be constructed
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub code: ErrorCode,
    pub message: String,
}

/// Any server reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reply {
    State(StateMessage),
    Error(ErrorMessage),
}

impl Reply {
    /// Serialize to a single JSON line (without the trailing newline)
    pub fn to_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn seq(&self) -> u64 {
        match self {
            Reply::State(s) => s.seq,
            Reply::Error(e) => e.seq,
        }
    }
}

/// Parse and validate one request line
pub fn parse_request(line: &str) -> Result<ParsedRequest, ErrorMessage> {
    let raw: RequestMessage = serde_json::from_str(line).map_err(|e| {
        create_error(
            extract_seq_best_effort(line).unwrap_or(0),
            ErrorCode::InvalidJson,
            &e.to_string(),
        )
    })?;

    let request = match raw.kind {
        RequestKind::New => Request::New,
        RequestKind::State => Request::State,
        RequestKind::Tick => Request::Tick,
        RequestKind::Move => {
            let Some(direction) = raw.direction.as_deref() else {
                return Err(create_error(
                    raw.seq,
                    ErrorCode::InvalidCommand,
                    "move requires a direction",
                ));
            };
            match GameAction::from_str(direction) {
                Some(action) => Request::Move(action),
                None => {
                    return Err(create_error(
                        raw.seq,
                        ErrorCode::InvalidDirection,
                        &format!("unknown direction: {}", direction),
                    ))
                }
            }
        }
    };

    Ok(ParsedRequest {
        seq: raw.seq,
        session: raw.session,
        request,
    })
}

/// Pull `seq` out of a line that failed to parse, so the error can still echo it.
pub fn extract_seq_best_effort(s: &str) -> Option<u64> {
    let start = s.find("\"seq\"")?;
    let after_key = &s[start + 5..];
    let colon = after_key.find(':')?;
    let rest = after_key[colon + 1..].trim_start();
    let end = rest
        .as_bytes()
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if end == 0 {
        return None;
    }
    rest[..end].parse::<u64>().ok()
}

// ============== Helper Functions ==============

/// Create an error reply
pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        code,
        message: message.to_string(),
    }
}

/// Build a state reply from an engine snapshot
pub fn build_state(seq: u64, session: &str, snap: &GameSnapshot) -> StateMessage {
    StateMessage {
        msg_type: StateType::State,
        seq,
        session: session.to_string(),
        board: snap.board.clone(),
        piece: snap.piece.iter().map(|&(x, y)| [x, y]).collect(),
        piece_type: snap.piece_kind.map(|k| k.as_str().to_string()),
        piece_x: snap.piece_x,
        piece_y: snap.piece_y,
        next_piece: snap.next_piece.map(|k| k.as_str().to_string()),
        score: snap.score,
        level: snap.level,
        lines: snap.lines,
        game_over: snap.game_over,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameEngine;

    #[test]
    fn test_parse_move_case_insensitive() {
        let parsed =
            parse_request(r#"{"type":"move","seq":4,"direction":"LEFT","session":"a"}"#).unwrap();
        assert_eq!(parsed.seq, 4);
        assert_eq!(parsed.session.as_deref(), Some("a"));
        assert_eq!(parsed.request, Request::Move(GameAction::MoveLeft));
    }

    #[test]
    fn test_parse_simple_requests() {
        assert_eq!(
            parse_request(r#"{"type":"new","seq":1}"#).unwrap().request,
            Request::New
        );
        assert_eq!(
            parse_request(r#"{"type":"state"}"#).unwrap().request,
            Request::State
        );
        assert_eq!(
            parse_request(r#"{"type":"tick","seq":9}"#).unwrap().request,
            Request::Tick
        );
    }

    #[test]
    fn test_parse_errors() {
        let err = parse_request(r#"{"type":"move","seq":2}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCommand);
        assert_eq!(err.seq, 2);

        let err = parse_request(r#"{"type":"move","seq":3,"direction":"hold"}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidDirection);

        let err = parse_request(r#"{"type":"warp","seq":5}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidJson);
        assert_eq!(err.seq, 5);

        let err = parse_request("not json").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidJson);
        assert_eq!(err.seq, 0);
    }

    #[test]
    fn test_extract_seq_best_effort() {
        assert_eq!(extract_seq_best_effort(r#"{"seq": 17, "type": 1}"#), Some(17));
        assert_eq!(extract_seq_best_effort(r#"{"seq":"x"}"#), None);
        assert_eq!(extract_seq_best_effort("{}"), None);
    }

    #[test]
    fn test_state_message_shape() {
        let engine = GameEngine::with_seed(10, 20, 1).unwrap();
        let state = build_state(7, "s1", &engine.snapshot(false));
        let v = serde_json::to_value(Reply::State(state)).unwrap();

        assert_eq!(v["type"], "state");
        assert_eq!(v["seq"], 7);
        assert_eq!(v["session"], "s1");
        assert_eq!(v["board"].as_array().unwrap().len(), 20);
        assert_eq!(v["board"][0].as_array().unwrap().len(), 10);
        assert_eq!(v["piece"].as_array().unwrap().len(), 4);
        assert_eq!(v["piece"][0].as_array().unwrap().len(), 2);
        assert_eq!(v["piece_x"], 3);
        assert_eq!(v["piece_y"], 0);
        assert_eq!(v["score"], 0);
        assert_eq!(v["level"], 1);
        assert_eq!(v["lines"], 0);
        assert_eq!(v["game_over"], false);
        assert!(v["piece_type"].as_str().unwrap().len() == 1);
        assert!(v["next_piece"].is_string());
    }

    #[test]
    fn test_error_message_shape() {
        let err = create_error(3, ErrorCode::GameOver, "game is over");
        let v = serde_json::to_value(Reply::Error(err)).unwrap();
        assert_eq!(v["type"], "error");
        assert_eq!(v["code"], "game_over");
        assert_eq!(v["seq"], 3);
    }

    #[test]
    fn test_every_action_name_parses() {
        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::MoveDown,
            GameAction::Rotate,
            GameAction::HardDrop,
        ] {
            let line = format!(r#"{{"type":"move","seq":1,"direction":"{}"}}"#, action.as_str());
            assert_eq!(parse_request(&line).unwrap().request, Request::Move(action));
        }
    }
}
