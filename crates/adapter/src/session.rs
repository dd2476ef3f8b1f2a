//! Session registry - one owned engine per session id
//!
//! Each session owns its engine outright; "new" swaps in a fresh engine for that
//! id only. The registry also latches the game-over flag that the engine itself
//! does not keep: once a gravity step or action fails to spawn, further moves
//! and ticks on that session are refused until the next "new".
//!
//! The registry is plain synchronous state. The server wraps it in a mutex so
//! mutating calls against one engine are serialized.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use crate::core::{apply_action, tick, EngineConfig, EngineError, GameEngine, GameSnapshot};
use crate::protocol::ErrorCode;
use crate::types::GameAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Creating another session would exceed the cap
    Limit { max_sessions: usize },
    /// The session's game has ended
    GameOver,
    /// The configured board could not be built
    Engine(EngineError),
}

impl SessionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::Limit { .. } => ErrorCode::SessionLimit,
            SessionError::GameOver => ErrorCode::GameOver,
            SessionError::Engine(_) => ErrorCode::Internal,
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Limit { max_sessions } => {
                write!(f, "session limit reached ({} sessions)", max_sessions)
            }
            SessionError::GameOver => write!(f, "game is over; send new to restart"),
            SessionError::Engine(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<EngineError> for SessionError {
    fn from(value: EngineError) -> Self {
        SessionError::Engine(value)
    }
}

/// One live game
#[derive(Debug, Clone)]
pub struct Session {
    engine: GameEngine,
    game_over: bool,
}

impl Session {
    fn new(engine: GameEngine) -> Self {
        Self {
            engine,
            game_over: false,
        }
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.engine.snapshot(self.game_over)
    }
}

/// Session id -> owned engine
#[derive(Debug)]
pub struct SessionRegistry {
    config: EngineConfig,
    max_sessions: usize,
    sessions: HashMap<String, Session>,
}

impl SessionRegistry {
    pub fn new(config: EngineConfig, max_sessions: usize) -> Self {
        Self {
            config,
            max_sessions: max_sessions.max(1),
            sessions: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Session> {
        self.sessions.remove(id)
    }

    fn check_capacity(&self, id: &str) -> Result<(), SessionError> {
        if !self.sessions.contains_key(id) && self.sessions.len() >= self.max_sessions {
            return Err(SessionError::Limit {
                max_sessions: self.max_sessions,
            });
        }
        Ok(())
    }

    fn get_or_create(&mut self, id: &str) -> Result<&mut Session, SessionError> {
        self.check_capacity(id)?;
        match self.sessions.entry(id.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let engine = self.config.new_engine()?;
                Ok(entry.insert(Session::new(engine)))
            }
        }
    }

    /// Start a fresh game for `id`, replacing any existing one
    pub fn new_game(&mut self, id: &str) -> Result<GameSnapshot, SessionError> {
        self.check_capacity(id)?;
        let session = Session::new(self.config.new_engine()?);
        let snap = session.snapshot();
        self.sessions.insert(id.to_string(), session);
        Ok(snap)
    }

    /// Current state, creating the session on first access
    pub fn state(&mut self, id: &str) -> Result<GameSnapshot, SessionError> {
        Ok(self.get_or_create(id)?.snapshot())
    }

    /// Apply a player action
    pub fn apply(&mut self, id: &str, action: GameAction) -> Result<GameSnapshot, SessionError> {
        let session = self.get_or_create(id)?;
        if session.game_over {
            return Err(SessionError::GameOver);
        }
        let outcome = apply_action(&mut session.engine, action);
        session.game_over = outcome.game_over;
        Ok(session.snapshot())
    }

    /// One gravity step
    pub fn tick(&mut self, id: &str) -> Result<GameSnapshot, SessionError> {
        let session = self.get_or_create(id)?;
        if session.game_over {
            return Err(SessionError::GameOver);
        }
        let outcome = tick(&mut session.engine);
        session.game_over = outcome.game_over;
        Ok(session.snapshot())
    }
}
