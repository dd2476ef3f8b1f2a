//! Game engine module - owns the complete game state
//!
//! This module ties together the board, pieces, RNG and scoring. It handles
//! spawning, movement, rotation, locking and line clears. There is no timing
//! here: gravity is whatever the caller does with [`GameEngine::move_down`].
//!
//! Ordering matters and is fixed:
//!
//! 1. `spawn_next_piece` promotes the lookahead and validates the spawn cell set.
//! 2. A blocked `move_down` locks the piece and clears lines in the same call.
//! 3. Nothing spawns automatically after a lock; the caller does that (see [`crate::step`]).

use crate::board::Board;
use crate::error::EngineError;
use crate::pieces::{rotate_cw, spawn_shape, PieceShape};
use crate::rng::SimpleRng;
use crate::scoring::{hard_drop_score, level_for_lines, line_clear_score};
use crate::snapshot::GameSnapshot;
use crate::types::PieceKind;

/// Active falling piece
///
/// The kind travels with the piece so locking never needs a side lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: PieceShape,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    /// Create a piece of `kind` in its canonical shape at the spawn origin for `board_width`
    pub fn spawn(kind: PieceKind, board_width: u16) -> Self {
        Self {
            kind,
            shape: spawn_shape(kind),
            x: board_width as i32 / 2 - 2,
            y: 0,
        }
    }

    /// Absolute board coordinates of the four minos
    pub fn cells(&self) -> [(i32, i32); 4] {
        self.shape.map(|(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameEngine {
    board: Board,
    active: Option<ActivePiece>,
    next: Option<PieceKind>,
    rng: SimpleRng,
    score: u32,
    level: u32,
    lines: u32,
}

impl GameEngine {
    /// Create a new game with a random seed and spawn the first piece
    pub fn new(width: u16, height: u16) -> Result<Self, EngineError> {
        Self::with_seed(width, height, rand::random())
    }

    /// Create a new game whose piece sequence is fully determined by `seed`
    pub fn with_seed(width: u16, height: u16, seed: u32) -> Result<Self, EngineError> {
        let mut engine = Self {
            board: Board::new(width, height)?,
            active: None,
            next: None,
            rng: SimpleRng::new(seed),
            score: 0,
            level: 1,
            lines: 0,
        };
        // Only boards narrower than the piece reject this spawn; the first
        // step on such a board reports game over.
        engine.spawn_next_piece();
        Ok(engine)
    }

    pub fn width(&self) -> u16 {
        self.board.width()
    }

    pub fn height(&self) -> u16 {
        self.board.height()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Owned copy of the board as color ids (0 = empty)
    pub fn board_grid(&self) -> Vec<Vec<u8>> {
        self.board.to_grid()
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// Offsets of the active piece relative to its origin
    pub fn current_piece(&self) -> Option<PieceShape> {
        self.active.map(|p| p.shape)
    }

    pub fn current_kind(&self) -> Option<PieceKind> {
        self.active.map(|p| p.kind)
    }

    /// Origin of the active piece, `(0, 0)` before the first spawn
    pub fn piece_position(&self) -> (i32, i32) {
        self.active.map_or((0, 0), |p| (p.x, p.y))
    }

    /// The lookahead piece kind
    pub fn next_piece(&self) -> Option<PieceKind> {
        self.next
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Build an owned snapshot. `game_over` is supplied by the caller since the
    /// engine does not track it.
    pub fn snapshot(&self, game_over: bool) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s, game_over);
        s
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot, game_over: bool) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.board = self.board.to_grid();
        out.piece.clear();
        if let Some(active) = self.active {
            out.piece.extend_from_slice(&active.shape);
        }
        out.piece_kind = self.current_kind();
        let (x, y) = self.piece_position();
        out.piece_x = x;
        out.piece_y = y;
        out.next_piece = self.next;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.game_over = game_over;
    }

    /// Spawn the next piece at the top of the board.
    ///
    /// Promotes the lookahead to the active piece and draws a fresh lookahead,
    /// then checks the spawn position. On `false` the promotion is NOT rolled
    /// back: the active piece overlaps the stack and the lookahead has advanced.
    /// Callers must treat `false` as game over and stop mutating the engine.
    pub fn spawn_next_piece(&mut self) -> bool {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.rng.next_piece(),
        };
        self.next = Some(self.rng.next_piece());

        let piece = ActivePiece::spawn(kind, self.board.width());
        self.active = Some(piece);

        self.is_valid_position(&piece.shape, piece.x, piece.y)
    }

    /// Check whether `shape` fits with its origin at (x, y).
    ///
    /// Cells above the board (negative y) are allowed and not checked against it.
    pub fn is_valid_position(&self, shape: &PieceShape, x: i32, y: i32) -> bool {
        let width = self.board.width() as i32;
        let height = self.board.height() as i32;

        shape.iter().all(|&(dx, dy)| {
            let px = x + dx;
            let py = y + dy;
            if px < 0 || px >= width || py >= height {
                return false;
            }
            py < 0 || self.board.is_empty_at(px, py)
        })
    }

    fn try_shift(&mut self, dx: i32, dy: i32) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        if self.is_valid_position(&active.shape, active.x + dx, active.y + dy) {
            self.active = Some(ActivePiece {
                x: active.x + dx,
                y: active.y + dy,
                ..active
            });
            return true;
        }

        false
    }

    pub fn move_left(&mut self) -> bool {
        self.try_shift(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_shift(1, 0)
    }

    /// Move the active piece one row down.
    ///
    /// If the piece cannot descend it is locked into the board, full rows are
    /// cleared, and `false` is returned. This is the only path that locks.
    pub fn move_down(&mut self) -> bool {
        if self.try_shift(0, 1) {
            return true;
        }
        self.lock_piece();
        false
    }

    /// Rotate the active piece clockwise in place (no kicks).
    pub fn rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let rotated = rotate_cw(&active.shape);
        if self.is_valid_position(&rotated, active.x, active.y) {
            self.active = Some(ActivePiece {
                shape: rotated,
                ..active
            });
            return true;
        }

        false
    }

    /// Drop the active piece to its resting row and lock it.
    ///
    /// Scores one point per row fallen. Always returns true.
    pub fn hard_drop(&mut self) -> bool {
        let mut rows: u32 = 0;
        while self.move_down() {
            rows += 1;
        }
        self.score = self.score.saturating_add(hard_drop_score(rows));
        true
    }

    /// Write the active piece into the board and clear lines
    fn lock_piece(&mut self) {
        let Some(active) = self.active else {
            return;
        };

        self.board
            .lock_cells(&active.shape, active.x, active.y, active.kind);
        self.clear_lines();
    }

    /// Remove full rows and update lines, score and level.
    ///
    /// Only reached through a blocked `move_down`. Returns the number of rows
    /// cleared.
    fn clear_lines(&mut self) -> u32 {
        let cleared = self.board.clear_full_rows().len();
        if cleared == 0 {
            return 0;
        }

        self.lines = self.lines.saturating_add(cleared as u32);
        self.score = self
            .score
            .saturating_add(line_clear_score(cleared, self.level));
        self.level = level_for_lines(self.lines);

        cleared as u32
    }
}
