use crate::types::PieceKind;

/// Owned copy of everything a client or renderer needs to draw one frame.
///
/// Nothing here aliases engine state; callers may mutate it freely.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    /// Row-major color ids, `board[y][x]`, 0 = empty
    pub board: Vec<Vec<u8>>,
    /// Active piece offsets relative to (`piece_x`, `piece_y`)
    pub piece: Vec<(i32, i32)>,
    pub piece_kind: Option<PieceKind>,
    pub piece_x: i32,
    pub piece_y: i32,
    pub next_piece: Option<PieceKind>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub game_over: bool,
}

impl GameSnapshot {
    /// Absolute board cells covered by the active piece
    pub fn active_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.piece
            .iter()
            .map(move |&(dx, dy)| (self.piece_x + dx, self.piece_y + dy))
    }
}
