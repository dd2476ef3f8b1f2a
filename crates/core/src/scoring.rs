//! Scoring module - line clear points, hard drop points and level progression
//!
//! Line clears award `LINE_SCORES[n] * level` using the level *before* the clear.
//! Hard drops award one point per row fallen. Levels start at 1.

use crate::types::{LINES_PER_LEVEL, LINE_SCORES};

/// Calculate line clear score
/// lines: number of lines cleared at once
/// level: current level (1-based)
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES
        .get(lines)
        .copied()
        .unwrap_or(0)
        .saturating_mul(level)
}

/// Calculate hard drop score: one point per row fallen
///
/// `hard_drop` applies this once to the total after the lock, which equals
/// awarding one point on each successful downward step.
pub fn hard_drop_score(cells: u32) -> u32 {
    cells
}

/// Level for a running total of cleared lines
pub fn level_for_lines(total_lines: u32) -> u32 {
    1 + total_lines / LINES_PER_LEVEL
}
