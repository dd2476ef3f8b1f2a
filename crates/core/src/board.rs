//! Board module - manages the game grid
//!
//! The board is a `width` x `height` grid where each cell can be empty or filled with a piece kind.
//! Uses a flat vector (row-major) for cache locality; the size is fixed at construction.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom (row 0 is the top).

use crate::error::EngineError;
use crate::types::{Cell, PieceKind};

/// The game board using flat storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board.
    ///
    /// Fails if either dimension is zero.
    pub fn new(width: u16, height: u16) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_empty_at(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, x: i32, y: i32) -> bool {
        x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Number of filled cells in a row (0 for rows outside the board)
    pub fn row_fill_count(&self, y: usize) -> usize {
        if y >= self.height as usize {
            return 0;
        }
        self.row(y).iter().filter(|cell| cell.is_some()).count()
    }

    /// Total number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Clear all full rows and return the row indices that were cleared (top to bottom).
    ///
    /// Remaining rows keep their relative order and slide down; the same number of
    /// empty rows appear at the top.
    pub fn clear_full_rows(&mut self) -> Vec<usize> {
        let width = self.width as usize;
        let height = self.height as usize;
        let mut cleared_rows = Vec::new();
        let mut write_y = height;

        // Scan from bottom to top, compacting non-full rows downward in place.
        for read_y in (0..height).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared_rows.reverse();
        cleared_rows
    }

    /// Write a piece's cells into the board.
    ///
    /// Cells outside the board (e.g. above row 0) are skipped.
    pub fn lock_cells(&mut self, shape: &[(i32, i32)], x: i32, y: i32, kind: PieceKind) {
        for &(dx, dy) in shape {
            self.set(x + dx, y + dy, Some(kind));
        }
    }

    /// Owned grid of color ids (0 = empty), one inner vector per row.
    pub fn to_grid(&self) -> Vec<Vec<u8>> {
        (0..self.height as usize)
            .map(|y| {
                self.row(y)
                    .iter()
                    .map(|cell| cell.map_or(0, |kind| kind.color_id()))
                    .collect()
            })
            .collect()
    }

    /// Fill a whole row with one piece kind (test setup helper)
    pub fn fill_row(&mut self, y: i32, kind: PieceKind) {
        for x in 0..self.width as i32 {
            self.set(x, y, Some(kind));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(10, 20).unwrap();
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            Board::new(0, 20),
            Err(EngineError::InvalidDimensions {
                width: 0,
                height: 20
            })
        );
        assert!(Board::new(10, 0).is_err());
    }

    #[test]
    fn test_board_flat_array() {
        let mut board = Board::new(10, 20).unwrap();

        board.set(0, 0, Some(PieceKind::I));
        board.set(5, 10, Some(PieceKind::T));

        assert_eq!(board.get(0, 0), Some(Some(PieceKind::I)));
        assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));

        assert_eq!(board.cells[0], Some(PieceKind::I));
        assert_eq!(board.cells[10 * 10 + 5], Some(PieceKind::T));
    }

    #[test]
    fn test_non_square_board_rows() {
        let mut board = Board::new(4, 3).unwrap();
        board.fill_row(2, PieceKind::O);
        board.set(1, 1, Some(PieceKind::S));

        let grid = board.to_grid();
        assert_eq!(grid.len(), 3);
        assert!(grid.iter().all(|row| row.len() == 4));
        assert_eq!(grid[2], vec![2, 2, 2, 2]);
        assert_eq!(grid[1], vec![0, 4, 0, 0]);

        assert_eq!(board.clear_full_rows(), vec![2]);
        assert_eq!(board.to_grid()[2], vec![0, 4, 0, 0]);
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_lock_cells_skips_rows_above_board() {
        let mut board = Board::new(10, 20).unwrap();
        board.lock_cells(&[(0, 0), (0, 1), (0, 2), (0, 3)], 0, -2, PieceKind::I);

        assert_eq!(board.filled_count(), 2);
        assert!(board.is_occupied(0, 0));
        assert!(board.is_occupied(0, 1));
    }
}
