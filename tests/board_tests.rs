//! Board tests through the public API

use blocktris::core::{Board, EngineError};
use blocktris::types::{PieceKind, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};

fn board() -> Board {
    Board::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT).unwrap()
}

#[test]
fn test_board_new_empty() {
    let board = board();
    assert_eq!(board.width(), 10);
    assert_eq!(board.height(), 20);
    assert_eq!(board.filled_count(), 0);

    for y in 0..20 {
        for x in 0..10 {
            assert_eq!(board.get(x, y), Some(None), "({}, {}) should be empty", x, y);
        }
    }
}

#[test]
fn test_board_rejects_zero_dimensions() {
    assert_eq!(
        Board::new(0, 20),
        Err(EngineError::InvalidDimensions {
            width: 0,
            height: 20
        })
    );
    assert!(Board::new(10, 0).is_err());
    assert!(Board::new(1, 1).is_ok());
}

#[test]
fn test_board_bounds() {
    let mut board = board();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(10, 0), None);
    assert_eq!(board.get(0, 20), None);

    assert!(!board.set(10, 0, Some(PieceKind::T)));
    assert!(board.is_out_of_bounds(-1, 5));
    assert!(!board.is_empty_at(-1, 5));
}

#[test]
fn test_board_set_and_get() {
    let mut board = board();

    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));
    assert!(board.is_occupied(5, 10));

    assert!(board.set(5, 10, None));
    assert!(board.is_empty_at(5, 10));
}

#[test]
fn test_clear_single_row_shifts_rows_above() {
    let mut board = board();
    board.fill_row(19, PieceKind::I);
    board.set(4, 18, Some(PieceKind::T));
    board.set(2, 17, Some(PieceKind::S));

    assert_eq!(board.clear_full_rows(), vec![19]);
    assert_eq!(board.get(4, 19), Some(Some(PieceKind::T)));
    assert_eq!(board.get(2, 18), Some(Some(PieceKind::S)));
    assert_eq!(board.filled_count(), 2);
}

#[test]
fn test_clear_non_adjacent_rows() {
    let mut board = board();
    board.fill_row(19, PieceKind::I);
    board.set(0, 18, Some(PieceKind::J));
    board.fill_row(17, PieceKind::O);
    board.set(9, 16, Some(PieceKind::L));

    assert_eq!(board.clear_full_rows(), vec![17, 19]);
    assert_eq!(board.get(0, 19), Some(Some(PieceKind::J)));
    assert_eq!(board.get(9, 18), Some(Some(PieceKind::L)));
    assert_eq!(board.filled_count(), 2);
}

#[test]
fn test_clear_more_than_four_rows() {
    let mut board = Board::new(4, 8).unwrap();
    for y in 2..8 {
        board.fill_row(y, PieceKind::Z);
    }
    assert_eq!(board.clear_full_rows().len(), 6);
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_lock_cells_skips_cells_above_board() {
    let mut board = board();
    board.lock_cells(&[(0, -1), (0, 0), (1, 0)], 3, 0, PieceKind::L);
    assert_eq!(board.filled_count(), 2);
    assert_eq!(board.get(3, 0), Some(Some(PieceKind::L)));
}

#[test]
fn test_to_grid_uses_color_ids() {
    let mut board = Board::new(3, 2).unwrap();
    board.set(1, 1, Some(PieceKind::L));
    assert_eq!(
        board.to_grid(),
        vec![vec![0, 0, 0], vec![0, PieceKind::L.color_id(), 0]]
    );
}
