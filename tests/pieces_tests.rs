//! Piece shape and rotation tests

use blocktris::core::pieces::canonical;
use blocktris::core::{rotate_cw, spawn_shape};
use blocktris::types::PieceKind;

#[test]
fn test_four_rotations_return_to_spawn_shape() {
    for kind in PieceKind::ALL {
        let start = spawn_shape(kind);
        let mut shape = start;
        for _ in 0..4 {
            shape = rotate_cw(&shape);
        }
        assert_eq!(canonical(&shape), canonical(&start), "{:?}", kind);
    }
}

#[test]
fn test_rotated_shapes_are_normalized() {
    for kind in PieceKind::ALL {
        let mut shape = spawn_shape(kind);
        for _ in 0..4 {
            shape = rotate_cw(&shape);
            let min_x = shape.iter().map(|&(x, _)| x).min().unwrap();
            let min_y = shape.iter().map(|&(_, y)| y).min().unwrap();
            assert_eq!((min_x, min_y), (0, 0), "{:?} {:?}", kind, shape);
        }
    }
}

#[test]
fn test_o_piece_never_changes() {
    let o = spawn_shape(PieceKind::O);
    assert_eq!(rotate_cw(&o), o);
}

#[test]
fn test_i_piece_alternates_orientation() {
    let horizontal = spawn_shape(PieceKind::I);
    let vertical = rotate_cw(&horizontal);
    assert_eq!(vertical, [(0, 0), (0, 1), (0, 2), (0, 3)]);
    assert_eq!(canonical(&rotate_cw(&vertical)), canonical(&horizontal));
}

#[test]
fn test_t_piece_rotation() {
    // T pointing up -> pointing right
    let t = rotate_cw(&spawn_shape(PieceKind::T));
    assert_eq!(t, [(0, 0), (0, 1), (0, 2), (1, 1)]);
}
