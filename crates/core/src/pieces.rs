//! Pieces module - tetromino shapes and the simple rotation rule
//!
//! Every kind has one canonical (spawn) shape. Rotation is computed from the
//! current offsets rather than looked up per orientation, and there are no
//! wall kicks: a rotation either fits at the same origin or is rejected.

use crate::types::PieceKind;

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i32, i32);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Offsets of the square piece; shapes equal to this set never rotate.
const SQUARE: PieceShape = [(0, 0), (1, 0), (0, 1), (1, 1)];

/// Get the canonical spawn shape for a piece kind
pub fn spawn_shape(kind: PieceKind) -> PieceShape {
    match kind {
        PieceKind::I => [(0, 0), (1, 0), (2, 0), (3, 0)],
        PieceKind::O => SQUARE,
        PieceKind::T => [(1, 0), (0, 1), (1, 1), (2, 1)],
        PieceKind::S => [(1, 0), (2, 0), (0, 1), (1, 1)],
        PieceKind::Z => [(0, 0), (1, 0), (1, 1), (2, 1)],
        PieceKind::J => [(0, 0), (0, 1), (1, 1), (2, 1)],
        PieceKind::L => [(2, 0), (0, 1), (1, 1), (2, 1)],
    }
}

/// Sorted copy of a shape, for order-insensitive comparison.
pub fn canonical(shape: &PieceShape) -> PieceShape {
    let mut sorted = *shape;
    sorted.sort_unstable();
    sorted
}

/// True if the shape is the unit square, in any offset order.
pub fn is_square(shape: &PieceShape) -> bool {
    canonical(shape) == canonical(&SQUARE)
}

/// Rotate a shape 90° clockwise.
///
/// Each offset `(x, y)` becomes `(-y, x)`, the result is translated so the
/// minimum x and y are both 0, then sorted. The square is returned unchanged.
pub fn rotate_cw(shape: &PieceShape) -> PieceShape {
    if is_square(shape) {
        return *shape;
    }

    let mut rotated = shape.map(|(x, y)| (-y, x));
    let min_x = rotated.iter().map(|&(x, _)| x).min().unwrap_or(0);
    let min_y = rotated.iter().map(|&(_, y)| y).min().unwrap_or(0);
    for offset in &mut rotated {
        offset.0 -= min_x;
        offset.1 -= min_y;
    }
    rotated.sort_unstable();
    rotated
}
