//! Pieces module - Tetromino catalog, shape matrices and rotation
//!
//! Each kind is a small occupancy matrix (1x4, 2x2 or 2x3). Rotation is a pure
//! function of the matrix: transpose, then reverse each resulting row. There are no
//! kind-specific kick tables; a rotation tries four fixed offsets in order.

use blockfall_types::{PieceKind, SPAWN_X, SPAWN_Y};

/// Largest side of any shape matrix.
pub const MAX_SHAPE_DIM: usize = 4;

/// Offset of a single mino relative to the piece anchor: `(col, row)`
pub type MinoOffset = (i8, i8);

/// Offsets tried by [`try_rotate`], first success wins.
pub const ROTATION_KICKS: [(i8, i8); 4] = [(0, 0), (-1, 0), (1, 0), (0, -1)];

/// Spawn position for new pieces (x, y)
pub const SPAWN_POSITION: (i8, i8) = (SPAWN_X, SPAWN_Y);

/// Immutable occupancy matrix of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    filled: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from `0/1` rows. Every row must have the same length and the
    /// matrix must fit in 4x4.
    pub const fn from_bits<const R: usize, const C: usize>(bits: [[u8; C]; R]) -> Self {
        assert!(R > 0 && R <= MAX_SHAPE_DIM && C > 0 && C <= MAX_SHAPE_DIM);
        let mut filled = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let mut r = 0;
        while r < R {
            let mut c = 0;
            while c < C {
                filled[r][c] = bits[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self {
            rows: R as u8,
            cols: C as u8,
            filled,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Filled cells as `(col, row)` offsets, row-major.
    pub fn minos(&self) -> impl Iterator<Item = MinoOffset> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols)
                .filter(move |&col| self.filled[row as usize][col as usize])
                .map(move |col| (col as i8, row as i8))
        })
    }

    /// 90° clockwise rotation: transpose, then reverse each resulting row.
    ///
    /// `new[r][c] = old[rows - 1 - c][r]`, and the dimensions swap.
    pub fn rotated_cw(&self) -> Shape {
        let mut filled = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let rows = self.cols;
        let cols = self.rows;
        for r in 0..rows as usize {
            for c in 0..cols as usize {
                filled[r][c] = self.filled[self.rows as usize - 1 - c][r];
            }
        }
        Shape { rows, cols, filled }
    }
}

const I_SHAPE: Shape = Shape::from_bits([[1, 1, 1, 1]]);
const J_SHAPE: Shape = Shape::from_bits([[1, 0, 0], [1, 1, 1]]);
const L_SHAPE: Shape = Shape::from_bits([[0, 0, 1], [1, 1, 1]]);
const O_SHAPE: Shape = Shape::from_bits([[1, 1], [1, 1]]);
const S_SHAPE: Shape = Shape::from_bits([[0, 1, 1], [1, 1, 0]]);
const T_SHAPE: Shape = Shape::from_bits([[0, 1, 0], [1, 1, 1]]);
const Z_SHAPE: Shape = Shape::from_bits([[1, 1, 0], [0, 1, 1]]);

/// Catalog lookup: the spawn shape of a piece kind.
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::Z => Z_SHAPE,
    }
}

/// Try to rotate a shape clockwise at `(x, y)`.
///
/// `collides(x, y, shape)` is the board's collision test. Returns the rotated shape and
/// the kick offset that made it fit, or `None` if every offset collides.
pub fn try_rotate(
    shape: &Shape,
    x: i8,
    y: i8,
    collides: impl Fn(i8, i8, &Shape) -> bool,
) -> Option<(Shape, (i8, i8))> {
    let rotated = shape.rotated_cw();
    ROTATION_KICKS
        .iter()
        .copied()
        .find(|&(dx, dy)| !collides(x + dx, y + dy, &rotated))
        .map(|kick| (rotated, kick))
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a new piece at the spawn position with its catalog shape.
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: get_shape(kind),
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Absolute board coordinates of every mino.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .minos()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}
