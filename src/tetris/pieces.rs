use serde::{Deserialize, Serialize};

use super::consts::{Piece, Rotation};

/// A piece shape embedded in the 4x4 collision window, row 0 at the top.
pub type PieceMatrix = [[bool; 4]; 4];

/// Occupied extent of a shape within the 4x4 window; lets collision reject
/// boundary overruns before any mask work.
#[derive(Clone, Copy, Debug)]
pub struct PieceBorder {
    pub min_x: i8,
    pub max_x: i8,
    pub min_y: i8,
    pub max_y: i8,
}

/// Native canvas edge per kind: rotation happens inside this square, and
/// the result is embedded top-left in the 4x4 window. I turns in a 4x4,
/// O in a 2x2 (so it never visibly moves), everything else in a 3x3.
const CANVAS: [usize; 7] = [4, 2, 3, 3, 3, 3, 3];

const SPAWN_MATRICES: [PieceMatrix; 7] = {
    const O: bool = false;
    const X: bool = true;
    [
        // I
        [[O, O, O, O], [X, X, X, X], [O, O, O, O], [O, O, O, O]],
        // O
        [[X, X, O, O], [X, X, O, O], [O, O, O, O], [O, O, O, O]],
        // J
        [[X, O, O, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]],
        // L
        [[O, O, X, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]],
        // S
        [[O, X, X, O], [X, X, O, O], [O, O, O, O], [O, O, O, O]],
        // Z
        [[X, X, O, O], [O, X, X, O], [O, O, O, O], [O, O, O, O]],
        // T
        [[O, X, O, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]],
    ]
};

/// One quarter turn clockwise inside the piece's native canvas.
const fn rotated_once(matrix: PieceMatrix, canvas: usize) -> PieceMatrix {
    let mut out = [[false; 4]; 4];
    let mut y = 0;
    while y < canvas {
        let mut x = 0;
        while x < canvas {
            out[y][x] = matrix[canvas - 1 - x][y];
            x += 1;
        }
        y += 1;
    }
    out
}

const fn build_matrices() -> [[PieceMatrix; 4]; 7] {
    let mut out = [[[[false; 4]; 4]; 4]; 7];
    let mut piece = 0;
    while piece < 7 {
        let mut matrix = SPAWN_MATRICES[piece];
        let mut rotation = 0;
        while rotation < 4 {
            out[piece][rotation] = matrix;
            matrix = rotated_once(matrix, CANVAS[piece]);
            rotation += 1;
        }
        piece += 1;
    }
    out
}

const fn mask_of(matrix: &PieceMatrix) -> u16 {
    let mut mask = 0u16;
    let mut y = 0;
    while y < 4 {
        let mut x = 0;
        while x < 4 {
            if matrix[y][x] {
                // bit layout counts rows from the bottom of the window
                mask |= 1 << ((3 - y) * 4 + x);
            }
            x += 1;
        }
        y += 1;
    }
    mask
}

const fn build_masks() -> [[u16; 4]; 7] {
    let matrices = build_matrices();
    let mut out = [[0u16; 4]; 7];
    let mut piece = 0;
    while piece < 7 {
        let mut rotation = 0;
        while rotation < 4 {
            out[piece][rotation] = mask_of(&matrices[piece][rotation]);
            rotation += 1;
        }
        piece += 1;
    }
    out
}

const fn border_of(matrix: &PieceMatrix) -> PieceBorder {
    let mut border = PieceBorder { min_x: 3, max_x: 0, min_y: 3, max_y: 0 };
    let mut y = 0;
    while y < 4 {
        let mut x = 0;
        while x < 4 {
            if matrix[y][x] {
                if (x as i8) < border.min_x {
                    border.min_x = x as i8;
                }
                if (x as i8) > border.max_x {
                    border.max_x = x as i8;
                }
                if (y as i8) < border.min_y {
                    border.min_y = y as i8;
                }
                if (y as i8) > border.max_y {
                    border.max_y = y as i8;
                }
            }
            x += 1;
        }
        y += 1;
    }
    border
}

const fn build_borders() -> [[PieceBorder; 4]; 7] {
    let matrices = build_matrices();
    let mut out = [[PieceBorder { min_x: 0, max_x: 0, min_y: 0, max_y: 0 }; 4]; 7];
    let mut piece = 0;
    while piece < 7 {
        let mut rotation = 0;
        while rotation < 4 {
            out[piece][rotation] = border_of(&matrices[piece][rotation]);
            rotation += 1;
        }
        piece += 1;
    }
    out
}

pub static PIECE_MATRICES: [[PieceMatrix; 4]; 7] = build_matrices();
pub static PIECE_MASKS: [[u16; 4]; 7] = build_masks();
pub static PIECE_BORDERS: [[PieceBorder; 4]; 7] = build_borders();

/// The shape of a kind at a rotation, embedded in the 4x4 window.
pub fn piece_matrix(piece: Piece, rotation: Rotation) -> &'static PieceMatrix {
    &PIECE_MATRICES[piece as usize][(rotation & 3) as usize]
}

/// The 16-bit collision mask of a kind at a rotation.
pub fn piece_mask(piece: Piece, rotation: Rotation) -> u16 {
    PIECE_MASKS[piece as usize][(rotation & 3) as usize]
}

/// The occupied extent of a kind at a rotation.
pub fn piece_border(piece: Piece, rotation: Rotation) -> PieceBorder {
    PIECE_BORDERS[piece as usize][(rotation & 3) as usize]
}

/// A concrete pose: kind, window position and rotation state. `x` is the
/// left edge and `y` the TOP of the piece's 4x4 window, so the window
/// spans board rows `(y - 3)..=y`; matrix row `r` lands on board row
/// `y - r`. Equality over all four fields is what deduplicates placements
/// during move generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceData {
    pub piece: Piece,
    pub x: i8,
    pub y: i8,
    pub rotation: Rotation,
}

impl PieceData {
    /// The spawn pose: centered per canvas width, one row above the
    /// visible playfield, unrotated.
    pub fn spawn(piece: Piece, board_height: usize, board_width: usize) -> PieceData {
        let x = board_width as i8 / 2 - (CANVAS[piece as usize] as i8 + 1) / 2;
        PieceData { piece, x, y: board_height as i8, rotation: 0 }
    }

    /// The same pose translated by a kick or step offset.
    pub fn offset(&self, dx: i8, dy: i8) -> PieceData {
        PieceData { x: self.x + dx, y: self.y + dy, ..*self }
    }
}

impl PartialOrd for PieceData {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PieceData {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x, self.rotation, self.piece as u8).cmp(&(
            other.y,
            other.x,
            other.rotation,
            other.piece as u8,
        ))
    }
}
