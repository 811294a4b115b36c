use super::consts::{Piece, Rotation};

/// Five `(dx, dy)` offsets tried in order when a quarter rotation collides.
pub type KickSequence = [(i8, i8); 5];

/// Kick tables indexed `[from_rotation][to_rotation]`. Half turns have no
/// entry and therefore never kick.
pub type KickTable = [[Option<KickSequence>; 4]; 4];

/// The standard SRS offsets for J, L, S, T, Z (and, for uniformity, O).
pub static WALLKICKS: KickTable = [
    [
        None,
        Some([(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)]),
        None,
        Some([(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)]),
    ],
    [
        Some([(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)]),
        None,
        Some([(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)]),
        None,
    ],
    [
        None,
        Some([(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)]),
        None,
        Some([(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)]),
    ],
    [
        Some([(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)]),
        None,
        Some([(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)]),
        None,
    ],
];

/// The I piece kicks differently in SRS: its bar spans the whole window.
pub static I_WALLKICKS: KickTable = [
    [
        None,
        Some([(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)]),
        None,
        Some([(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)]),
    ],
    [
        Some([(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)]),
        None,
        Some([(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)]),
        None,
    ],
    [
        None,
        Some([(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)]),
        None,
        Some([(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)]),
    ],
    [
        Some([(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)]),
        None,
        Some([(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)]),
        None,
    ],
];

/// The kick sequence for a transition, or `None` when the transition is
/// not a quarter turn.
pub fn kicks_for(piece: Piece, from: Rotation, to: Rotation) -> Option<&'static KickSequence> {
    let table = match piece {
        Piece::I => &I_WALLKICKS,
        _ => &WALLKICKS,
    };
    table[(from & 3) as usize][(to & 3) as usize].as_ref()
}
