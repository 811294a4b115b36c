use crate::tetris::kicks::kicks_for;
use crate::tetris::prelude::*;

impl Board {
    /// One cell left, or `None` against a wall or the stack.
    pub fn move_left(&self, piece: &PieceData) -> Option<PieceData> {
        let stepped = piece.offset(-1, 0);
        (!self.collides_piece(&stepped)).then_some(stepped)
    }

    /// One cell right, or `None` against a wall or the stack.
    pub fn move_right(&self, piece: &PieceData) -> Option<PieceData> {
        let stepped = piece.offset(1, 0);
        (!self.collides_piece(&stepped)).then_some(stepped)
    }

    /// One cell down, or `None` when the piece is resting.
    pub fn move_drop(&self, piece: &PieceData) -> Option<PieceData> {
        let stepped = piece.offset(0, -1);
        (!self.collides_piece(&stepped)).then_some(stepped)
    }

    /// Slides left until blocked; total, returns the last legal pose.
    pub fn sonic_left(&self, piece: &PieceData) -> PieceData {
        let mut current = *piece;
        while let Some(stepped) = self.move_left(&current) {
            current = stepped;
        }
        current
    }

    /// Slides right until blocked.
    pub fn sonic_right(&self, piece: &PieceData) -> PieceData {
        let mut current = *piece;
        while let Some(stepped) = self.move_right(&current) {
            current = stepped;
        }
        current
    }

    /// Falls until blocked; this is the hard-drop landing pose.
    pub fn sonic_drop(&self, piece: &PieceData) -> PieceData {
        let mut current = *piece;
        while let Some(stepped) = self.move_drop(&current) {
            current = stepped;
        }
        current
    }

    /// A quarter turn clockwise, walking the kick table.
    pub fn rotate_cw(&self, piece: &PieceData) -> Option<PieceData> {
        self.rotate(piece, (piece.rotation + 1) & 3)
    }

    /// A quarter turn counterclockwise, walking the kick table.
    pub fn rotate_ccw(&self, piece: &PieceData) -> Option<PieceData> {
        self.rotate(piece, (piece.rotation + 3) & 3)
    }

    /// The first kick offset under which the rotated pose fits wins;
    /// `None` when every offset collides or the transition has no kicks.
    fn rotate(&self, piece: &PieceData, new_rotation: Rotation) -> Option<PieceData> {
        let kicks = kicks_for(piece.piece, piece.rotation, new_rotation)?;

        for &(dx, dy) in kicks {
            if !self.collides(piece.piece, piece.x + dx, piece.y + dy, new_rotation) {
                return Some(PieceData {
                    piece: piece.piece,
                    x: piece.x + dx,
                    y: piece.y + dy,
                    rotation: new_rotation,
                });
            }
        }

        None
    }
}
