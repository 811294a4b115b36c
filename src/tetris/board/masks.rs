use crate::tetris::prelude::*;

impl Board {
    /// Packs the 4x4 window anchored at `(x, y-3)..(x+3, y)` into a 16-bit
    /// mask whose bit layout matches the piece masks. Cells outside the
    /// stored board contribute no bits; the caller's border check has
    /// already ruled out genuine boundary overlap.
    pub(crate) fn window_mask(&self, x: i8, y: i8) -> u16 {
        let mut mask = 0u16;
        let window_bottom = y - 3;

        for window_y in 0..4i8 {
            let board_y = window_bottom + window_y;
            if board_y < 0 || board_y as usize >= self.rows.len() {
                continue;
            }
            let row = &self.rows[board_y as usize];
            for window_x in 0..4i8 {
                let board_x = x + window_x;
                if board_x < 0 || board_x as usize >= self.width {
                    continue;
                }
                if row[board_x as usize].is_some() {
                    mask |= 1 << (window_y * 4 + window_x);
                }
            }
        }

        mask
    }

    /// Whether the pose overlaps the boundary or an occupied cell. This is
    /// the engine's innermost hot path: border rejection first, then a
    /// single 16-bit AND.
    pub fn collides(&self, piece: Piece, x: i8, y: i8, rotation: Rotation) -> bool {
        let border = piece_border(piece, rotation);
        if x + border.min_x < 0
            || (x + border.max_x) as usize >= self.width
            || y - border.max_y < 0
        {
            return true;
        }

        // entirely above the stored stack
        if y as i32 - 3 >= self.rows.len() as i32 {
            return false;
        }

        piece_mask(piece, rotation) & self.window_mask(x, y) != 0
    }

    pub fn collides_piece(&self, piece: &PieceData) -> bool {
        self.collides(piece.piece, piece.x, piece.y, piece.rotation)
    }

    /// True when no single-cell step in any cardinal direction is legal.
    /// This is the canonical spin test consulted at lock time.
    pub fn immobile(&self, piece: &PieceData) -> bool {
        [(0, -1), (0, 1), (-1, 0), (1, 0)]
            .into_iter()
            .all(|(dx, dy)| self.collides(piece.piece, piece.x + dx, piece.y + dy, piece.rotation))
    }
}
