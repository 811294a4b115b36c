use itertools::Itertools;

use crate::tetris::prelude::*;

impl std::fmt::Display for Board {
    /// Stored rows, top-down, `.` for empty cells. Only the stack is
    /// printed; the empty sky above it carries no information.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows().iter().rev() {
            let line: String = row
                .iter()
                .map(|cell| cell.map_or('.', |block| block.tag()))
                .join("");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
