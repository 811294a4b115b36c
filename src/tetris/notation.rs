use crate::utils::prelude::*;

use super::board::{Board, Cell, Row};
use super::consts::{Block, Piece};

/// Parses one cell of board notation: `.` or `_` is empty, `G` is
/// garbage, a piece letter is a locked block of that kind.
pub fn parse_cell(symbol: char) -> Result<Cell> {
    match symbol {
        '.' | '_' => Ok(None),
        'G' | 'g' => Ok(Some(Block::Garbage)),
        other => other
            .to_string()
            .parse::<Piece>()
            .map(|piece| Some(Block::from(piece))),
    }
}

/// Parses one row of board notation, leftmost column first.
pub fn parse_row(notation: &str) -> Result<Row> {
    notation.chars().map(parse_cell).collect()
}

/// Parses a whole stack written the way it renders: rows top-down,
/// separated by `|` or newlines. The result is checked against the
/// expected width so a dropped cell fails loudly instead of shifting the
/// whole board.
pub fn parse_board(notation: &str, width: usize) -> Result<Board> {
    let mut rows: Vec<Row> = notation
        .split(['|', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_row)
        .collect::<Result<_>>()?;

    for row in &rows {
        if row.len() != width {
            return Err(anyhow!(
                "row width {} does not match board width {width}",
                row.len()
            ));
        }
    }

    rows.reverse();
    Ok(Board::from_rows(rows, width))
}
