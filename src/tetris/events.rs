use serde::{Deserialize, Serialize};

use super::board::ClearedLine;
use super::pieces::PieceData;
use super::scoring::ClearName;

/// Everything a single command can make observable, in emission order
/// within one hard drop: `piece_placed`, then `clear`, then
/// `damage_tanked`, then `game_over`. The `type` tags and payload field
/// names are the wire contract.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    PiecePlaced {
        initial: PieceData,
        r#final: PieceData,
    },
    Clear {
        #[serde(rename = "clearName")]
        clear_name: ClearName,
        #[serde(rename = "allSpin")]
        all_spin: bool,
        b2b: bool,
        combo: u32,
        pc: bool,
        attack: u32,
        cancelled: u32,
        piece: PieceData,
        #[serde(rename = "clearedLines")]
        cleared_lines: Vec<ClearedLine>,
    },
    DamageTanked {
        #[serde(rename = "holeIndices")]
        hole_indices: Vec<usize>,
    },
    GameOver,
}
