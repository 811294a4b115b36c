use serde::{Deserialize, Serialize};

use super::board::Row;
use super::consts::Piece;
use super::pieces::PieceData;

/// The delay-only public view of a queued garbage line; hole columns are
/// server secrets and get re-rolled locally on hydration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicGarbageLine {
    pub delay: u32,
}

/// The wire shape of a game, as exchanged with the match server. Field
/// names serialize in the server's camelCase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub board: Vec<Row>,
    pub queue: Vec<Piece>,
    pub garbage_queued: Vec<PublicGarbageLine>,
    pub held: Option<Piece>,
    pub current: PieceData,
    pub can_hold: bool,
    pub combo: u32,
    pub b2b: bool,
    pub score: u32,
    pub pieces_placed: u32,
    pub garbage_cleared: u32,
    pub dead: bool,
}
