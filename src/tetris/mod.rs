/*
 *  A deterministic engine for server-style multiplayer Tetris, built to
 *  back bots: bit-packed collision, exhaustive move generation, and a
 *  command-driven game state machine.
 */

pub mod board;
pub(crate) mod consts;
pub mod errors;
pub mod events;
pub mod game;
pub(crate) mod garbage;
pub(crate) mod kicks;
pub mod movegen;
pub mod notation;
pub mod options;
pub(crate) mod pieces;
pub mod scoring;
pub mod snapshot;

pub mod prelude {
    pub(crate) use crate::utils::prelude::*;

    pub use super::{
        board::{Board, Cell, ClearedLine, Row, Statistics},
        consts::*,
        errors::GameError,
        events::Event,
        game::Game,
        garbage::GarbageLine,
        movegen::{Algorithm, MoveMap},
        notation::{parse_board, parse_cell, parse_row},
        options::{AttackTable, Options},
        pieces::{PieceData, piece_border, piece_mask, piece_matrix},
        scoring::{ClearName, ScoreData, ScoreInfo},
        snapshot::{GameSnapshot, PublicGarbageLine},
    };
}
