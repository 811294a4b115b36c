use serde::{Deserialize, Serialize};

use crate::utils::prelude::*;

use super::errors::GameError;

/// Number of pieces in one shuffled bag.
pub const BAG_SIZE: usize = 7;

/// The queue is topped up with a fresh bag whenever fewer than this many
/// pieces remain visible.
pub const QUEUE_VISIBLE: usize = 6;

/// A rotation state: 0 spawn, 1 clockwise, 2 half-turn, 3 counterclockwise.
/// Only the low two bits are meaningful.
pub type Rotation = u8;

// A piece typing.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Piece {
    I = 0,
    O = 1,
    J = 2,
    L = 3,
    S = 4,
    Z = 5,
    T = 6,
}

impl Piece {
    /// Gets the piece kinds in canonical order.
    pub fn all() -> [Piece; BAG_SIZE] {
        [Piece::I, Piece::O, Piece::J, Piece::L, Piece::S, Piece::Z, Piece::T]
    }

    /// The single-letter tag used in board notation.
    pub fn tag(&self) -> char {
        match self {
            Piece::I => 'I',
            Piece::O => 'O',
            Piece::J => 'J',
            Piece::L => 'L',
            Piece::S => 'S',
            Piece::Z => 'Z',
            Piece::T => 'T',
        }
    }
}

impl std::str::FromStr for Piece {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "I" | "i" => Ok(Piece::I),
            "O" | "o" => Ok(Piece::O),
            "J" | "j" => Ok(Piece::J),
            "L" | "l" => Ok(Piece::L),
            "S" | "s" => Ok(Piece::S),
            "Z" | "z" => Ok(Piece::Z),
            "T" | "t" => Ok(Piece::T),
            _ => Err(anyhow!("invalid notation {s} for Piece")),
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// What a non-empty board cell holds: a locked piece kind, or garbage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Block {
    I,
    O,
    J,
    L,
    S,
    Z,
    T,
    #[serde(rename = "G")]
    Garbage,
}

impl Block {
    /// The single-letter tag used in board notation.
    pub fn tag(&self) -> char {
        match self {
            Block::I => 'I',
            Block::O => 'O',
            Block::J => 'J',
            Block::L => 'L',
            Block::S => 'S',
            Block::Z => 'Z',
            Block::T => 'T',
            Block::Garbage => 'G',
        }
    }

    pub fn is_garbage(&self) -> bool {
        matches!(self, Block::Garbage)
    }
}

impl From<Piece> for Block {
    fn from(piece: Piece) -> Self {
        match piece {
            Piece::I => Block::I,
            Piece::O => Block::O,
            Piece::J => Block::J,
            Piece::L => Block::L,
            Piece::S => Block::S,
            Piece::Z => Block::Z,
            Piece::T => Block::T,
        }
    }
}

/// The full input alphabet of the state machine. The string literals are
/// part of the wire contract and must not drift.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Hold,
    MoveLeft,
    MoveRight,
    SonicLeft,
    SonicRight,
    RotateCw,
    RotateCcw,
    Drop,
    SonicDrop,
    HardDrop,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Hold => "hold",
            Command::MoveLeft => "move_left",
            Command::MoveRight => "move_right",
            Command::SonicLeft => "sonic_left",
            Command::SonicRight => "sonic_right",
            Command::RotateCw => "rotate_cw",
            Command::RotateCcw => "rotate_ccw",
            Command::Drop => "drop",
            Command::SonicDrop => "sonic_drop",
            Command::HardDrop => "hard_drop",
        }
    }
}

impl std::str::FromStr for Command {
    type Err = GameError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "hold" => Ok(Command::Hold),
            "move_left" => Ok(Command::MoveLeft),
            "move_right" => Ok(Command::MoveRight),
            "sonic_left" => Ok(Command::SonicLeft),
            "sonic_right" => Ok(Command::SonicRight),
            "rotate_cw" => Ok(Command::RotateCw),
            "rotate_ccw" => Ok(Command::RotateCcw),
            "drop" => Ok(Command::Drop),
            "sonic_drop" => Ok(Command::SonicDrop),
            "hard_drop" => Ok(Command::HardDrop),
            _ => Err(GameError::InvalidCommand(s.to_owned())),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
