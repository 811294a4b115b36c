use serde::{Deserialize, Serialize};

use super::errors::GameError;

/// Attack sent per clear kind. All values are overridable; the defaults
/// match the canonical server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackTable {
    pub single: u32,
    pub double: u32,
    pub triple: u32,
    pub quad: u32,
    pub ass: u32,
    pub asd: u32,
    pub ast: u32,
    pub pc: u32,
    pub b2b: u32,
}

impl Default for AttackTable {
    fn default() -> Self {
        AttackTable {
            single: 0,
            double: 1,
            triple: 2,
            quad: 4,
            ass: 2,
            asd: 4,
            ast: 6,
            pc: 10,
            b2b: 1,
        }
    }
}

/// Immutable per-game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub board_width: usize,
    pub board_height: usize,
    pub garbage_messiness: f64,
    pub garbage_delay: u32,
    pub attack_table: AttackTable,
    pub combo_table: Vec<u32>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            board_width: 10,
            board_height: 20,
            garbage_messiness: 0.05,
            garbage_delay: 1,
            attack_table: AttackTable::default(),
            combo_table: vec![0, 0, 1, 1, 1, 2, 2, 3, 3, 4],
        }
    }
}

impl Options {
    /// Rejects configurations the engine cannot run under. Piece poses are
    /// stored in single bytes, hence the dimension ceilings.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.combo_table.is_empty() {
            return Err(GameError::InvalidOptions("combo table must not be empty".into()));
        }
        if !(0.0..=1.0).contains(&self.garbage_messiness) {
            return Err(GameError::InvalidOptions(format!(
                "garbage messiness {} is not a probability",
                self.garbage_messiness
            )));
        }
        if !(4..=100).contains(&self.board_width) {
            return Err(GameError::InvalidOptions(format!(
                "board width {} out of range 4..=100",
                self.board_width
            )));
        }
        if !(4..=100).contains(&self.board_height) {
            return Err(GameError::InvalidOptions(format!(
                "board height {} out of range 4..=100",
                self.board_height
            )));
        }
        Ok(())
    }
}
