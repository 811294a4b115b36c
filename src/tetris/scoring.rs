use serde::{Deserialize, Serialize};

use super::options::AttackTable;

/// Wire names of scored clears. The hyphenated spellings are part of the
/// external contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClearName {
    Single,
    Double,
    Triple,
    Quad,
    #[serde(rename = "All-Spin Single")]
    AllSpinSingle,
    #[serde(rename = "All-Spin Double")]
    AllSpinDouble,
    #[serde(rename = "All-Spin Triple")]
    AllSpinTriple,
    #[serde(rename = "Perfect Clear")]
    PerfectClear,
}

impl ClearName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClearName::Single => "Single",
            ClearName::Double => "Double",
            ClearName::Triple => "Triple",
            ClearName::Quad => "Quad",
            ClearName::AllSpinSingle => "All-Spin Single",
            ClearName::AllSpinDouble => "All-Spin Double",
            ClearName::AllSpinTriple => "All-Spin Triple",
            ClearName::PerfectClear => "Perfect Clear",
        }
    }
}

impl std::fmt::Display for ClearName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the lock step feeds the attack calculation.
#[derive(Clone, Copy, Debug)]
pub struct ScoreInfo {
    pub pc: bool,
    pub lines_cleared: usize,
    pub is_immobile: bool,
    pub b2b: bool,
    pub combo: u32,
}

/// What the attack calculation hands back to the state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreData {
    pub score: u32,
    pub b2b: bool,
    pub combo: u32,
    pub clear_name: Option<ClearName>,
    pub all_spin: bool,
}

/// Names the clear and totals its attack.
///
/// A quad is a quad whether or not the piece was immobile; one- to
/// three-line clears made by an immobile piece score as all-spins. The
/// incoming back-to-back flag pays its bonus only on a back-to-back-worthy
/// clear (quad or all-spin), and the outgoing flag records whether this
/// clear was worthy. A perfect clear overrides the accumulated attack
/// rather than adding to it.
pub fn calculate_score(info: &ScoreInfo, attack_table: &AttackTable, combo_table: &[u32]) -> ScoreData {
    if info.lines_cleared == 0 {
        return ScoreData { score: 0, b2b: info.b2b, combo: 0, clear_name: None, all_spin: false };
    }

    let new_combo = info.combo + 1;
    let mut score: u32 = 0;
    let mut is_b2b_clear = false;
    let mut clear_name = None;
    let mut all_spin = false;

    if info.lines_cleared == 4 {
        score += attack_table.quad;
        clear_name = Some(ClearName::Quad);
        is_b2b_clear = true;
    } else if info.is_immobile {
        all_spin = true;
        is_b2b_clear = true;
        match info.lines_cleared {
            1 => {
                score += attack_table.ass;
                clear_name = Some(ClearName::AllSpinSingle);
            }
            2 => {
                score += attack_table.asd;
                clear_name = Some(ClearName::AllSpinDouble);
            }
            3 => {
                score += attack_table.ast;
                clear_name = Some(ClearName::AllSpinTriple);
            }
            _ => {}
        }
    } else {
        match info.lines_cleared {
            1 => {
                score += attack_table.single;
                clear_name = Some(ClearName::Single);
            }
            2 => {
                score += attack_table.double;
                clear_name = Some(ClearName::Double);
            }
            3 => {
                score += attack_table.triple;
                clear_name = Some(ClearName::Triple);
            }
            _ => {}
        }
    }

    if info.b2b && is_b2b_clear {
        score += attack_table.b2b;
    }

    let combo_index = (new_combo as usize - 1).min(combo_table.len() - 1);
    score += combo_table[combo_index];

    if info.pc {
        score = attack_table.pc;
        clear_name = Some(ClearName::PerfectClear);
    }

    ScoreData { score, b2b: is_b2b_clear, combo: new_combo, clear_name, all_spin }
}
