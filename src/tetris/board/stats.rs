use serde::Serialize;

use crate::tetris::prelude::*;

/// Column-height summary used by bot evaluators and the shell.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Statistics {
    pub heights: Vec<usize>,
    pub avg_height: f64,
    pub bumpiness: f64,
    pub holes: usize,
    pub ledges: usize,
}

impl Board {
    /// Height of each column: one past the topmost occupied cell.
    pub fn heights(&self) -> Vec<usize> {
        (0..self.width())
            .map(|x| {
                (0..self.height())
                    .rev()
                    .find(|&y| self.cell(x, y).is_some())
                    .map_or(0, |y| y + 1)
            })
            .collect()
    }

    pub fn avg_height(&self) -> f64 {
        let heights = self.heights();
        heights.iter().sum::<usize>() as f64 / heights.len() as f64
    }

    /// Standard deviation of the column heights.
    pub fn bumpiness(&self) -> f64 {
        let heights = self.heights();
        let avg = heights.iter().sum::<usize>() as f64 / heights.len() as f64;
        let variance = heights
            .iter()
            .map(|&h| (h as f64 - avg).powi(2))
            .sum::<f64>()
            / heights.len() as f64;
        variance.sqrt()
    }

    /// Empty cells enclosed on all four sides (the boundary counts as
    /// filled below and beside, and the stored top counts as a roof),
    /// plus empty cells that merely carry a filled cell overhead.
    pub fn hole_and_ledge_count(&self) -> (usize, usize) {
        let mut holes = 0;
        let mut ledges = 0;
        let top = self.height();

        for y in 0..top {
            for x in 0..self.width() {
                if self.cell(x, y).is_some() {
                    continue;
                }
                let below = y == 0 || self.cell(x, y - 1).is_some();
                let left = x == 0 || self.cell(x - 1, y).is_some();
                let right = x == self.width() - 1 || self.cell(x + 1, y).is_some();
                let above = y == top - 1 || self.cell(x, y + 1).is_some();
                if below && left && right && above {
                    holes += 1;
                } else if y != top - 1 && self.cell(x, y + 1).is_some() {
                    ledges += 1;
                }
            }
        }

        (holes, ledges)
    }

    pub fn hole_count(&self) -> usize {
        self.hole_and_ledge_count().0
    }

    pub fn ledge_count(&self) -> usize {
        self.hole_and_ledge_count().1
    }

    pub fn statistics(&self) -> Statistics {
        let (holes, ledges) = self.hole_and_ledge_count();
        Statistics {
            heights: self.heights(),
            avg_height: self.avg_height(),
            bumpiness: self.bumpiness(),
            holes,
            ledges,
        }
    }
}
