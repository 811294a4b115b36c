use rand::Rng;
use serde::{Deserialize, Serialize};

/// One queued garbage line. The delay counts down on every placement that
/// clears nothing; at zero the line materializes as a full row of garbage
/// with a single hole at `index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GarbageLine {
    pub delay: u32,
    pub index: usize,
}

/// Assigns hole columns to incoming delay-only lines. The first line rolls
/// a fresh column; each later line re-rolls with probability `messiness`
/// and otherwise reuses the previous hole, which is what makes garbage
/// arrive in clean stacks at low messiness.
pub fn assign_holes<R: Rng>(
    delays: &[u32],
    messiness: f64,
    board_width: usize,
    rng: &mut R,
) -> Vec<GarbageLine> {
    let mut lines = Vec::with_capacity(delays.len());
    let mut hole: Option<usize> = None;

    for &delay in delays {
        let reused = hole.filter(|_| rng.random::<f64>() >= messiness);
        let index = reused.unwrap_or_else(|| rng.random_range(0..board_width));
        hole = Some(index);
        lines.push(GarbageLine { delay, index });
    }

    lines
}
