//! Spin result

use std::collections::BTreeSet;

use serde::Serialize;

use crate::paytable::{EvaluationResult, LineWin};
use crate::reels::ReelGrid;

/// Complete outcome of one spin
#[derive(Debug, Clone, Serialize)]
pub struct SpinResult {
    /// Spin ID
    spin_id: String,
    /// Final grid (reels × rows)
    grid: ReelGrid,
    /// Line wins, in payline order
    line_wins: Vec<LineWin>,
    /// Sum of line payouts
    total_payout: u64,
}

impl SpinResult {
    /// Create a spin result from a grid and its evaluation
    pub fn new(spin_id: String, grid: ReelGrid, eval: EvaluationResult) -> Self {
        let total_payout = eval.line_wins.iter().map(|w| w.payout).sum();
        Self {
            spin_id,
            grid,
            line_wins: eval.line_wins,
            total_payout,
        }
    }

    pub fn spin_id(&self) -> &str {
        &self.spin_id
    }

    pub fn grid(&self) -> &ReelGrid {
        &self.grid
    }

    pub fn line_wins(&self) -> &[LineWin] {
        &self.line_wins
    }

    pub fn total_payout(&self) -> u64 {
        self.total_payout
    }

    /// Check if this is a win
    pub fn is_win(&self) -> bool {
        self.total_payout > 0
    }

    /// Every matched cell across all line wins, ascending, without repeats
    pub fn winning_positions(&self) -> Vec<u16> {
        self.line_wins
            .iter()
            .flat_map(|w| w.positions.iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
