//! Paytable and line win evaluation

use std::sync::Arc;

use serde::Serialize;

use crate::config::{Payline, SlotConfig};
use crate::reels::ReelGrid;
use crate::symbols::Symbol;

/// A win result on a single payline
#[derive(Debug, Clone, Serialize)]
pub struct LineWin {
    /// Index among the active paylines
    pub line_index: usize,
    /// Winning symbol (the line's first symbol)
    pub symbol: Arc<Symbol>,
    /// Length of the left-anchored run
    pub match_count: usize,
    /// Symbol value × match count
    pub payout: u64,
    /// Matched cell indices: a prefix of the payline's positions
    pub positions: Vec<u16>,
}

/// Result of evaluating a grid
#[derive(Debug, Clone, Default, Serialize)]
pub struct EvaluationResult {
    /// Line wins, in payline order
    pub line_wins: Vec<LineWin>,
    /// Sum of line payouts
    pub total_payout: u64,
}

impl EvaluationResult {
    /// Check if this is a winning spin
    pub fn is_win(&self) -> bool {
        self.total_payout > 0
    }
}

/// Payline set plus the minimum run length that pays
#[derive(Debug, Clone)]
pub struct PayTable {
    /// Active paylines, in configured order
    pub paylines: Vec<Payline>,
    /// Minimum run length for a win
    pub min_match: usize,
}

impl PayTable {
    pub fn new(paylines: Vec<Payline>, min_match: usize) -> Self {
        Self {
            paylines,
            min_match,
        }
    }

    /// Paytable for a config's active paylines
    pub fn from_config(config: &SlotConfig) -> Self {
        Self::new(
            config.active_paylines().cloned().collect(),
            config.min_match as usize,
        )
    }

    /// Evaluate wins on a grid
    pub fn evaluate(&self, grid: &ReelGrid) -> EvaluationResult {
        let line_wins: Vec<LineWin> = self
            .paylines
            .iter()
            .enumerate()
            .filter_map(|(index, payline)| self.evaluate_line(grid, index, payline))
            .collect();

        let total_payout = line_wins.iter().map(|w| w.payout).sum();

        EvaluationResult {
            line_wins,
            total_payout,
        }
    }

    /// Score one payline. Positions outside the grid are skipped; the run is
    /// anchored on the first in-grid cell and stops at the first different
    /// symbol.
    pub fn evaluate_line(&self, grid: &ReelGrid, line_index: usize, payline: &Payline) -> Option<LineWin> {
        let cells: Vec<(u16, &Arc<Symbol>)> = payline
            .positions
            .iter()
            .filter_map(|&p| grid.at_position(p).map(|symbol| (p, symbol)))
            .collect();

        let (_, first) = *cells.first()?;

        let positions: Vec<u16> = cells
            .iter()
            .take_while(|(_, symbol)| symbol.same_as(first))
            .map(|&(p, _)| p)
            .collect();

        let match_count = positions.len();
        if match_count < self.min_match {
            return None;
        }

        Some(LineWin {
            line_index,
            symbol: Arc::clone(first),
            match_count,
            payout: first.line_pay(match_count),
            positions,
        })
    }
}
