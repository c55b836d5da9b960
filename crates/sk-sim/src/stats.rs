//! Session statistics

use std::collections::BTreeMap;

use serde::Serialize;
use sk_engine::SpinResult;

/// Aggregate figures over a run of spins
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionStats {
    pub total_spins: u64,
    pub wins: u64,
    pub losses: u64,
    pub total_payout: u64,
    pub max_payout: u64,
    /// Line wins keyed by active payline index
    pub wins_per_line: BTreeMap<usize, u64>,
}

impl SessionStats {
    /// Fold one spin into the totals
    pub fn record(&mut self, result: &SpinResult) {
        self.total_spins += 1;
        if result.is_win() {
            self.wins += 1;
        } else {
            self.losses += 1;
        }

        self.total_payout += result.total_payout();
        self.max_payout = self.max_payout.max(result.total_payout());

        for win in result.line_wins() {
            *self.wins_per_line.entry(win.line_index).or_default() += 1;
        }
    }

    /// Calculate hit rate
    pub fn hit_rate(&self) -> f64 {
        if self.total_spins > 0 {
            (self.wins as f64 / self.total_spins as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Mean payout per spin
    pub fn mean_payout(&self) -> f64 {
        if self.total_spins > 0 {
            self.total_payout as f64 / self.total_spins as f64
        } else {
            0.0
        }
    }

    /// Human-readable summary
    pub fn summary(&self) -> String {
        let mut out = format!(
            "Spins:        {}\n\
             Wins:         {}\n\
             Losses:       {}\n\
             Hit rate:     {:.2}%\n\
             Total payout: {}\n\
             Mean payout:  {:.3}\n\
             Max payout:   {}\n",
            self.total_spins,
            self.wins,
            self.losses,
            self.hit_rate(),
            self.total_payout,
            self.mean_payout(),
            self.max_payout,
        );

        for (line, count) in &self.wins_per_line {
            out.push_str(&format!("  Line {:>2}:     {} win(s)\n", line, count));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sk_engine::{GridSpec, Payline, SequenceRandom, SlotConfig, SlotEngine, Symbol};

    fn engine(values: Vec<usize>) -> SlotEngine {
        let config = SlotConfig::new(
            GridSpec::new(3, 1),
            3,
            vec![Symbol::new(0, "A", 10), Symbol::new(1, "B", 20)],
            vec![Payline::new(vec![0, 1, 2])],
        );
        SlotEngine::new(config, SequenceRandom::new(values)).unwrap()
    }

    #[test]
    fn test_empty_stats() {
        let stats = SessionStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats.mean_payout(), 0.0);
        assert!(stats.summary().contains("Spins:        0"));
    }

    #[test]
    fn test_record_wins_and_losses() {
        // Spin 1: A A A (pays 30), spin 2: A B A (loss)
        let engine = engine(vec![0, 0, 0, 0, 1, 0]);
        let mut stats = SessionStats::default();

        stats.record(&engine.spin().unwrap());
        stats.record(&engine.spin().unwrap());

        assert_eq!(stats.total_spins, 2);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.total_payout, 30);
        assert_eq!(stats.max_payout, 30);
        assert_eq!(stats.wins_per_line.get(&0), Some(&1));
        assert!((stats.hit_rate() - 50.0).abs() < 1e-9);
        assert!((stats.mean_payout() - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_lists_lines() {
        let engine = engine(vec![1]);
        let mut stats = SessionStats::default();
        stats.record(&engine.spin().unwrap());

        let summary = stats.summary();
        assert!(summary.contains("Total payout: 60"));
        assert!(summary.contains("Line  0:     1 win(s)"));
    }
}
