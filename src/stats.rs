//! Cumulative player statistics
//!
//! One record per installation, updated on every settlement and persisted
//! through a [`crate::persistence::StatsStore`].

use serde::{Deserialize, Serialize};

/// Lifetime counters across all rounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub total_games: u64,
    pub wins: u64,
    pub losses: u64,
    /// Best multiplier ever cashed out at
    pub highest_multiplier: f64,
    /// Largest single-round profit
    pub biggest_win: f64,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            total_games: 0,
            wins: 0,
            losses: 0,
            highest_multiplier: 1.0,
            biggest_win: 0.0,
        }
    }
}

impl Stats {
    /// Record a won round
    pub fn record_win(&mut self, multiplier: f64, profit: f64) {
        self.wins += 1;
        self.highest_multiplier = self.highest_multiplier.max(multiplier);
        self.biggest_win = self.biggest_win.max(profit);
    }

    /// Record a lost round
    pub fn record_loss(&mut self) {
        self.losses += 1;
    }

    /// Fraction of settled rounds that were won (None before any settle)
    pub fn win_rate(&self) -> Option<f64> {
        let settled = self.wins + self.losses;
        if settled == 0 {
            return None;
        }
        Some(self.wins as f64 / settled as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Stats::default();
        assert_eq!(s.total_games, 0);
        assert_eq!(s.highest_multiplier, 1.0);
        assert_eq!(s.biggest_win, 0.0);
        assert_eq!(s.win_rate(), None);
    }

    #[test]
    fn test_record_win_keeps_maxima() {
        let mut s = Stats::default();
        s.record_win(3.0, 100.0);
        s.record_win(2.0, 20.0);
        assert_eq!(s.wins, 2);
        assert_eq!(s.highest_multiplier, 3.0);
        assert_eq!(s.biggest_win, 100.0);
    }

    #[test]
    fn test_win_rate() {
        let mut s = Stats::default();
        s.record_win(2.0, 10.0);
        s.record_loss();
        s.record_loss();
        s.record_loss();
        assert_eq!(s.win_rate(), Some(0.25));
    }

    #[test]
    fn test_json_field_names() {
        let json = r#"{"total_games":4,"wins":1,"losses":3,"highest_multiplier":2.5,"biggest_win":75}"#;
        let s: Stats = serde_json::from_str(json).unwrap();
        assert_eq!(s.total_games, 4);
        assert_eq!(s.biggest_win, 75.0);

        // Partial record fills the rest from defaults
        let s: Stats = serde_json::from_str(r#"{"wins":2}"#).unwrap();
        assert_eq!(s.wins, 2);
        assert_eq!(s.highest_multiplier, 1.0);
    }
}
