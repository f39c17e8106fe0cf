//! UI-facing projections of session state
//!
//! Nothing here mutates a session. The host UI reads these to decide which
//! controls are live and how to paint the HUD.

use crate::sim::{GamePhase, Session};
use crate::stats::Stats;

/// HUD color for the multiplier while idle
pub const IDLE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.9];

/// Which controls accept input right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlStates {
    pub place_bet: bool,
    pub cash_out: bool,
    pub bet_input: bool,
    /// Preset and +/- stake buttons
    pub bet_adjust: bool,
    pub reset_balance: bool,
    /// Leaving the game screen
    pub back: bool,
}

/// Enabled/disabled state of every control, given the current bet field text
pub fn control_states(session: &Session, bet_input: &str) -> ControlStates {
    let flying = session.phase() == GamePhase::Flying;
    let broke = session.balance() < session.tuning().effective_min_bet();
    let valid_bet = parse_bet(bet_input).is_some_and(|amount| session.can_place_bet(amount));

    ControlStates {
        place_bet: valid_bet,
        cash_out: session.can_cash_out(),
        bet_input: !flying && !broke,
        bet_adjust: !flying && !broke,
        reset_balance: session.can_reset_balance(),
        back: !flying && !broke,
    }
}

/// Whether the bet field should be highlighted as invalid
pub fn bet_input_invalid(session: &Session, bet_input: &str) -> bool {
    let min_bet = session.tuning().effective_min_bet();
    let in_range = parse_bet(bet_input)
        .is_some_and(|amount| amount >= min_bet && amount <= session.balance());
    session.phase() != GamePhase::Flying && session.balance() >= min_bet && !in_range
}

/// Parse a stake typed by the player
pub fn parse_bet(input: &str) -> Option<u64> {
    input.trim().parse().ok()
}

/// Quick-pick stakes from tuning, in display order
pub fn bet_presets(session: &Session) -> &[u64] {
    &session.tuning().bet_presets
}

/// Apply a +/- step to the bet field. Garbage input resets to the minimum.
pub fn adjust_bet(input: &str, delta: i64, min_bet: u64) -> u64 {
    match parse_bet(input) {
        Some(current) => current.saturating_add_signed(delta).max(min_bet),
        None => min_bet,
    }
}

/// Stake for a preset button, never below the minimum
pub fn preset_bet(amount: u64, min_bet: u64) -> u64 {
    amount.max(min_bet)
}

/// Multiplier color band: green under 2x, orange under 5x, red beyond
pub fn multiplier_color(multiplier: f64) -> [f32; 4] {
    if multiplier < 2.0 {
        [0.2, 0.8, 0.2, 0.9]
    } else if multiplier < 5.0 {
        [1.0, 0.7, 0.2, 0.9]
    } else {
        [1.0, 0.2, 0.2, 0.9]
    }
}

/// Multiplier HUD color for the current phase
pub fn hud_color(session: &Session) -> [f32; 4] {
    match session.phase() {
        GamePhase::Betting => IDLE_COLOR,
        _ => multiplier_color(session.multiplier()),
    }
}

pub fn multiplier_label(multiplier: f64) -> String {
    format!("{:.2}x", multiplier)
}

pub fn potential_label(session: &Session) -> String {
    format!("Potential: ${:.2}", session.potential_payout())
}

pub fn crash_label(multiplier: f64) -> String {
    format!("CRASHED AT {:.2}x!", multiplier)
}

/// Lines for the statistics screen
pub fn stats_lines(stats: &Stats) -> Vec<String> {
    vec![
        format!("Total Games: {}", stats.total_games),
        format!("Wins: {}", stats.wins),
        format!("Losses: {}", stats.losses),
        format!("Highest Multiplier: {:.2}x", stats.highest_multiplier),
        format!("Biggest Win: ${:.2}", stats.biggest_win),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::PcgSource;
    use crate::tuning::Tuning;

    fn session() -> Session {
        Session::with_rng(
            Tuning::default(),
            Box::new(MemoryStore::new()),
            Box::new(PcgSource::new(5)),
        )
    }

    #[test]
    fn test_parse_bet() {
        assert_eq!(parse_bet("50"), Some(50));
        assert_eq!(parse_bet(" 10\n"), Some(10));
        assert_eq!(parse_bet("-5"), None);
        assert_eq!(parse_bet("1.5"), None);
        assert_eq!(parse_bet("abc"), None);
    }

    #[test]
    fn test_adjust_bet() {
        assert_eq!(adjust_bet("50", 10, 10), 60);
        assert_eq!(adjust_bet("15", -10, 10), 10);
        assert_eq!(adjust_bet("oops", 10, 10), 10);
        assert_eq!(preset_bet(5, 10), 10);
        assert_eq!(preset_bet(500, 10), 500);
    }

    #[test]
    fn test_controls_while_betting() {
        let s = session();
        let c = control_states(&s, "50");
        assert!(c.place_bet);
        assert!(!c.cash_out);
        assert!(c.bet_input && c.bet_adjust && c.back);
        assert!(c.reset_balance);

        assert!(!control_states(&s, "500").place_bet);
        assert!(!control_states(&s, "x").place_bet);
        assert!(bet_input_invalid(&s, "x"));
        assert!(!bet_input_invalid(&s, "20"));
    }

    #[test]
    fn test_controls_while_flying() {
        let mut s = session();
        s.place_bet(50);
        let c = control_states(&s, "50");
        assert!(!c.place_bet);
        assert!(c.cash_out);
        assert!(!c.bet_input && !c.bet_adjust && !c.back);
        assert!(!c.reset_balance);
        assert!(!bet_input_invalid(&s, "x"));
    }

    #[test]
    fn test_controls_after_cash_out() {
        let mut s = session();
        s.place_bet(50);
        s.cash_out();
        let c = control_states(&s, "50");
        assert!(!c.place_bet);
        assert!(!c.cash_out);
        assert!(!c.reset_balance);
        assert!(c.bet_input);
    }

    #[test]
    fn test_controls_when_broke() {
        let mut s = session();
        s.place_bet(95);
        // Long enough to crash at any crash point, then wait out the reset
        s.advance(600.0);
        assert_eq!(s.phase(), GamePhase::Crashed);
        s.advance(2.0);
        assert_eq!(s.phase(), GamePhase::Betting);
        assert_eq!(s.balance(), 5);
        let c = control_states(&s, "10");
        assert!(!c.place_bet && !c.bet_input && !c.bet_adjust && !c.back);
        assert!(c.reset_balance);
    }

    #[test]
    fn test_bet_presets_from_tuning() {
        let s = session();
        assert_eq!(bet_presets(&s), &[10, 50, 100, 500]);

        let s = Session::with_rng(
            Tuning {
                bet_presets: vec![5, 25],
                ..Default::default()
            },
            Box::new(MemoryStore::new()),
            Box::new(PcgSource::new(5)),
        );
        let min_bet = s.tuning().effective_min_bet();
        let stakes: Vec<u64> = bet_presets(&s)
            .iter()
            .map(|&amount| preset_bet(amount, min_bet))
            .collect();
        assert_eq!(stakes, vec![10, 25]);
    }

    #[test]
    fn test_zero_min_bet_controls_agree_with_guard() {
        let mut s = Session::with_rng(
            Tuning {
                initial_balance: 0,
                min_bet: 0,
                ..Default::default()
            },
            Box::new(MemoryStore::new()),
            Box::new(PcgSource::new(5)),
        );
        assert_eq!(s.balance(), 0);
        assert!(!s.can_place_bet(0));

        // Nothing can be staked, so the player is broke
        let c = control_states(&s, "0");
        assert!(!c.place_bet);
        assert!(!c.bet_input && !c.bet_adjust && !c.back);
        assert!(c.reset_balance);
        assert!(!bet_input_invalid(&s, "0"));
        assert!(!s.place_bet(0));
        assert_eq!(s.phase(), GamePhase::Betting);
    }

    #[test]
    fn test_multiplier_color_bands() {
        assert_eq!(multiplier_color(1.5), [0.2, 0.8, 0.2, 0.9]);
        assert_eq!(multiplier_color(2.0), [1.0, 0.7, 0.2, 0.9]);
        assert_eq!(multiplier_color(12.0), [1.0, 0.2, 0.2, 0.9]);
    }

    #[test]
    fn test_hud_color_idle_while_betting() {
        let mut s = session();
        assert_eq!(hud_color(&s), IDLE_COLOR);
        s.place_bet(10);
        assert_eq!(hud_color(&s), multiplier_color(1.0));
    }

    #[test]
    fn test_labels() {
        assert_eq!(multiplier_label(2.456), "2.46x");
        assert_eq!(crash_label(1.0), "CRASHED AT 1.00x!");
        let lines = stats_lines(&Stats::default());
        assert_eq!(lines[0], "Total Games: 0");
        assert_eq!(lines[3], "Highest Multiplier: 1.00x");
        assert_eq!(lines[4], "Biggest Win: $0.00");
    }
}
