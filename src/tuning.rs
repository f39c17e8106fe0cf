//! Data-driven game balance
//!
//! Every knob of the round economy and the visual actor lives here so a
//! build can be re-tuned from a JSON file without recompiling.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game balance and timing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Economy ===
    /// Balance granted on first launch and on reset
    pub initial_balance: u64,
    /// Smallest accepted stake
    pub min_bet: u64,
    /// Quick-pick stake buttons
    pub bet_presets: Vec<u64>,

    // === Crash curve ===
    /// Width of the skewed crash range above 1.0x
    pub crash_max_range: f64,
    /// Exponent applied to the raw draw (higher = more low crashes)
    pub crash_skew: f64,
    /// Chance of replacing the skewed result with a big-win outlier
    pub special_chance: f64,
    /// Outlier range lower bound (inclusive)
    pub special_min: f64,
    /// Outlier range upper bound (exclusive)
    pub special_max: f64,

    // === Multiplier growth ===
    pub growth_factor: f64,
    pub growth_exponent: f64,

    // === Visuals ===
    /// Particle pool capacity
    pub max_particles: usize,
    /// Number of samples in the flight path
    pub flight_samples: usize,
    /// Where the plane sits while waiting for a bet
    pub plane_start: Vec2,

    // === Timing (seconds) ===
    /// Tick rate the loop is driven at
    pub target_fps: u32,
    /// Input lockout after placing a bet or cashing out
    pub cooldown_secs: f64,
    /// Delay from crash back to betting
    pub crash_reset_secs: f64,
    /// Delay from cash-out back to betting
    pub cashout_reset_secs: f64,

    /// Rounds kept in the visible history strip
    pub history_len: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            initial_balance: 100,
            min_bet: 10,
            bet_presets: vec![10, 50, 100, 500],

            crash_max_range: 15.0,
            crash_skew: 2.5,
            special_chance: 0.01,
            special_min: 10.0,
            special_max: 50.0,

            growth_factor: 0.05,
            growth_exponent: 1.3,

            max_particles: 800,
            flight_samples: 400,
            plane_start: Vec2::new(1150.0, 330.0),

            target_fps: 60,
            cooldown_secs: 0.5,
            crash_reset_secs: 1.5,
            cashout_reset_secs: 1.0,

            history_len: crate::consts::HISTORY_LEN,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from a JSON file, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No tuning at {} ({}), using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Smallest stake actually accepted. A zero minimum still requires 1.
    pub fn effective_min_bet(&self) -> u64 {
        self.min_bet.max(1)
    }

    /// Fixed tick length in seconds
    pub fn tick_dt(&self) -> f64 {
        1.0 / self.target_fps.max(1) as f64
    }
}
