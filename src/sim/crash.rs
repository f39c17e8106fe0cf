//! Crash point generation
//!
//! The crash point is committed once per round, before the plane takes off.
//! Most rounds crash low; a rare outlier lands in the big-win band.

use super::rng::RandomSource;
use crate::tuning::Tuning;

/// Shape of the crash distribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrashPointGenerator {
    pub skew: f64,
    pub max_range: f64,
    pub special_chance: f64,
    pub special_min: f64,
    pub special_max: f64,
}

impl Default for CrashPointGenerator {
    fn default() -> Self {
        Self::from_tuning(&Tuning::default())
    }
}

impl CrashPointGenerator {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            skew: tuning.crash_skew,
            max_range: tuning.crash_max_range,
            special_chance: tuning.special_chance,
            special_min: tuning.special_min,
            special_max: tuning.special_max,
        }
    }

    /// Derive a fresh round seed from the wall clock and a draw from `rng`,
    /// reseed, then roll the crash point. Always >= 1.0.
    pub fn generate<R: RandomSource + ?Sized>(&self, rng: &mut R, wall_clock_secs: f64) -> f64 {
        // Decorrelates rounds; not a fairness commitment
        let material = format!("{}", wall_clock_secs + rng.next_f64());
        let digest = blake3::hash(material.as_bytes());
        rng.reseed(digest.as_bytes());

        self.roll(rng)
    }

    /// Roll a crash point from the current generator state
    pub fn roll<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f64 {
        let raw = rng.next_f64();
        let mut crash = 1.0 + raw.powf(self.skew) * self.max_range;

        if rng.next_f64() < self.special_chance {
            crash = rng.uniform(self.special_min, self.special_max);
        }

        crash.max(1.0)
    }
}
