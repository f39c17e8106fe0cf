//! Multiplier growth curve
//!
//! `multiplier = 1 + factor * elapsed^exponent`. With an exponent above 1
//! the climb accelerates the longer the plane stays up.

use crate::tuning::Tuning;

/// Maps elapsed flight time to the current multiplier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiplierClock {
    pub growth_factor: f64,
    pub growth_exponent: f64,
}

impl Default for MultiplierClock {
    fn default() -> Self {
        Self::from_tuning(&Tuning::default())
    }
}

impl MultiplierClock {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            growth_factor: tuning.growth_factor,
            growth_exponent: tuning.growth_exponent,
        }
    }

    /// Multiplier after `elapsed` seconds of flight. Negative time clamps to 0.
    #[inline]
    pub fn multiplier_at(&self, elapsed: f64) -> f64 {
        1.0 + self.growth_factor * elapsed.max(0.0).powf(self.growth_exponent)
    }

    /// Seconds of flight needed to reach `multiplier`
    pub fn elapsed_for(&self, multiplier: f64) -> f64 {
        if multiplier <= 1.0 || self.growth_factor <= 0.0 {
            return 0.0;
        }
        ((multiplier - 1.0) / self.growth_factor).powf(1.0 / self.growth_exponent)
    }
}
