//! Flight path for the plane actor
//!
//! The path shape is fixed: a steep climb off the runway followed by a
//! shallow, turbulent ascent while drifting left. Only how much of it gets
//! traversed differs between rounds. The cursor moves one sample per tick,
//! so on-screen speed follows the tick rate rather than the multiplier.

use glam::Vec2;

/// Fraction of the path spent in the initial steep climb
pub const TAKEOFF_FRACTION: f32 = 0.15;
/// Vertical rise per unit of path during takeoff
pub const TAKEOFF_CLIMB: f32 = 2000.0;
/// Vertical rise per unit of path after takeoff
pub const CRUISE_CLIMB: f32 = 225.0;
/// Horizontal travel across the whole path (negative = leftward)
pub const HORIZONTAL_TRAVEL: f32 = -475.0;
/// Turbulence amplitude
pub const TURBULENCE_AMPLITUDE: f32 = 75.0;
/// Turbulence angular rate
pub const TURBULENCE_RATE: f32 = 15.0;

/// Position on the path at parameter `t` in [0, 1)
pub fn path_point(start: Vec2, t: f32) -> Vec2 {
    let x = start.x + t * HORIZONTAL_TRAVEL;
    let y = if t < TAKEOFF_FRACTION {
        start.y + t * TAKEOFF_CLIMB
    } else {
        let cruise_t = t - TAKEOFF_FRACTION;
        let base = start.y + TAKEOFF_FRACTION * TAKEOFF_CLIMB + cruise_t * CRUISE_CLIMB;
        base + TURBULENCE_AMPLITUDE * (cruise_t * TURBULENCE_RATE).sin()
    };
    Vec2::new(x, y)
}

/// Precomputed samples plus a forward-only cursor
#[derive(Debug, Clone)]
pub struct FlightPath {
    start: Vec2,
    samples: Vec<Vec2>,
    cursor: usize,
}

impl FlightPath {
    /// Build a path of `sample_count` points starting at `start`
    pub fn new(start: Vec2, sample_count: usize) -> Self {
        let mut path = Self {
            start,
            samples: Vec::with_capacity(sample_count),
            cursor: 0,
        };
        path.regenerate(sample_count);
        path
    }

    /// Recompute the samples in place and rewind the cursor
    pub fn regenerate(&mut self, sample_count: usize) {
        self.samples.clear();
        let n = sample_count as f32;
        self.samples
            .extend((0..sample_count).map(|i| path_point(self.start, i as f32 / n)));
        self.cursor = 0;
    }

    /// Step the cursor forward one sample, clamping at the end
    pub fn advance(&mut self) {
        if let Some(last) = self.samples.len().checked_sub(1) {
            self.cursor = (self.cursor + 1).min(last);
        }
    }

    /// Rewind to the first sample
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Current plane position
    pub fn position(&self) -> Vec2 {
        self.samples.get(self.cursor).copied().unwrap_or(self.start)
    }

    /// Direction of travel in radians (0 while sitting on the first sample)
    pub fn heading(&self) -> f32 {
        if self.cursor == 0 {
            return 0.0;
        }
        let delta = self.samples[self.cursor] - self.samples[self.cursor - 1];
        delta.y.atan2(delta.x)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor + 1 >= self.samples.len()
    }

    pub fn samples(&self) -> &[Vec2] {
        &self.samples
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }
}
