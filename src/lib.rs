//! Crash Flight - a real-time crash multiplier game engine
//!
//! Core modules:
//! - `sim`: Round state machine, crash curve, flight path, particles
//! - `persistence`: Load/save of lifetime stats
//! - `stats`: Lifetime stats record
//! - `tuning`: Data-driven game balance
//! - `ui`: Control enablement and HUD projections

pub mod persistence;
pub mod sim;
pub mod stats;
pub mod tuning;
pub mod ui;

pub use persistence::{JsonFileStore, MemoryStore, StatsStore, StoreError};
pub use sim::{GamePhase, Session, SessionEvent};
pub use stats::Stats;
pub use tuning::Tuning;

/// Engine constants that are not worth tuning
pub mod consts {
    /// Rounds kept in the history strip
    pub const HISTORY_LEN: usize = 5;
    /// Chance per flying tick of puffing exhaust
    pub const EXHAUST_CHANCE: f32 = 0.5;
    /// Delay between the crash explosion and its follow-up burst (seconds)
    pub const SECONDARY_BURST_DELAY: f64 = 0.1;
    /// Session events kept when the host falls behind on draining
    pub const MAX_PENDING_EVENTS: usize = 64;
    /// Longest frame the driver will feed into the sim (seconds)
    pub const MAX_FRAME_DT: f64 = 0.1;
}
