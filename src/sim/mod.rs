//! Deterministic round simulation
//!
//! All gameplay logic lives here:
//! - Time only advances through `Session::advance`
//! - Gameplay randomness only through an injected `RandomSource`
//! - No rendering, audio or platform dependencies

pub mod clock;
pub mod crash;
pub mod flight;
pub mod particles;
pub mod rng;
pub mod scheduler;
pub mod session;

pub use clock::MultiplierClock;
pub use crash::CrashPointGenerator;
pub use flight::FlightPath;
pub use particles::{EmitSpec, Particle, ParticlePool};
pub use rng::{PcgSource, RandomSource};
pub use scheduler::{Scheduler, Task};
pub use session::{GamePhase, RoundOutcome, Session, SessionEvent, system_wall_clock};
