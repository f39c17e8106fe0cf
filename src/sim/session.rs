//! Round state machine
//!
//! A [`Session`] owns the wallet, the current round and the round history.
//! Commands (`place_bet`, `cash_out`, `reset_balance`) arrive from the UI and
//! are silently ignored when illegal; everything time-based happens in
//! [`Session::advance`], which the host calls once per frame.
//!
//! ```text
//! Betting --place_bet--> Flying --cash_out--> Result --1.0s--> Betting
//!                          |
//!                          +--multiplier >= crash--> Crashed --1.5s--> Betting
//! ```

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::MultiplierClock;
use super::crash::CrashPointGenerator;
use super::flight::FlightPath;
use super::particles::{EmitSpec, ParticlePool};
use super::rng::{PcgSource, RandomSource};
use super::scheduler::{Scheduler, Task};
use crate::consts::{EXHAUST_CHANCE, MAX_PENDING_EVENTS, SECONDARY_BURST_DELAY};
use crate::persistence::StatsStore;
use crate::stats::Stats;
use crate::tuning::Tuning;
use crate::ui::parse_bet;

/// Where the round currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a stake
    Betting,
    /// Multiplier climbing, cash-out available
    Flying,
    /// Round lost, waiting to return to betting
    Crashed,
    /// Round won, waiting to return to betting
    Result,
}

/// A settled round, as shown in the history strip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub multiplier: f64,
    pub success: bool,
}

/// Notable things that happened, for sound and HUD feedback
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    BetPlaced { amount: u64 },
    CashedOut { winnings: u64, multiplier: f64 },
    Crashed { multiplier: f64 },
    RoundReset,
    BalanceReset,
}

/// Wall-clock seconds since the Unix epoch
pub fn system_wall_clock() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// One player's game session
pub struct Session {
    tuning: Tuning,
    phase: GamePhase,
    balance: u64,
    current_bet: u64,
    multiplier: f64,
    /// Committed at bet placement, hidden until reached
    crash_point: f64,
    history: VecDeque<RoundOutcome>,
    stats: Stats,
    cooldown_bet: bool,
    cooldown_cashout: bool,

    /// Monotonic session time, advanced only by `advance`
    now: f64,
    flight_started_at: f64,

    clock: MultiplierClock,
    crash: CrashPointGenerator,
    rng: Box<dyn RandomSource>,
    wall_clock: fn() -> f64,

    flight: FlightPath,
    particles: ParticlePool,
    scheduler: Scheduler,
    store: Box<dyn StatsStore>,
    /// Undrained events, oldest dropped past `MAX_PENDING_EVENTS`
    events: VecDeque<SessionEvent>,
}

impl Session {
    /// New session with an entropy-seeded RNG
    pub fn new(tuning: Tuning, store: Box<dyn StatsStore>) -> Self {
        Self::with_rng(tuning, store, Box::new(PcgSource::from_entropy()))
    }

    /// New session drawing crash points from `rng`
    pub fn with_rng(tuning: Tuning, store: Box<dyn StatsStore>, rng: Box<dyn RandomSource>) -> Self {
        let stats = store.load_or_default();
        let particle_seed = system_wall_clock().to_bits();

        Self {
            phase: GamePhase::Betting,
            balance: tuning.initial_balance,
            current_bet: 0,
            multiplier: 1.0,
            crash_point: 1.0,
            history: VecDeque::with_capacity(tuning.history_len + 1),
            stats,
            cooldown_bet: false,
            cooldown_cashout: false,
            now: 0.0,
            flight_started_at: 0.0,
            clock: MultiplierClock::from_tuning(&tuning),
            crash: CrashPointGenerator::from_tuning(&tuning),
            rng,
            wall_clock: system_wall_clock,
            flight: FlightPath::new(tuning.plane_start, tuning.flight_samples),
            particles: ParticlePool::new(tuning.max_particles, particle_seed),
            scheduler: Scheduler::new(),
            store,
            events: VecDeque::with_capacity(MAX_PENDING_EVENTS),
            tuning,
        }
    }

    /// Replace the wall clock used for crash seed derivation
    pub fn with_wall_clock(mut self, wall_clock: fn() -> f64) -> Self {
        self.wall_clock = wall_clock;
        self
    }

    // === Commands ===

    /// Whether `amount` would be accepted right now
    pub fn can_place_bet(&self, amount: u64) -> bool {
        self.phase == GamePhase::Betting
            && !self.cooldown_bet
            && amount >= self.tuning.effective_min_bet()
            && amount <= self.balance
    }

    /// Stake `amount` and take off. Returns false (and changes nothing) if
    /// the bet is not allowed.
    pub fn place_bet(&mut self, amount: u64) -> bool {
        if !self.can_place_bet(amount) {
            log::debug!("Ignoring bet of {} in {:?}", amount, self.phase);
            return false;
        }

        self.balance -= amount;
        self.current_bet = amount;
        self.phase = GamePhase::Flying;
        self.multiplier = 1.0;
        self.flight_started_at = self.now;
        self.crash_point = self.crash.generate(self.rng.as_mut(), (self.wall_clock)());
        self.stats.total_games += 1;

        self.cooldown_bet = true;
        self.scheduler
            .schedule(self.now + self.tuning.cooldown_secs, Task::ClearBetCooldown);

        self.flight.regenerate(self.tuning.flight_samples);
        self.particles
            .emit(self.flight.position(), &EmitSpec::TAKEOFF_SMOKE);

        log::info!("Bet {} placed, balance {}", amount, self.balance);
        self.push_event(SessionEvent::BetPlaced { amount });
        true
    }

    /// Parse raw bet input from the UI and place it. Non-numeric input is
    /// rejected like any other invalid bet.
    pub fn place_bet_input(&mut self, input: &str) -> bool {
        match parse_bet(input) {
            Some(amount) => self.place_bet(amount),
            None => {
                log::debug!("Ignoring malformed bet input {:?}", input);
                false
            }
        }
    }

    pub fn can_cash_out(&self) -> bool {
        self.phase == GamePhase::Flying && !self.cooldown_cashout
    }

    /// Lock in the current multiplier. Returns the amount paid out, or None
    /// if there was nothing to cash out.
    pub fn cash_out(&mut self) -> Option<u64> {
        if !self.can_cash_out() {
            log::debug!("Ignoring cash-out in {:?}", self.phase);
            return None;
        }

        let winnings = (self.current_bet as f64 * self.multiplier).floor() as u64;
        let profit = winnings.saturating_sub(self.current_bet);
        self.balance += winnings;
        self.stats.record_win(self.multiplier, profit as f64);
        self.push_history(RoundOutcome {
            multiplier: self.multiplier,
            success: true,
        });
        self.phase = GamePhase::Result;

        self.cooldown_cashout = true;
        self.scheduler
            .schedule(self.now + self.tuning.cooldown_secs, Task::ClearCashoutCooldown);
        self.scheduler
            .schedule(self.now + self.tuning.cashout_reset_secs, Task::ResetToBetting);
        self.persist_stats();

        log::info!(
            "Cashed out at {:.2}x for {}, balance {}",
            self.multiplier,
            winnings,
            self.balance
        );
        self.push_event(SessionEvent::CashedOut {
            winnings,
            multiplier: self.multiplier,
        });
        Some(winnings)
    }

    pub fn can_reset_balance(&self) -> bool {
        self.phase == GamePhase::Betting
    }

    /// Restore the starting balance and clear the history strip.
    /// Lifetime stats are untouched.
    pub fn reset_balance(&mut self) -> bool {
        if !self.can_reset_balance() {
            log::debug!("Ignoring balance reset in {:?}", self.phase);
            return false;
        }
        self.balance = self.tuning.initial_balance;
        self.history.clear();
        log::info!("Balance reset to {}", self.balance);
        self.push_event(SessionEvent::BalanceReset);
        true
    }

    // === Tick ===

    /// Advance the session by `dt` seconds
    pub fn advance(&mut self, dt: f64) {
        // Non-finite or negative frames count as no time passing
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.now += dt;
        self.run_due_tasks();

        if self.phase == GamePhase::Flying {
            let elapsed = self.now - self.flight_started_at;
            self.multiplier = self.multiplier.max(self.clock.multiplier_at(elapsed));
            if self.multiplier >= self.crash_point {
                self.crash();
            }
        }

        self.particles.update(dt as f32);

        if self.phase == GamePhase::Flying {
            self.flight.advance();
            self.particles
                .maybe_emit(self.flight.position(), &EmitSpec::EXHAUST, EXHAUST_CHANCE);
        }
    }

    /// Cancel pending timers. Call when tearing the session down.
    pub fn shutdown(&mut self) {
        self.scheduler.cancel_all();
    }

    fn run_due_tasks(&mut self) {
        while let Some(task) = self.scheduler.pop_due(self.now) {
            match task {
                Task::ClearBetCooldown => self.cooldown_bet = false,
                Task::ClearCashoutCooldown => self.cooldown_cashout = false,
                Task::ResetToBetting => self.reset_to_betting(),
                Task::SecondaryBurst { at } => {
                    self.particles.emit(at, &EmitSpec::SECONDARY_BURST);
                }
            }
        }
    }

    fn crash(&mut self) {
        self.phase = GamePhase::Crashed;
        self.stats.record_loss();
        self.push_history(RoundOutcome {
            multiplier: self.multiplier,
            success: false,
        });
        self.persist_stats();

        let at = self.flight.position();
        self.particles.emit(at, &EmitSpec::EXPLOSION);
        self.scheduler
            .schedule(self.now + SECONDARY_BURST_DELAY, Task::SecondaryBurst { at });
        self.scheduler
            .schedule(self.now + self.tuning.crash_reset_secs, Task::ResetToBetting);

        log::info!(
            "Crashed at {:.2}x, lost {}, balance {}",
            self.multiplier,
            self.current_bet,
            self.balance
        );
        self.push_event(SessionEvent::Crashed {
            multiplier: self.multiplier,
        });
    }

    fn reset_to_betting(&mut self) {
        if !matches!(self.phase, GamePhase::Crashed | GamePhase::Result) {
            return;
        }
        self.phase = GamePhase::Betting;
        self.multiplier = 1.0;
        self.current_bet = 0;
        self.flight.reset();
        self.push_event(SessionEvent::RoundReset);
    }

    fn push_history(&mut self, outcome: RoundOutcome) {
        self.history.push_back(outcome);
        while self.history.len() > self.tuning.history_len {
            self.history.pop_front();
        }
    }

    fn push_event(&mut self, event: SessionEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    fn persist_stats(&self) {
        if let Err(e) = self.store.save(&self.stats) {
            log::warn!("Failed to save stats: {}", e);
        }
    }

    // === Read-only view ===

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// The crash point, once the round has crashed
    pub fn revealed_crash_point(&self) -> Option<f64> {
        (self.phase == GamePhase::Crashed).then_some(self.crash_point)
    }

    /// What cashing out now would pay, before flooring
    pub fn potential_payout(&self) -> f64 {
        self.current_bet as f64 * self.multiplier
    }

    /// Settled rounds, oldest first
    pub fn history(&self) -> impl ExactSizeIterator<Item = &RoundOutcome> {
        self.history.iter()
    }

    pub fn history_snapshot(&self) -> Vec<RoundOutcome> {
        self.history.iter().copied().collect()
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn bet_cooldown(&self) -> bool {
        self.cooldown_bet
    }

    pub fn cashout_cooldown(&self) -> bool {
        self.cooldown_cashout
    }

    /// Session time in seconds
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn particles(&self) -> &ParticlePool {
        &self.particles
    }

    pub fn flight(&self) -> &FlightPath {
        &self.flight
    }

    pub fn plane_position(&self) -> Vec2 {
        self.flight.position()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Take the events raised since the last call. Hosts should drain once
    /// per frame; only the newest `MAX_PENDING_EVENTS` are kept otherwise.
    pub fn drain_events(&mut self) -> std::collections::vec_deque::Drain<'_, SessionEvent> {
        self.events.drain(..)
    }

    #[cfg(test)]
    pub(crate) fn force_crash_point(&mut self, crash_point: f64) {
        self.crash_point = crash_point;
    }

    #[cfg(test)]
    pub(crate) fn force_multiplier(&mut self, multiplier: f64) {
        self.multiplier = multiplier;
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown();
    }
}
