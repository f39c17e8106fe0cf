//! Crash Flight entry point
//!
//! Native builds run a headless autopilot: place a bet, cash out at a target
//! multiplier, repeat. Useful for soak-testing the engine and the stats file.
//!
//! Usage: `crash-flight [rounds] [target_multiplier] [bet]`
//! Without a bet argument the first tuning preset is staked.
//! Tuning is read from `$CRASH_FLIGHT_TUNING` (default `tuning.json`).

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use crash_flight::consts::MAX_FRAME_DT;
    use crash_flight::ui;
    use crash_flight::{GamePhase, JsonFileStore, Session, SessionEvent, Stats, Tuning};

    /// Autopilot settings from the command line
    struct Autopilot {
        rounds: u32,
        target: f64,
        bet: u64,
    }

    impl Autopilot {
        fn from_args(session: &Session) -> Self {
            let mut args = std::env::args().skip(1);
            let rounds = args.next().and_then(|a| a.parse().ok()).unwrap_or(10);
            let target = args.next().and_then(|a| a.parse().ok()).unwrap_or(2.0);
            let min_bet = session.tuning().effective_min_bet();
            let bet = args.next().and_then(|a| ui::parse_bet(&a)).unwrap_or_else(|| {
                let preset = ui::bet_presets(session).first().copied().unwrap_or(min_bet);
                ui::preset_bet(preset, min_bet)
            });
            Self { rounds, target, bet }
        }
    }

    /// Fixed-step driver around a session
    struct Game {
        session: Session,
        accumulator: f64,
        tick_dt: f64,
    }

    impl Game {
        fn new(tuning: Tuning) -> Self {
            let tick_dt = tuning.tick_dt();
            Self {
                session: Session::new(tuning, Box::new(JsonFileStore::default())),
                accumulator: 0.0,
                tick_dt,
            }
        }

        /// Feed one frame of wall time into the simulation
        fn update(&mut self, frame_dt: f64) {
            self.accumulator += frame_dt.min(MAX_FRAME_DT);
            while self.accumulator >= self.tick_dt {
                self.session.advance(self.tick_dt);
                self.accumulator -= self.tick_dt;
            }
            self.log_events();
        }

        fn log_events(&mut self) {
            for event in self.session.drain_events() {
                match event {
                    SessionEvent::BetPlaced { amount } => log::info!("[bet] {}", amount),
                    SessionEvent::CashedOut { winnings, multiplier } => {
                        log::info!("[cashout] +{} at {}", winnings, ui::multiplier_label(multiplier))
                    }
                    SessionEvent::Crashed { multiplier } => {
                        log::info!("[crash] {}", ui::crash_label(multiplier))
                    }
                    SessionEvent::RoundReset => log::debug!("[reset] back to betting"),
                    SessionEvent::BalanceReset => log::info!("[reset] balance restored"),
                }
            }
        }

        /// Play one round to completion. Returns false if no bet could be placed.
        fn play_round(&mut self, pilot: &Autopilot) -> bool {
            if self.session.balance() < pilot.bet {
                self.session.reset_balance();
            }
            if !self.session.place_bet(pilot.bet) {
                return false;
            }

            while self.session.phase() == GamePhase::Flying {
                if self.session.multiplier() >= pilot.target {
                    self.session.cash_out();
                }
                self.update(self.tick_dt);
            }
            while self.session.phase() != GamePhase::Betting {
                self.update(self.tick_dt);
            }
            // Let the bet cooldown lapse before the next round
            while self.session.bet_cooldown() {
                self.update(self.tick_dt);
            }
            true
        }
    }

    fn print_stats(stats: &Stats) {
        for line in ui::stats_lines(stats) {
            println!("{}", line);
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Crash Flight (native autopilot) starting...");

        let tuning_path =
            std::env::var("CRASH_FLIGHT_TUNING").unwrap_or_else(|_| "tuning.json".to_string());
        let tuning = Tuning::load_or_default(&tuning_path);
        let mut game = Game::new(tuning);
        let pilot = Autopilot::from_args(&game.session);
        log::info!(
            "Playing {} rounds, bet {}, cash out at {}",
            pilot.rounds,
            pilot.bet,
            ui::multiplier_label(pilot.target)
        );

        for round in 1..=pilot.rounds {
            if !game.play_round(&pilot) {
                log::warn!("Bet of {} can never be placed, stopping", pilot.bet);
                break;
            }
            let history: Vec<String> = game
                .session
                .history()
                .map(|o| ui::multiplier_label(o.multiplier))
                .collect();
            println!(
                "round {:>3}: balance {:>6}  history [{}]",
                round,
                game.session.balance(),
                history.join(", ")
            );
        }

        game.session.shutdown();
        println!();
        print_stats(game.session.stats());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm build is consumed as a library by the web host
}
