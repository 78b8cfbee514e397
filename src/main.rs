//! Troubled Waters entry point
//!
//! Native builds run a seeded headless session under the autopilot and
//! print a JSON summary. The browser build is driven from the page through
//! `troubled_waters::web::WebGame`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::fs;
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;
    use serde::Serialize;

    use troubled_waters::consts::FRAME_INTERVAL_MS;
    use troubled_waters::highscore::FileStore;
    use troubled_waters::sim::{GameEvent, Phase, StartOptions, Status, autopilot};
    use troubled_waters::{Game, Input, MemoryStore, ScoreStore, Tuning};

    /// Host clock advance per callback, a hair over one frame interval
    const HOST_STEP_MS: f64 = FRAME_INTERVAL_MS + 0.01;

    #[derive(Debug, Parser)]
    #[command(name = "troubled-waters")]
    #[command(about = "Run a headless Troubled Waters session under the autopilot")]
    pub struct Cli {
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Ticks to simulate before stopping
        #[arg(long, default_value_t = 3600)]
        frames: u64,
        #[arg(long, default_value_t = false)]
        god_mode: bool,
        #[arg(long, default_value_t = false)]
        debug: bool,
        /// JSON file overriding tuning values
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// JSON file persisting the high score between runs
        #[arg(long)]
        store: Option<PathBuf>,
        /// Print the final render snapshot as well
        #[arg(long, default_value_t = false)]
        snapshot: bool,
    }

    #[derive(Debug, Default, Serialize)]
    struct Summary {
        seed: u64,
        frames: u64,
        host_ms: f64,
        status: Option<Status>,
        phase: Option<Phase>,
        score: u64,
        high_score: u64,
        new_high_score: bool,
        jumps: u32,
        coins: u32,
        powerups: u32,
        transitions: u32,
        commits: u32,
        obstacles_on_screen: usize,
    }

    impl Summary {
        fn record(&mut self, event: &GameEvent) {
            match event {
                GameEvent::Jump => self.jumps += 1,
                GameEvent::CoinCollected { .. } => self.coins += 1,
                GameEvent::PowerupCollected { .. } => self.powerups += 1,
                GameEvent::TransitionStarted { .. } => self.transitions += 1,
                GameEvent::PhaseCommitted { .. } => self.commits += 1,
                GameEvent::GameOver { new_high_score, .. } => {
                    self.new_high_score = *new_high_score
                }
                _ => {}
            }
        }
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let cli = Cli::parse();

        let tuning = match &cli.tuning {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read tuning file {}", path.display()))?;
                Tuning::from_json(&text)
                    .with_context(|| format!("invalid tuning file {}", path.display()))?
            }
            None => Tuning::default(),
        };

        match &cli.store {
            Some(path) => play(&cli, tuning, FileStore::new(path)),
            None => play(&cli, tuning, MemoryStore::new()),
        }
    }

    fn play<S: ScoreStore>(cli: &Cli, tuning: Tuning, store: S) -> Result<()> {
        let mut game = Game::new(cli.seed, tuning, store);
        let mut summary = Summary::default();

        let mut now = 0.0;
        game.handle(
            Input::Start(StartOptions {
                debug: cli.debug,
                god_mode: cli.god_mode,
            }),
            now,
        );

        let mut last = None;
        while game.state().frames < cli.frames && game.state().status == Status::Playing {
            now += HOST_STEP_MS;
            if autopilot::wants_jump(game.state()) {
                game.handle(Input::Jump, now);
            }
            if let Some(snapshot) = game.frame(now) {
                last = Some(snapshot);
            }
            for event in game.drain_events() {
                summary.record(&event);
            }
        }

        let state = game.state();
        log::info!(
            "Stopped after {} ticks: {:?}, score {}",
            state.frames,
            state.status,
            state.score
        );
        summary.seed = state.seed;
        summary.frames = state.frames;
        summary.host_ms = now;
        summary.status = Some(state.status);
        summary.phase = Some(state.phase.phase());
        summary.score = state.score;
        summary.high_score = state.high_score;
        summary.obstacles_on_screen = state.obstacles.len();

        println!("{}", serde_json::to_string_pretty(&summary)?);
        if cli.snapshot {
            let snapshot = last.unwrap_or_else(|| game.snapshot());
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry points live on `WebGame`, this is just to satisfy the compiler
}
