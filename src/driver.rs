//! Clock driver
//!
//! Bridges host time (milliseconds from the animation callback) and the
//! fixed-step simulation:
//! - `FixedStep` gates host callbacks down to at most one tick per frame
//!   interval. A late callback still runs a single tick; time lost to a
//!   stall is dropped, never replayed.
//! - `Scheduler` holds work due at a later host time (phase commits, music
//!   restarts). It fires before the tick of the first callback at or past
//!   the due time, whatever the session status.
//! - `Game` owns both, plus the session and the score store, and routes the
//!   session's events to whichever of them needs to act on one.

use glam::Vec2;

use crate::consts::{FRAME_INTERVAL_MS, MUTE_BUTTON, SIM_DT, TRACK_RESTART_DELAY_MS};
use crate::highscore::ScoreStore;
use crate::sim::{GameEvent, GameState, Status, Zone, handle_input, phase, tick};
use crate::snapshot::Snapshot;
use crate::tuning::Tuning;

pub use crate::sim::tick::Input;

/// Frame gate keyed by host timestamps
#[derive(Debug, Clone, Copy)]
pub struct FixedStep {
    interval_ms: f64,
    last: f64,
}

impl FixedStep {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last: 0.0,
        }
    }

    /// Whether a tick should run for a callback at `now`
    pub fn accept(&mut self, now: f64) -> bool {
        let elapsed = now - self.last;
        if elapsed < self.interval_ms {
            return false;
        }
        self.last = now - (elapsed % self.interval_ms);
        true
    }
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(FRAME_INTERVAL_MS)
    }
}

/// Work deferred to a later host time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Deferred {
    /// Finish a phase transition armed under `generation`
    CommitPhase { generation: u64, target: Zone },
    /// Replay the music track that just ended
    RestartTrack,
}

/// Due-time ordered queue of deferred work
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    entries: Vec<(f64, Deferred)>,
}

impl Scheduler {
    /// Queue `work` for `due_ms`; equal due times fire in insertion order
    pub fn schedule(&mut self, due_ms: f64, work: Deferred) {
        let at = self.entries.partition_point(|(due, _)| *due <= due_ms);
        self.entries.insert(at, (due_ms, work));
    }

    /// Remove and return everything due at or before `now`
    pub fn due(&mut self, now: f64) -> Vec<Deferred> {
        let n = self.entries.partition_point(|(due, _)| *due <= now);
        self.entries.drain(..n).map(|(_, work)| work).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One running game: session, clocks, and storage
pub struct Game<S: ScoreStore> {
    state: GameState,
    step: FixedStep,
    scheduler: Scheduler,
    store: S,
    events: Vec<GameEvent>,
}

impl<S: ScoreStore> Game<S> {
    pub fn new(seed: u64, tuning: Tuning, store: S) -> Self {
        let high_score = match store.load_high_score() {
            Ok(score) => score,
            Err(e) => {
                log::warn!("Could not read high score, starting from 0: {}", e);
                0
            }
        };
        log::info!("Game created (seed {}, high score {})", seed, high_score);
        Self {
            state: GameState::new(seed, tuning, high_score),
            step: FixedStep::default(),
            scheduler: Scheduler::default(),
            store,
            events: Vec::new(),
        }
    }

    /// Apply a host input delivered at host time `now`
    pub fn handle(&mut self, input: Input, now: f64) {
        handle_input(&mut self.state, input);
        self.route_events(now);
    }

    /// Pointer press at a world-space position.
    ///
    /// On the pause screen a press on the mute button only reports itself
    /// (returns true, the host owns the music) and anything else resumes.
    pub fn pointer(&mut self, at: Vec2, now: f64) -> bool {
        if self.state.status == Status::Paused {
            let [x, y, w, h] = MUTE_BUTTON;
            if (x..=x + w).contains(&at.x) && (y..=y + h).contains(&at.y) {
                return true;
            }
        }
        self.handle(Input::Jump, now);
        false
    }

    /// Host animation callback. Returns a snapshot when a tick ran.
    pub fn frame(&mut self, now: f64) -> Option<Snapshot> {
        self.fire_due(now);
        let stepped = self.step.accept(now);
        if stepped {
            tick(&mut self.state, SIM_DT);
        }
        self.route_events(now);
        stepped.then(|| Snapshot::capture(&self.state))
    }

    /// The music collaborator reports its track finished
    pub fn track_ended(&mut self, now: f64) {
        self.scheduler
            .schedule(now + TRACK_RESTART_DELAY_MS, Deferred::RestartTrack);
    }

    /// Events accumulated since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    fn fire_due(&mut self, now: f64) {
        for work in self.scheduler.due(now) {
            match work {
                Deferred::CommitPhase { generation, target } => {
                    phase::commit(&mut self.state, generation, target);
                }
                Deferred::RestartTrack => self.state.push_event(GameEvent::RestartTrack),
            }
        }
    }

    fn route_events(&mut self, now: f64) {
        for event in self.state.take_events() {
            match event {
                GameEvent::TransitionStarted {
                    target, generation, ..
                } => {
                    let due = now + self.state.tuning.transition_delay_ms;
                    self.scheduler
                        .schedule(due, Deferred::CommitPhase { generation, target });
                }
                GameEvent::HighScore { value } => {
                    if let Err(e) = self.store.save_high_score(value) {
                        log::warn!("Failed to save high score {}: {}", value, e);
                    }
                }
                _ => {}
            }
            self.events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscore::MemoryStore;
    use crate::sim::{Phase, StartOptions, session};

    fn started(store: MemoryStore) -> Game<MemoryStore> {
        let mut game = Game::new(3, Tuning::default(), store);
        game.handle(Input::Start(StartOptions::default()), 0.0);
        game.drain_events();
        game
    }

    #[test]
    fn test_fixed_step_gates_callbacks() {
        let mut step = FixedStep::new(FRAME_INTERVAL_MS);
        assert!(!step.accept(10.0));
        assert!(step.accept(20.0));
        assert!(!step.accept(30.0));
        assert!(step.accept(40.0));
    }

    #[test]
    fn test_scheduler_orders_by_due_time() {
        let mut scheduler = Scheduler::default();
        scheduler.schedule(300.0, Deferred::RestartTrack);
        scheduler.schedule(
            100.0,
            Deferred::CommitPhase {
                generation: 1,
                target: Zone::Canyon,
            },
        );
        assert!(scheduler.due(50.0).is_empty());
        assert_eq!(
            scheduler.due(300.0),
            vec![
                Deferred::CommitPhase {
                    generation: 1,
                    target: Zone::Canyon
                },
                Deferred::RestartTrack
            ]
        );
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_commit_lands_after_delay() {
        let mut game = started(MemoryStore::new());
        game.state_mut().score = 451;

        assert!(game.frame(20.0).is_some());
        assert_eq!(game.state().phase.phase(), Phase::Transitioning);
        assert_eq!(game.scheduler().len(), 1);

        game.frame(3000.0);
        assert_eq!(game.state().phase.phase(), Phase::Transitioning);

        game.frame(3520.0);
        assert_eq!(game.state().phase.phase(), Phase::Canyon);
        assert_eq!(game.state().status, Status::Playing);
        assert!(
            game.drain_events()
                .contains(&GameEvent::PhaseCommitted { zone: Zone::Canyon })
        );
    }

    #[test]
    fn test_commit_from_previous_session_is_dropped() {
        let mut game = started(MemoryStore::new());
        game.state_mut().score = 451;
        game.frame(20.0);
        assert_eq!(game.state().phase.phase(), Phase::Transitioning);

        game.handle(Input::Start(StartOptions::default()), 100.0);
        game.frame(3520.0);
        assert_eq!(game.state().generation, 2);
        assert_eq!(game.state().phase.phase(), Phase::OpenSea);
        assert!(
            !game
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::PhaseCommitted { .. }))
        );
    }

    #[test]
    fn test_high_score_written_once() {
        let mut game = started(MemoryStore::with_high_score(10));
        assert_eq!(game.state().high_score, 10);
        game.state_mut().score = 25;
        game.state_mut().player.pos.y = 970.0;
        game.state_mut().player.vel = 100.0;

        game.frame(20.0);
        assert_eq!(game.state().status, Status::GameOver);
        session::game_over(game.state_mut());
        game.frame(40.0);

        assert_eq!(game.store().writes, 1);
        assert_eq!(game.store().load_high_score().unwrap(), 25);
    }

    #[test]
    fn test_stall_runs_one_tick() {
        let mut game = started(MemoryStore::new());
        game.state_mut().options.god_mode = true;
        assert!(game.frame(10.0).is_none());
        game.frame(20.0);
        assert_eq!(game.state().frames, 1);

        assert!(game.frame(5005.0).is_some());
        assert!(game.frame(5006.0).is_none());
        assert_eq!(game.state().frames, 2);
    }

    #[test]
    fn test_pointer_on_pause_screen() {
        let mut game = started(MemoryStore::new());
        game.handle(Input::TogglePause, 5.0);
        assert!(game.pointer(Vec2::new(900.0, 520.0), 6.0));
        assert_eq!(game.state().status, Status::Paused);

        assert!(!game.pointer(Vec2::new(100.0, 100.0), 7.0));
        assert_eq!(game.state().status, Status::Playing);
        assert_eq!(game.state().player.vel, 0.0);

        // While playing the same spot is just a jump
        assert!(!game.pointer(Vec2::new(900.0, 520.0), 8.0));
        assert_eq!(game.state().player.vel, -520.0);
    }

    #[test]
    fn test_track_restart_fires_later() {
        let mut game = started(MemoryStore::new());
        game.track_ended(500.0);
        game.frame(1400.0);
        assert!(!game.drain_events().contains(&GameEvent::RestartTrack));
        game.frame(1500.0);
        assert!(game.drain_events().contains(&GameEvent::RestartTrack));
    }
}
