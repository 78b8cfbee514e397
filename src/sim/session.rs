//! Session lifecycle: start, pause, game over, high score

use rand::Rng;

use super::player::Player;
use super::state::{GameEvent, GameState, PhaseState, StartOptions, Status};
use crate::consts::MUSIC_TRACKS;

/// Reset everything run-scoped and enter Playing.
///
/// Bumps the session generation so deferred commits armed by the previous
/// run are recognised as stale.
pub fn start(state: &mut GameState, options: StartOptions) {
    state.generation += 1;
    state.options = options;
    state.status = Status::Playing;
    state.score = 0;
    state.speed = state.tuning.base_speed;
    state.frames = 0;
    state.spawn_timer = 0.0;
    state.obstacle_counter = 0;
    state.canyon_passes = 0;
    state.player = Player::new(&state.tuning);
    state.obstacles.clear();
    state.phase = PhaseState::new(&state.tuning);
    state.mist.clear();
    state.sharks.clear();
    state.prompt_timer = 0.0;
    state.track = state.rng.random_range(0..MUSIC_TRACKS);

    log::info!(
        "Session {} started (debug={}, god_mode={})",
        state.generation,
        options.debug,
        options.god_mode
    );
    state.push_event(GameEvent::SessionStarted { track: state.track });
}

/// End the run. Repeat calls are no-ops.
pub fn game_over(state: &mut GameState) {
    if state.status == Status::GameOver {
        return;
    }
    state.status = Status::GameOver;
    state.push_event(GameEvent::Crash);

    let new_high_score = state.score > state.high_score;
    if new_high_score {
        state.high_score = state.score;
        state.push_event(GameEvent::HighScore { value: state.score });
    }
    log::info!(
        "Game over: score {} (high {}{})",
        state.score,
        state.high_score,
        if new_high_score { ", new" } else { "" }
    );
    state.push_event(GameEvent::GameOver {
        score: state.score,
        new_high_score,
    });
}

/// Flip between Playing and Paused; ignored otherwise
pub fn toggle_pause(state: &mut GameState) {
    match state.status {
        Status::Playing => {
            state.status = Status::Paused;
            state.push_event(GameEvent::Paused);
        }
        Status::Paused => {
            state.status = Status::Playing;
            state.push_event(GameEvent::Resumed);
        }
        Status::Start | Status::GameOver => {}
    }
}
