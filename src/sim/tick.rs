//! Fixed timestep simulation tick
//!
//! Advances one session by exactly one constant step. Inputs are applied
//! synchronously when delivered, so their effect shows from the next tick.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState, StartOptions, Status};
use super::{ambient, obstacles, phase, session};

/// Host input signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Input {
    /// Key, click or tap: jump while playing, resume while paused,
    /// restart from the start or game-over screens
    Jump,
    TogglePause,
    /// Start a fresh run with the given options
    Start(StartOptions),
}

/// Apply an input immediately
pub fn handle_input(state: &mut GameState, input: Input) {
    match input {
        Input::Jump => match state.status {
            Status::Playing => {
                state.player.jump();
                state.push_event(GameEvent::Jump);
            }
            Status::Paused => session::toggle_pause(state),
            Status::Start | Status::GameOver => {
                let options = state.options;
                session::start(state, options);
            }
        },
        Input::TogglePause => session::toggle_pause(state),
        Input::Start(options) => session::start(state, options),
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, dt: f32) {
    if state.status != Status::Playing {
        return;
    }

    state.frames += 1;
    state.speed = obstacles::speed_for_score(state.score, &state.tuning);

    ambient::update_backdrop(state, dt);
    ambient::update_sharks(state, dt);
    ambient::update_mist(state, dt);

    // The tick a transition begins, hazards hold still
    if !phase::check_cycle(state) {
        obstacles::update(state, dt);
        if state.status != Status::Playing {
            return;
        }
    }

    update_player(state, dt);
    state.prompt_timer = (state.prompt_timer - dt).max(0.0);
}

fn update_player(state: &mut GameState, dt: f32) {
    let motion = state.player.integrate(dt, &state.tuning);
    if motion.splashed {
        state.player.emit_splash(&mut state.rng, state.tuning.splash_count);
    }

    if motion.out_of_bounds {
        if state.is_protected() {
            state.player.clamp_to_bounds(&state.tuning);
        } else {
            session::game_over(state);
            return;
        }
    }

    if state.frames % state.tuning.wake_every_ticks == 0 {
        state.player.emit_wake(&mut state.rng, state.speed);
    }
    state.player.update_particles(dt, &state.tuning);
}
