//! Phase controller: open sea → transitioning → canyon → transitioning → ...
//!
//! The score cycle decides which zone the run should be in. Crossing into
//! the other half of the cycle arms a transition; the commit arrives later
//! from the driver's real-time scheduler and carries the session generation
//! it was armed under, so a commit outliving its session does nothing.

use super::state::{GameEvent, GameState, PendingTransition, Phase, Zone};

/// Zone the score says the run belongs in
pub fn zone_for_score(score: u64, cycle: u64, canyon_start: u64) -> Zone {
    if score % cycle >= canyon_start {
        Zone::Canyon
    } else {
        Zone::OpenSea
    }
}

/// Begin a transition if the score crossed a cycle boundary.
///
/// Returns true when a transition started this tick.
pub fn check_cycle(state: &mut GameState) -> bool {
    let wanted = zone_for_score(
        state.score,
        state.tuning.phase_cycle,
        state.tuning.canyon_start,
    );
    let target = match (state.phase.phase(), wanted) {
        (Phase::OpenSea, Zone::Canyon) => Zone::Canyon,
        (Phase::Canyon, Zone::OpenSea) if state.score > 0 => Zone::OpenSea,
        _ => return false,
    };
    begin_transition(state, target);
    true
}

/// Suspend spawning and deaths until the deferred commit lands
pub fn begin_transition(state: &mut GameState, target: Zone) {
    let generation = state.generation;
    state.phase.pending = Some(PendingTransition { target, generation });
    state.phase.transition_safe = true;
    state.prompt_timer = state.tuning.prompt_secs;
    log::info!("Phase transition to {:?} at score {}", target, state.score);
    state.push_event(GameEvent::TransitionStarted {
        target,
        generation,
        prompt_secs: state.tuning.prompt_secs,
    });
}

/// Apply a deferred commit. Stale or redundant commits are no-ops.
pub fn commit(state: &mut GameState, generation: u64, target: Zone) -> bool {
    if generation != state.generation {
        log::warn!(
            "Dropping phase commit from session {} (current {})",
            generation,
            state.generation
        );
        return false;
    }
    let expected = PendingTransition { target, generation };
    if state.phase.pending != Some(expected) {
        log::debug!("No pending transition to {:?}, ignoring commit", target);
        return false;
    }

    state.phase.zone = target;
    state.phase.pending = None;
    state.phase.transition_safe = false;
    state.canyon_passes = 0;
    log::info!("Entered {:?}", target);
    state.push_event(GameEvent::PhaseCommitted { zone: target });
    true
}
