//! Cosmetic systems: backdrop palette blending, canyon mist, distant sharks.
//!
//! None of this feeds back into gameplay, but it shares the session RNG so a
//! seeded run stays reproducible frame for frame.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameState, Phase, swap_retain};
use crate::approach;
use crate::consts::WORLD_HEIGHT;

/// Gradient stops for one backdrop stage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub top: [f32; 3],
    pub mid: [f32; 3],
}

/// Three open-sea stages followed by the canyon stage
pub const PALETTES: [Palette; 4] = [
    Palette {
        top: [30.0, 60.0, 114.0],
        mid: [42.0, 82.0, 152.0],
    },
    Palette {
        top: [56.0, 95.0, 79.0],
        mid: [95.0, 122.0, 107.0],
    },
    Palette {
        top: [30.0, 70.0, 50.0],
        mid: [60.0, 90.0, 80.0],
    },
    Palette {
        top: [40.0, 20.0, 10.0],
        mid: [70.0, 30.0, 20.0],
    },
];

pub const CANYON_PALETTE: usize = 3;

const MIST_SPAWN_X: f32 = 1850.0;
const MIST_RETIRE_X: f32 = -200.0;
const SHARK_SPAWN_X: f32 = 1900.0;
const SHARK_RETIRE_X: f32 = -150.0;

/// Displayed backdrop colors, easing toward the stage target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Backdrop {
    /// Index into `PALETTES` currently being approached
    pub target: usize,
    pub top: [f32; 3],
    pub mid: [f32; 3],
}

impl Default for Backdrop {
    fn default() -> Self {
        Self {
            target: 0,
            top: PALETTES[0].top,
            mid: PALETTES[0].mid,
        }
    }
}

/// A drifting fog bank (canyon only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MistPuff {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub size: f32,
    pub alpha: f32,
}

/// A fin crossing the open sea
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shark {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    /// Phase of the renderer's bobbing wave
    pub bob_phase: f32,
}

/// Palette stage for the current phase and score
pub fn palette_index(phase: Phase, score: u64, stage_score: u64) -> usize {
    if phase == Phase::Canyon {
        CANYON_PALETTE
    } else {
        ((score / stage_score) % 3) as usize
    }
}

pub fn update_backdrop(state: &mut GameState, dt: f32) {
    let target = palette_index(state.phase.phase(), state.score, state.tuning.backdrop_stage_score);
    let rate = state.tuning.backdrop_blend_rate;
    let backdrop = &mut state.backdrop;
    backdrop.target = target;
    for i in 0..3 {
        backdrop.top[i] = approach(backdrop.top[i], PALETTES[target].top[i], rate, dt);
        backdrop.mid[i] = approach(backdrop.mid[i], PALETTES[target].mid[i], rate, dt);
    }
}

pub fn update_mist(state: &mut GameState, dt: f32) {
    if !state.phase.is_canyon() {
        state.mist.clear();
        return;
    }

    if state.rng.random_bool(state.tuning.mist_chance) {
        let rng = &mut state.rng;
        state.mist.push(MistPuff {
            x: MIST_SPAWN_X,
            y: rng.random::<f32>() * WORLD_HEIGHT,
            vx: -state.speed * (1.0 + rng.random::<f32>()),
            size: rng.random::<f32>() * 80.0 + 40.0,
            alpha: rng.random::<f32>() * 0.2,
        });
    }

    swap_retain(&mut state.mist, |m| {
        m.x += m.vx * dt;
        m.x >= MIST_RETIRE_X
    });
}

pub fn update_sharks(state: &mut GameState, dt: f32) {
    if state.phase.is_canyon() {
        state.sharks.clear();
        return;
    }

    if state.rng.random_bool(state.tuning.shark_chance) {
        let rng = &mut state.rng;
        state.sharks.push(Shark {
            x: SHARK_SPAWN_X,
            y: rng.random::<f32>() * 900.0 + 50.0,
            speed: state.speed * 1.5,
            bob_phase: rng.random::<f32>() * std::f32::consts::TAU,
        });
    }

    swap_retain(&mut state.sharks, |s| {
        s.x -= s.speed * dt;
        s.x >= SHARK_RETIRE_X
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::Zone;
    use crate::tuning::Tuning;

    fn canyon_state() -> GameState {
        let mut state = GameState::new(3, Tuning::default(), 0);
        state.phase.zone = Zone::Canyon;
        state
    }

    #[test]
    fn test_palette_index_rotates_every_stage() {
        assert_eq!(palette_index(Phase::OpenSea, 0, 150), 0);
        assert_eq!(palette_index(Phase::OpenSea, 150, 150), 1);
        assert_eq!(palette_index(Phase::OpenSea, 320, 150), 2);
        assert_eq!(palette_index(Phase::OpenSea, 450, 150), 0);
        assert_eq!(palette_index(Phase::Canyon, 460, 150), CANYON_PALETTE);
        assert_eq!(palette_index(Phase::Transitioning, 460, 150), 0);
    }

    #[test]
    fn test_backdrop_eases_toward_canyon() {
        let mut state = canyon_state();
        let before = state.backdrop.top[0];
        update_backdrop(&mut state, SIM_DT);
        assert_eq!(state.backdrop.target, CANYON_PALETTE);
        let after = state.backdrop.top[0];
        // 30 -> 40, moving 2 * dt of the distance
        assert!(after > before && after < PALETTES[CANYON_PALETTE].top[0]);
    }

    #[test]
    fn test_mist_only_in_canyon() {
        let mut state = canyon_state();
        state.tuning.mist_chance = 1.0;
        update_mist(&mut state, SIM_DT);
        assert_eq!(state.mist.len(), 1);

        state.phase.zone = Zone::OpenSea;
        update_mist(&mut state, SIM_DT);
        assert!(state.mist.is_empty());
    }

    #[test]
    fn test_sharks_cleared_in_canyon_and_retired() {
        let mut state = GameState::new(3, Tuning::default(), 0);
        state.tuning.shark_chance = 1.0;
        update_sharks(&mut state, SIM_DT);
        assert_eq!(state.sharks.len(), 1);

        state.tuning.shark_chance = 0.0;
        state.sharks[0].x = -149.0;
        update_sharks(&mut state, SIM_DT);
        assert!(state.sharks.is_empty());

        state.tuning.shark_chance = 1.0;
        update_sharks(&mut state, SIM_DT);
        state.phase.zone = Zone::Canyon;
        update_sharks(&mut state, SIM_DT);
        assert!(state.sharks.is_empty());
    }
}
