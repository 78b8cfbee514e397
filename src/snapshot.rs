//! Render snapshot
//!
//! Everything a renderer needs to draw one frame, copied out of the session
//! so the host never touches simulation state directly. Serializes to JSON
//! for hosts on the other side of the wasm boundary.

use glam::Vec2;
use serde::Serialize;

use crate::sim::ambient::palette_index;
use crate::sim::{GameState, Item, MistPuff, Particle, Phase, Shark, Status, Zone};

/// Ring drawn around the boat while deaths are disabled
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Shield {
    pub god_mode: bool,
    /// Whole seconds left, shown under the ring (absent in god mode)
    pub countdown: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    /// Radians, proportional to vertical velocity
    pub rotation: f32,
    pub shield: Option<Shield>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleView {
    pub x: f32,
    pub top: f32,
    pub bottom: f32,
    pub gap: f32,
    /// Solid wall span used for collision, drawn in the debug overlay
    pub body_x: f32,
    pub body_width: f32,
    pub item: Item,
    /// World position of the item, if any
    pub item_at: Option<Vec2>,
    pub jitter: Vec<f32>,
    pub rotate: bool,
    pub canyon: bool,
}

/// Narrative prompt shown at the start of a transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PromptView {
    pub target: Zone,
    pub remaining: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackdropView {
    pub palette: usize,
    pub top: [f32; 3],
    pub mid: [f32; 3],
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub status: Status,
    pub phase: Phase,
    pub score: u64,
    pub high_score: u64,
    pub player: PlayerView,
    pub particles: Vec<Particle>,
    pub obstacles: Vec<ObstacleView>,
    pub mist: Vec<MistPuff>,
    pub sharks: Vec<Shark>,
    pub backdrop: BackdropView,
    pub prompt: Option<PromptView>,
    pub debug: bool,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let tuning = &state.tuning;
        let player = &state.player;

        let shield = if state.options.god_mode {
            Some(Shield {
                god_mode: true,
                countdown: None,
            })
        } else if player.is_invincible() {
            Some(Shield {
                god_mode: false,
                countdown: Some(player.invincible.ceil() as u32),
            })
        } else {
            None
        };

        let obstacles = state
            .obstacles
            .iter()
            .map(|o| ObstacleView {
                x: o.x,
                top: o.top,
                bottom: o.bottom,
                gap: o.gap,
                body_x: o.x + tuning.body_offset,
                body_width: tuning.body_width,
                item: o.item,
                item_at: o.item_position(),
                jitter: o.jitter.to_vec(),
                rotate: o.rotate,
                canyon: o.zone == Zone::Canyon,
            })
            .collect();

        let phase = state.phase.phase();
        let prompt = match state.phase.pending {
            Some(pending) if state.prompt_timer > 0.0 => Some(PromptView {
                target: pending.target,
                remaining: state.prompt_timer,
            }),
            _ => None,
        };

        Self {
            status: state.status,
            phase,
            score: state.score,
            high_score: state.high_score,
            player: PlayerView {
                x: player.pos.x,
                y: player.pos.y,
                rotation: player.tilt(tuning),
                shield,
            },
            particles: player.particles.clone(),
            obstacles,
            mist: state.mist.clone(),
            sharks: state.sharks.clone(),
            backdrop: BackdropView {
                palette: palette_index(phase, state.score, tuning.backdrop_stage_score),
                top: state.backdrop.top,
                mid: state.backdrop.mid,
            },
            prompt,
            debug: state.options.debug,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
