//! Game state and core simulation types
//!
//! One `GameState` is owned by the clock driver and threaded through every
//! update call. Nothing here is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ambient::{Backdrop, MistPuff, Shark};
use super::channel::Channel;
use super::player::Player;
use crate::consts::JITTER_SLOTS;
use crate::tuning::Tuning;

/// Outer session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Waiting for the first start command
    Start,
    /// Active gameplay (including phase transitions)
    Playing,
    /// Game is paused
    Paused,
    /// Run ended, state frozen
    GameOver,
}

/// One of the two hazard layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Zone {
    /// Wide, independent gaps
    OpenSea,
    /// Narrow gaps following a drifting channel
    Canyon,
}

impl Zone {
    pub fn other(self) -> Zone {
        match self {
            Zone::OpenSea => Zone::Canyon,
            Zone::Canyon => Zone::OpenSea,
        }
    }
}

/// Phase as seen by the rest of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    OpenSea,
    Canyon,
    /// Waiting on the deferred commit; spawning suspended, deaths disabled
    Transitioning,
}

/// Operator-supplied session options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartOptions {
    /// Expose collision geometry to the renderer
    pub debug: bool,
    /// Disable every death condition
    pub god_mode: bool,
}

/// Particle flavours behind the boat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Continuous low-rate trail
    Wake,
    /// Burst emitted when a jump interrupts a fall
    Splash,
}

/// A decorative particle (never gameplay-affecting)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// 0-1, removed once it reaches zero
    pub alpha: f32,
    pub kind: ParticleKind,
}

/// Something floating in an obstacle's gap
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Item {
    #[default]
    None,
    /// Anchor is relative to the obstacle origin
    Coin { anchor: Vec2 },
    /// Barrel granting temporary invincibility
    Powerup { anchor: Vec2 },
}

impl Item {
    pub fn anchor(&self) -> Option<Vec2> {
        match *self {
            Item::None => None,
            Item::Coin { anchor } | Item::Powerup { anchor } => Some(anchor),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Item::None)
    }
}

/// A top/bottom wall pair scrolling toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Spawn counter value at creation
    pub id: u32,
    /// Left edge of the obstacle
    pub x: f32,
    /// Height of the top wall
    pub top: f32,
    /// Height of the bottom wall
    pub bottom: f32,
    /// Vertical opening between the walls
    pub gap: f32,
    /// Scored at most once
    pub passed: bool,
    pub item: Item,
    pub zone: Zone,
    /// Per-segment horizontal offsets for stacked-wall rendering
    pub jitter: [f32; JITTER_SLOTS],
    /// Rotate wall sprites by 90°
    pub rotate: bool,
}

impl Obstacle {
    /// Y coordinate of the bottom wall's upper edge
    #[inline]
    pub fn bottom_edge(&self) -> f32 {
        self.top + self.gap
    }

    /// Item anchor in world coordinates
    pub fn item_position(&self) -> Option<Vec2> {
        self.item.anchor().map(|a| Vec2::new(self.x + a.x, a.y))
    }
}

/// A transition armed but not yet committed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransition {
    pub target: Zone,
    /// Session generation the commit belongs to
    pub generation: u64,
}

/// Phase controller state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseState {
    /// Last committed zone
    pub zone: Zone,
    pub pending: Option<PendingTransition>,
    /// Suppresses every death condition while a transition is pending
    pub transition_safe: bool,
    pub channel: Channel,
}

impl PhaseState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            zone: Zone::OpenSea,
            pending: None,
            transition_safe: false,
            channel: Channel::new(tuning.channel_start),
        }
    }

    pub fn phase(&self) -> Phase {
        match (self.pending, self.zone) {
            (Some(_), _) => Phase::Transitioning,
            (None, Zone::OpenSea) => Phase::OpenSea,
            (None, Zone::Canyon) => Phase::Canyon,
        }
    }

    pub fn is_canyon(&self) -> bool {
        self.phase() == Phase::Canyon
    }
}

/// Signals for audio/UI/storage collaborators, drained by the host each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh run began; the host should start this music track
    SessionStarted { track: u32 },
    Jump,
    Crash,
    GameOver { score: u64, new_high_score: bool },
    /// Persist this value under the high-score key
    HighScore { value: u64 },
    CoinCollected { value: u64 },
    PowerupCollected { secs: f32 },
    /// Show the narrative prompt and arm the deferred commit
    TransitionStarted {
        target: Zone,
        generation: u64,
        prompt_secs: f32,
    },
    PhaseCommitted { zone: Zone },
    Paused,
    Resumed,
    /// The finished music track should play again
    RestartTrack,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    /// Bumped on every start; guards deferred commits
    pub generation: u64,
    pub status: Status,
    pub options: StartOptions,
    pub score: u64,
    pub high_score: u64,
    /// Scroll speed, derived from score every tick
    pub speed: f32,
    /// Ticks simulated in this session
    pub frames: u64,
    pub spawn_timer: f32,
    pub obstacle_counter: u32,
    /// Canyon obstacles passed since the last canyon point
    pub canyon_passes: u32,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub phase: PhaseState,
    pub backdrop: Backdrop,
    pub mist: Vec<MistPuff>,
    pub sharks: Vec<Shark>,
    /// Seconds the narrative prompt remains visible
    pub prompt_timer: f32,
    /// Music track picked at start
    pub track: u32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle session waiting on the start screen
    pub fn new(seed: u64, tuning: Tuning, high_score: u64) -> Self {
        let player = Player::new(&tuning);
        let phase = PhaseState::new(&tuning);
        Self {
            speed: tuning.base_speed,
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            generation: 0,
            status: Status::Start,
            options: StartOptions::default(),
            score: 0,
            high_score,
            frames: 0,
            spawn_timer: 0.0,
            obstacle_counter: 0,
            canyon_passes: 0,
            player,
            obstacles: Vec::new(),
            phase,
            backdrop: Backdrop::default(),
            mist: Vec::new(),
            sharks: Vec::new(),
            prompt_timer: 0.0,
            track: 0,
            events: Vec::new(),
        }
    }

    /// Whether death conditions are currently suspended
    pub fn is_protected(&self) -> bool {
        self.player.is_invincible() || self.options.god_mode || self.phase.transition_safe
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand queued events to the caller
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}

/// Remove elements failing `keep` in O(1) each; order is not preserved
pub fn swap_retain<T>(items: &mut Vec<T>, mut keep: impl FnMut(&mut T) -> bool) {
    let mut i = 0;
    while i < items.len() {
        if keep(&mut items[i]) {
            i += 1;
        } else {
            items.swap_remove(i);
        }
    }
}
