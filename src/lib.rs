//! Troubled Waters - a side-scrolling sea and canyon dodger
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, hazards, phases, scoring)
//! - `driver`: Fixed-step clock driver and deferred event scheduler
//! - `snapshot`: Per-frame render view handed to the host
//! - `highscore`: High-score persistence collaborator
//! - `settings`: Player preferences
//! - `tuning`: Data-driven game balance
//! - `web`: Browser bindings (wasm32 only)

pub mod driver;
pub mod highscore;
pub mod settings;
pub mod sim;
pub mod snapshot;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use driver::{FixedStep, Game, Input};
pub use highscore::{HIGH_SCORE_KEY, MemoryStore, ScoreStore, StoreError};
pub use settings::Settings;
pub use snapshot::Snapshot;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Host frame interval (60 Hz)
    pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;
    /// Fixed simulation timestep, one tick per accepted frame
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// World dimensions (all gameplay runs at this scale)
    pub const WORLD_WIDTH: f32 = 1800.0;
    pub const WORLD_HEIGHT: f32 = 1000.0;

    /// Number of jitter offsets stored per obstacle for stacked-wall rendering
    pub const JITTER_SLOTS: usize = 10;

    /// Number of music tracks the host can loop through
    pub const MUSIC_TRACKS: u32 = 4;
    /// Mute toggle on the pause screen: x, y, width, height
    pub const MUTE_BUTTON: [f32; 4] = [750.0, 480.0, 300.0, 80.0];
    /// Delay before restarting a track that finished playing
    pub const TRACK_RESTART_DELAY_MS: f64 = 1000.0;
}

/// Linear approach of `current` toward `target` at `rate` per second
#[inline]
pub fn approach(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * rate * dt
}
