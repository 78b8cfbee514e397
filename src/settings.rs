//! Player preferences
//!
//! Persisted separately from the high score, as JSON under its own key.

use serde::{Deserialize, Serialize};

use crate::highscore::ScoreStore;
use crate::sim::StartOptions;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Draw collision boxes over the walls
    pub debug_overlay: bool,
    /// Disable every death condition
    pub god_mode: bool,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_overlay: false,
            god_mode: false,
            music_volume: 0.4,
            muted: false,
        }
    }
}

impl Settings {
    const STORAGE_KEY: &'static str = "troubledWatersSettings";

    /// Options handed to the next start command
    pub fn start_options(&self) -> StartOptions {
        StartOptions {
            debug: self.debug_overlay,
            god_mode: self.god_mode,
        }
    }

    /// Volume the host should actually play music at
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.music_volume.clamp(0.0, 1.0)
        }
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Load settings, falling back to defaults when absent or unreadable
    pub fn load(store: &impl ScoreStore) -> Self {
        match store.load_json(Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// Best-effort save
    pub fn save(&self, store: &mut impl ScoreStore) {
        match store.save_json(Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {}", e),
        }
    }
}
