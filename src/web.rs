//! Browser bindings
//!
//! The page owns the canvas, the audio element and the animation loop; it
//! forwards timestamps and inputs here and draws whatever snapshot comes
//! back. High score and settings persist in LocalStorage.

use std::sync::Once;

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::driver::{Game, Input};
use crate::highscore::LocalStore;
use crate::settings::Settings;
use crate::tuning::Tuning;

static LOGGING: Once = Once::new();

fn init_logging() {
    LOGGING.call_once(|| {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger already set: {}", e).into());
        }
    });
}

fn fresh_seed() -> u64 {
    let high = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (high << 32) ^ js_sys::Date::now() as u64
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game<LocalStore>,
    settings: Settings,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        Self::build(Tuning::default())
    }

    /// Build with a JSON tuning override
    pub fn with_tuning(json: &str) -> Result<WebGame, JsValue> {
        let tuning = Tuning::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::build(tuning))
    }

    /// Start button: remember the toggles and begin a run
    pub fn start(&mut self, debug: bool, god_mode: bool, now: f64) {
        if self.settings.debug_overlay != debug || self.settings.god_mode != god_mode {
            self.settings.debug_overlay = debug;
            self.settings.god_mode = god_mode;
            let mut store = LocalStore;
            self.settings.save(&mut store);
        }
        self.game
            .handle(Input::Start(self.settings.start_options()), now);
    }

    /// Keyboard input by `KeyboardEvent.code`; returns whether it was used
    pub fn key(&mut self, code: &str, now: f64) -> bool {
        let input = match code {
            "Space" => Input::Jump,
            "Escape" => Input::TogglePause,
            _ => return false,
        };
        self.game.handle(input, now);
        true
    }

    /// Pointer press in world coordinates
    pub fn pointer(&mut self, x: f32, y: f32, now: f64) {
        if self.game.pointer(Vec2::new(x, y), now) {
            self.settings.toggle_mute();
            let mut store = LocalStore;
            self.settings.save(&mut store);
        }
    }

    /// Animation callback; JSON snapshot when a tick ran
    pub fn frame(&mut self, now: f64) -> Option<String> {
        let snapshot = self.game.frame(now)?;
        match snapshot.to_json() {
            Ok(json) => Some(json),
            Err(e) => {
                log::error!("Snapshot serialization failed: {}", e);
                None
            }
        }
    }

    /// The audio element fired `ended`
    pub fn track_ended(&mut self, now: f64) {
        self.game.track_ended(now);
    }

    /// Pending events as a JSON array
    pub fn drain_events(&mut self) -> String {
        let events = self.game.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::error!("Event serialization failed: {}", e);
            "[]".to_string()
        })
    }

    pub fn high_score(&self) -> f64 {
        self.game.state().high_score as f64
    }

    pub fn music_volume(&self) -> f32 {
        self.settings.effective_music_volume()
    }

    pub fn muted(&self) -> bool {
        self.settings.muted
    }
}

impl WebGame {
    fn build(tuning: Tuning) -> WebGame {
        init_logging();
        let settings = Settings::load(&LocalStore);
        let seed = fresh_seed();
        log::info!("Troubled Waters starting with seed {}", seed);
        WebGame {
            game: Game::new(seed, tuning, LocalStore),
            settings,
        }
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
