//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be replayed or rebalanced
//! from a JSON file. `Tuning::default()` is the shipped balance.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::WORLD_HEIGHT;

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Gameplay balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Fixed horizontal position of the player
    pub player_x: f32,
    /// Starting (and non-finite recovery) vertical position
    pub player_start_y: f32,
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Velocity set by a jump (negative = up)
    pub jump_impulse: f32,
    /// Upper screen bound for the player
    pub min_y: f32,
    /// Lower screen bound for the player
    pub max_y: f32,
    /// Sprite tilt per unit of vertical velocity
    pub tilt_per_velocity: f32,

    // === Speed ===
    pub base_speed: f32,
    /// Score points per speed step
    pub speed_score_step: u64,
    /// Speed added per step
    pub speed_increment: f32,

    // === Phases ===
    /// Score cycle length covering one open-sea and one canyon stretch
    pub phase_cycle: u64,
    /// Cycle position where the canyon begins
    pub canyon_start: u64,
    /// Real-time delay before a phase transition commits
    pub transition_delay_ms: f64,
    /// How long the narrative prompt stays up after a transition begins
    pub prompt_secs: f32,

    // === Spawning ===
    pub spawn_x: f32,
    /// Scroll distance between open-sea obstacles
    pub open_spawn_distance: f32,
    /// Scroll distance between canyon obstacles
    pub canyon_spawn_distance: f32,
    pub open_gap: f32,
    pub canyon_gap: f32,
    pub open_top_min: f32,
    pub open_top_range: f32,
    /// Every Nth open-sea obstacle carries a powerup...
    pub open_powerup_every: u32,
    /// ...once the score reaches this
    pub open_powerup_min_score: u64,
    pub open_coin_chance: f64,
    pub canyon_powerup_every: u32,
    pub canyon_coin_chance: f64,
    /// Half-width of canyon wall jitter (open sea walls never jitter)
    pub canyon_jitter: f32,
    pub canyon_rotate_every: u32,

    // === Channel ===
    pub channel_start: f32,
    /// Total width of the per-spawn drift perturbation
    pub channel_kick: f32,
    pub channel_damping: f32,
    /// Horizontal travel used to bound drift by a reachable fall
    pub channel_reach: f32,
    /// Fraction of a free fall the channel may demand
    pub channel_fall_margin: f32,
    pub channel_soft_min: f32,
    pub channel_soft_max: f32,
    pub channel_push: f32,
    pub channel_min: f32,
    pub channel_max: f32,

    // === Collision & pickups ===
    pub hit_radius_x: f32,
    pub hit_radius_y: f32,
    /// Wall body offset from the obstacle origin
    pub body_offset: f32,
    pub body_width: f32,
    /// Item anchor offset from the obstacle origin
    pub item_offset_x: f32,
    pub pickup_radius: f32,
    pub coin_value: u64,
    pub powerup_secs: f32,
    /// Obstacle scrolled past the player once `x + pass_width < player_x`
    pub pass_width: f32,
    pub canyon_passes_per_point: u32,
    pub retire_x: f32,

    // === Decoration ===
    pub wake_every_ticks: u64,
    pub wake_fade: f32,
    pub splash_fade: f32,
    pub splash_count: usize,
    pub mist_chance: f64,
    pub shark_chance: f64,
    /// Score points per open-sea backdrop stage
    pub backdrop_stage_score: u64,
    pub backdrop_blend_rate: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_x: 200.0,
            player_start_y: 500.0,
            gravity: 1200.0,
            jump_impulse: -520.0,
            min_y: 30.0,
            max_y: 970.0,
            tilt_per_velocity: 0.0005,

            base_speed: 350.0,
            speed_score_step: 50,
            speed_increment: 30.0,

            phase_cycle: 650,
            canyon_start: 450,
            transition_delay_ms: 3500.0,
            prompt_secs: 3.5,

            spawn_x: 1850.0,
            open_spawn_distance: 700.0,
            canyon_spawn_distance: 130.0,
            open_gap: 260.0,
            canyon_gap: 320.0,
            open_top_min: 100.0,
            open_top_range: 450.0,
            open_powerup_every: 15,
            open_powerup_min_score: 20,
            open_coin_chance: 0.6,
            canyon_powerup_every: 40,
            canyon_coin_chance: 0.1,
            canyon_jitter: 30.0,
            canyon_rotate_every: 3,

            channel_start: 500.0,
            channel_kick: 180.0,
            channel_damping: 0.99,
            channel_reach: 140.0,
            channel_fall_margin: 0.8,
            channel_soft_min: 300.0,
            channel_soft_max: 700.0,
            channel_push: 2.5,
            channel_min: 220.0,
            channel_max: 780.0,

            hit_radius_x: 30.0,
            hit_radius_y: 25.0,
            body_offset: 30.0,
            body_width: 60.0,
            item_offset_x: 60.0,
            pickup_radius: 40.0,
            coin_value: 5,
            powerup_secs: 8.0,
            pass_width: 120.0,
            canyon_passes_per_point: 10,
            retire_x: -200.0,

            wake_every_ticks: 2,
            wake_fade: 5.5,
            splash_fade: 3.0,
            splash_count: 8,
            mist_chance: 0.2,
            shark_chance: 0.003,
            backdrop_stage_score: 150,
            backdrop_blend_rate: 2.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning file; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject balances the simulation cannot run sensibly
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if self.gravity <= 0.0 || !self.gravity.is_finite() {
            return invalid("gravity", "must be positive");
        }
        if self.jump_impulse >= 0.0 {
            return invalid("jump_impulse", "must point upward (negative)");
        }
        if self.min_y >= self.max_y {
            return invalid("min_y", "must be below max_y");
        }
        if !(self.min_y..=self.max_y).contains(&self.player_start_y) {
            return invalid("player_start_y", "must lie within the vertical bounds");
        }
        if self.base_speed <= 0.0 {
            return invalid("base_speed", "must be positive");
        }
        if self.speed_score_step == 0 {
            return invalid("speed_score_step", "must be non-zero");
        }
        if self.speed_increment < 0.0 || !self.speed_increment.is_finite() {
            return invalid("speed_increment", "must not be negative");
        }
        if self.phase_cycle == 0 || self.canyon_start >= self.phase_cycle {
            return invalid("canyon_start", "must fall inside the phase cycle");
        }
        if self.open_spawn_distance <= 0.0 || self.canyon_spawn_distance <= 0.0 {
            return invalid("spawn_distance", "must be positive");
        }
        if self.open_gap >= WORLD_HEIGHT || self.canyon_gap >= WORLD_HEIGHT {
            return invalid("gap", "must be smaller than the world height");
        }
        if self.channel_reach <= 0.0 || !self.channel_reach.is_finite() {
            return invalid("channel_reach", "must be positive");
        }
        if self.channel_fall_margin < 0.0 || !self.channel_fall_margin.is_finite() {
            return invalid("channel_fall_margin", "must not be negative");
        }
        if self.channel_min > self.channel_max {
            return invalid("channel_min", "must not exceed channel_max");
        }
        if self.canyon_passes_per_point == 0 {
            return invalid("canyon_passes_per_point", "must be non-zero");
        }
        if self.open_powerup_every == 0
            || self.canyon_powerup_every == 0
            || self.canyon_rotate_every == 0
        {
            return invalid("every", "cadence counters must be non-zero");
        }
        if self.wake_every_ticks == 0 || self.backdrop_stage_score == 0 {
            return invalid("wake_every_ticks", "cadence counters must be non-zero");
        }
        if self.hit_radius_x <= 0.0 || self.hit_radius_y <= 0.0 {
            return invalid("hit_radius", "must be positive");
        }
        let chances = [
            self.open_coin_chance,
            self.canyon_coin_chance,
            self.mist_chance,
            self.shark_chance,
        ];
        if chances.iter().any(|p| !(0.0..=1.0).contains(p)) {
            return invalid("chance", "probabilities must lie in 0..=1");
        }
        if self.body_width < 0.0 {
            return invalid("body_width", "must not be negative");
        }
        Ok(())
    }

    /// Vertical gap for a zone's obstacles
    pub fn gap(&self, canyon: bool) -> f32 {
        if canyon { self.canyon_gap } else { self.open_gap }
    }
}
