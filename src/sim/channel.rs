//! The canyon channel: a bounded random walk of the safe corridor's center.
//!
//! Drift picks up a random kick on every canyon spawn, decays toward zero,
//! and is capped by how far the boat can fall while the next obstacle
//! scrolls in, so the corridor never demands an impossible dodge.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Vertical center of the corridor
    pub center: f32,
    /// Center movement per spawn
    pub drift: f32,
}

impl Channel {
    pub fn new(center: f32) -> Self {
        Self { center, drift: 0.0 }
    }

    /// Largest per-spawn drift a free fall can keep up with at `speed`
    pub fn max_drift(speed: f32, gravity: f32, tuning: &Tuning) -> f32 {
        let travel_time = tuning.channel_reach / speed;
        let max_fall =
            0.5 * gravity * travel_time * travel_time * tuning.channel_fall_margin;
        max_fall / travel_time
    }

    /// Step the walk once and return the new center
    pub fn advance(&mut self, rng: &mut impl Rng, speed: f32, gravity: f32, tuning: &Tuning) -> f32 {
        self.drift += (rng.random::<f32>() - 0.5) * tuning.channel_kick;
        self.drift *= tuning.channel_damping;

        let limit = Self::max_drift(speed, gravity, tuning);
        self.drift = self.drift.clamp(-limit, limit);
        self.center += self.drift;

        // Lean back toward the middle near the edges
        if self.center < tuning.channel_soft_min {
            self.drift += tuning.channel_push;
        }
        if self.center > tuning.channel_soft_max {
            self.drift -= tuning.channel_push;
        }

        self.center = self.center.clamp(tuning.channel_min, tuning.channel_max);
        self.center
    }
}
