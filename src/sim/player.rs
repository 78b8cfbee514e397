//! The player's boat: vertical integrator with gravity, jump impulse,
//! invincibility window, and decorative wake/splash particles.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Particle, ParticleKind, swap_retain};
use crate::tuning::Tuning;

/// Wake spawns behind the hull, relative to the boat position
const WAKE_OFFSET: Vec2 = Vec2::new(28.0, 20.0);
const SPLASH_OFFSET: Vec2 = Vec2::new(10.0, 30.0);

/// Outcome of one integration step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Motion {
    /// Position left the vertical bounds (not yet clamped)
    pub out_of_bounds: bool,
    /// Velocity flipped from falling to rising this tick
    pub splashed: bool,
}

/// The player entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Vertical velocity (positive = falling)
    pub vel: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    /// Seconds of invincibility remaining
    pub invincible: f32,
    pub particles: Vec<Particle>,
    /// Velocity at the end of the previous tick
    last_vel: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, tuning.player_start_y),
            vel: 0.0,
            gravity: tuning.gravity,
            jump_impulse: tuning.jump_impulse,
            invincible: 0.0,
            particles: Vec::new(),
            last_vel: 0.0,
        }
    }

    /// Apply the jump impulse immediately; re-triggering mid-air re-applies it
    pub fn jump(&mut self) {
        self.vel = self.jump_impulse;
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible > 0.0
    }

    pub fn grant_invincibility(&mut self, secs: f32) {
        self.invincible = secs;
    }

    /// Sprite rotation hint for the renderer
    pub fn tilt(&self, tuning: &Tuning) -> f32 {
        self.vel * tuning.tilt_per_velocity
    }

    /// Advance one fixed step
    pub fn integrate(&mut self, dt: f32, tuning: &Tuning) -> Motion {
        self.invincible = (self.invincible - dt).max(0.0);
        self.vel += self.gravity * dt;
        self.pos.y += self.vel * dt;

        if !self.pos.y.is_finite() || !self.vel.is_finite() {
            log::warn!("Non-finite player state (y={}, vel={}), resetting", self.pos.y, self.vel);
            self.pos.y = tuning.player_start_y;
            self.vel = 0.0;
        }

        let splashed = self.last_vel > 0.0 && self.vel < 0.0;
        self.last_vel = self.vel;

        Motion {
            out_of_bounds: self.pos.y < tuning.min_y || self.pos.y > tuning.max_y,
            splashed,
        }
    }

    /// Pin the boat inside the vertical bounds and kill its velocity
    pub fn clamp_to_bounds(&mut self, tuning: &Tuning) {
        self.pos.y = self.pos.y.clamp(tuning.min_y, tuning.max_y);
        self.vel = 0.0;
        self.last_vel = 0.0;
    }

    pub fn emit_splash(&mut self, rng: &mut impl Rng, count: usize) {
        let origin = self.pos + SPLASH_OFFSET;
        for _ in 0..count {
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(
                    (rng.random::<f32>() - 0.7) * 200.0,
                    (rng.random::<f32>() - 0.5) * 150.0,
                ),
                size: rng.random::<f32>() * 4.0 + 2.0,
                alpha: 1.0,
                kind: ParticleKind::Splash,
            });
        }
    }

    pub fn emit_wake(&mut self, rng: &mut impl Rng, speed: f32) {
        self.particles.push(Particle {
            pos: self.pos + WAKE_OFFSET,
            vel: Vec2::new(-speed * 0.7, (rng.random::<f32>() - 0.5) * 50.0),
            size: rng.random::<f32>() + 0.5,
            alpha: 0.8,
            kind: ParticleKind::Wake,
        });
    }

    /// Move and fade particles, dropping the fully transparent ones
    pub fn update_particles(&mut self, dt: f32, tuning: &Tuning) {
        swap_retain(&mut self.particles, |p| {
            p.pos += p.vel * dt;
            let fade = match p.kind {
                ParticleKind::Splash => tuning.splash_fade,
                ParticleKind::Wake => tuning.wake_fade,
            };
            p.alpha -= fade * dt;
            p.alpha > 0.0
        });
    }
}
