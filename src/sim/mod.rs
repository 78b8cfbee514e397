//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies
//! - Deferred work (phase commits) is scheduled by the driver, not here

pub mod ambient;
pub mod autopilot;
pub mod channel;
pub mod collision;
pub mod obstacles;
pub mod phase;
pub mod player;
pub mod session;
pub mod state;
pub mod tick;

pub use ambient::{Backdrop, MistPuff, PALETTES, Palette, Shark};
pub use channel::Channel;
pub use collision::{WallContact, ellipse_contains, wall_contact, within_pickup};
pub use player::{Motion, Player};
pub use state::{
    GameEvent, GameState, Item, Obstacle, Particle, ParticleKind, PendingTransition, Phase,
    PhaseState, StartOptions, Status, Zone,
};
pub use tick::{Input, handle_input, tick};
