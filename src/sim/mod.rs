//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio, or storage dependencies

pub mod collision;
pub mod particles;
pub mod physics;
pub mod population;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::{HazardHit, circles_overlap};
pub use population::{Live, Population};
pub use snapshot::{HazardView, ParticleView, ShipView, Snapshot};
pub use state::{
    Bullet, GameEvent, GamePhase, GameState, Hazard, HazardSize, Particle, ParticleTint, Ship,
};
pub use tick::{Actions, TickInput, tick};
