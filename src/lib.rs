//! Rockfall - A wrap-around asteroid field arcade game
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, waves, session state machine)
//! - `menu`: Context-dependent menu model
//! - `platform`: Input sources (scripted, autopilot)
//! - `audio`: Sound effect sink and event mapping
//! - `persistence`: High score and settings storage
//! - `tuning`: Data-driven game balance
//! - `app`: Fixed-step host driver tying the collaborators to the core

pub mod app;
pub mod audio;
pub mod highscores;
pub mod menu;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use app::App;
pub use highscores::HighScore;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per rendered frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Lives granted at the start of a session
    pub const MAX_LIVES: u8 = 4;
    /// Largest display scale offered by the menu
    pub const MAX_SCALE: u8 = 4;

    /// Collision radii
    pub const SHIP_RADIUS: f32 = 8.0;
    pub const BULLET_RADIUS: f32 = 2.0;

    /// Countdowns (seconds)
    pub const WAVE_TRANSITION_DURATION: f32 = 2.0;
    pub const SPAWN_COOLDOWN_DURATION: f32 = 1.0;
}

/// Rotate an offset about the origin by `degrees`.
///
/// Positive angles turn clockwise on screen (y axis points down).
#[inline]
pub fn rotate(offset: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(offset.x * cos - offset.y * sin, offset.x * sin + offset.y * cos)
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn wrap_angle(degrees: f32) -> f32 {
    degrees.rem_euclid(360.0)
}

/// Wrap a coordinate across `[0, extent]`, teleporting to the opposite edge.
#[inline]
pub fn wrap_axis(value: f32, extent: f32) -> f32 {
    if value < 0.0 {
        extent
    } else if value > extent {
        0.0
    } else {
        value
    }
}

/// Wrap a position across the toroidal playfield
#[inline]
pub fn wrap_position(pos: Vec2, extent: Vec2) -> Vec2 {
    Vec2::new(wrap_axis(pos.x, extent.x), wrap_axis(pos.y, extent.y))
}
