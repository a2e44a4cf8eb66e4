//! Data-driven game balance
//!
//! Every physics and pacing constant the simulation reads lives here so a
//! JSON file can rebalance the game without recompiling. `Tuning::default()`
//! is the shipped balance.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is outside the range the simulation can work with
    #[error("Invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Gameplay balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Ship ===
    /// Velocity multiplier applied every tick
    pub ship_drag: f32,
    /// Speed cap (units/tick)
    pub ship_max_speed: f32,
    /// Forward impulse per tick of thrust
    pub thrust_impulse: f32,
    /// Deceleration along the velocity direction while braking
    pub brake_force: f32,
    /// Speed below which braking stops pushing against velocity
    pub brake_threshold: f32,
    /// Length of the reverse impulse vector while braking
    pub reverse_impulse: f32,
    /// Scale applied to the reverse impulse
    pub reverse_scale: f32,
    /// Heading change per tick (degrees)
    pub rotation_step: f32,
    pub ship_radius: f32,

    // === Bullets ===
    /// Muzzle velocity added to the ship velocity (units/tick)
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    pub max_bullets: usize,

    // === Hazards ===
    /// Wave n spawns `base_hazard_count + n` hazards
    pub base_hazard_count: u32,
    /// Max absolute per-axis base velocity at wave spawn (integer steps)
    pub hazard_base_speed: i32,
    /// Speed multiplier added per wave after the first
    pub wave_speed_step: f32,
    /// Half-extent of the no-spawn box around the field center
    pub spawn_exclusion: f32,
    /// Max absolute per-axis velocity jitter for fragments (integer steps)
    pub fragment_jitter: i32,
    /// Max absolute cosmetic spin (degrees/tick)
    pub hazard_max_spin: f32,

    // === Particles ===
    /// Velocity multiplier applied every tick
    pub particle_drag: f32,
    pub max_particles: usize,

    // === Session ===
    pub max_lives: u8,
    pub wave_transition_duration: f32,
    pub spawn_cooldown_duration: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            ship_drag: 0.99,
            ship_max_speed: 8.0,
            thrust_impulse: 0.3,
            brake_force: 0.08,
            brake_threshold: 0.05,
            reverse_impulse: 0.45,
            reverse_scale: 0.4,
            rotation_step: 3.0,
            ship_radius: SHIP_RADIUS,

            bullet_speed: 8.0,
            bullet_radius: BULLET_RADIUS,
            max_bullets: 64,

            base_hazard_count: 3,
            hazard_base_speed: 2,
            wave_speed_step: 0.2,
            spawn_exclusion: 100.0,
            fragment_jitter: 2,
            hazard_max_spin: 1.5,

            particle_drag: 0.98,
            max_particles: 512,

            max_lives: MAX_LIVES,
            wave_transition_duration: WAVE_TRANSITION_DURATION,
            spawn_cooldown_duration: SPAWN_COOLDOWN_DURATION,
        }
    }
}

impl Tuning {
    /// Field extent as a vector
    #[inline]
    pub fn field(&self) -> Vec2 {
        Vec2::new(self.field_width, self.field_height)
    }

    /// Field center, where the ship (re)spawns
    #[inline]
    pub fn field_center(&self) -> Vec2 {
        self.field() / 2.0
    }

    /// Load tuning from a JSON file. Missing fields fall back to defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let tuning: Tuning = serde_json::from_str(&contents)?;
        tuning.validate()?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Save tuning as pretty JSON
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.field_width <= 0.0 || self.field_height <= 0.0 {
            return Err(invalid("field_width/field_height", "must be positive"));
        }
        if self.spawn_exclusion * 2.0 >= self.field_width.min(self.field_height) {
            return Err(invalid(
                "spawn_exclusion",
                "exclusion box must leave room to spawn hazards",
            ));
        }
        if !(0.0..=1.0).contains(&self.ship_drag) {
            return Err(invalid("ship_drag", "must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.particle_drag) {
            return Err(invalid("particle_drag", "must be within [0, 1]"));
        }
        if self.ship_max_speed <= 0.0 {
            return Err(invalid("ship_max_speed", "must be positive"));
        }
        if self.max_lives == 0 {
            return Err(invalid("max_lives", "must be at least 1"));
        }
        if self.hazard_base_speed < 0 || self.fragment_jitter < 0 {
            return Err(invalid(
                "hazard_base_speed/fragment_jitter",
                "must not be negative",
            ));
        }
        if self.wave_transition_duration < 0.0 || self.spawn_cooldown_duration < 0.0 {
            return Err(invalid("durations", "must not be negative"));
        }
        Ok(())
    }
}
