//! Player settings and preferences
//!
//! Persisted as JSON in the platform config directory, separately from the
//! high score.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::MAX_SCALE;
use crate::persistence::{self, PersistenceError, read_json, write_json};
use crate::tuning::Tuning;

pub const SETTINGS_FILE: &str = "settings.json";

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 128,
            QualityPreset::Medium => 512,
            QualityPreset::High => 1024,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects (explosions, debris, exhaust)
    pub particles: bool,
    /// Window scale factor (1..=MAX_SCALE)
    pub display_scale: u8,

    // === HUD ===
    /// Show FPS counter (the headless runner reports ticks per second)
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            display_scale: 2,
            show_fps: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Set the display scale, clamped to the supported range
    pub fn set_display_scale(&mut self, scale: u8) {
        self.display_scale = scale.clamp(1, MAX_SCALE);
    }

    /// Fold quality-dependent limits into the simulation balance
    pub fn apply_to(&self, tuning: &mut Tuning) {
        tuning.max_particles = self.max_particles();
    }

    /// Default location: `<config dir>/rockfall/settings.json`
    pub fn default_path() -> Result<PathBuf, PersistenceError> {
        Ok(persistence::config_dir()?.join(SETTINGS_FILE))
    }

    /// Load settings from `path`; defaults when the file does not exist
    pub fn load_from(path: &Path) -> Result<Self, PersistenceError> {
        match read_json::<Settings>(path)? {
            Some(mut settings) => {
                settings.set_display_scale(settings.display_scale);
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Save settings to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), PersistenceError> {
        write_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
