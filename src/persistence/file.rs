//! High score as a JSON file on disk

use std::path::{Path, PathBuf};

use super::{HighScoreStore, Result, read_json, write_json};
use crate::highscores::HighScore;

pub const HIGH_SCORE_FILE: &str = "highscore.json";

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store at an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store inside `dir` under the standard file name
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(HIGH_SCORE_FILE))
    }

    /// Store in the platform data directory
    pub fn in_data_dir() -> Result<Self> {
        Ok(Self::in_dir(&super::data_dir()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load_high_score(&self) -> Result<HighScore> {
        let loaded: Option<HighScore> = read_json(&self.path)?;
        match loaded {
            Some(high_score) => {
                log::info!(
                    "Loaded high score {} (wave {}) from {}",
                    high_score.score,
                    high_score.wave,
                    self.path.display()
                );
                Ok(high_score)
            }
            None => {
                log::info!("No high score found, starting fresh");
                Ok(HighScore::default())
            }
        }
    }

    fn save_high_score(&mut self, high_score: &HighScore) -> Result<()> {
        write_json(&self.path, high_score)?;
        log::info!(
            "High score {} saved to {}",
            high_score.score,
            self.path.display()
        );
        Ok(())
    }
}
