//! High score persistence
//!
//! Storage is behind the `HighScoreStore` trait so the host can swap a JSON
//! file for an in-memory store. A store that has never been written reads back
//! as the default record; only real I/O or parse failures are errors.

pub mod file;
pub mod memory;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::highscores::HighScore;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Directory name under the platform data/config roots
pub const APP_DIR: &str = "rockfall";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("stored data is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no platform data directory available")]
    NoDataDir,
}

pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Where the high-water mark lives
pub trait HighScoreStore {
    /// Stored record, or the default when nothing was saved yet
    fn load_high_score(&self) -> Result<HighScore>;
    fn save_high_score(&mut self, high_score: &HighScore) -> Result<()>;
}

/// `<platform data dir>/rockfall`
pub fn data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or(PersistenceError::NoDataDir)
}

/// `<platform config dir>/rockfall`
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or(PersistenceError::NoDataDir)
}

/// Read a JSON document; `None` if the file does not exist
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&json)?))
}

/// Write a JSON document through a temp file so a crash never leaves half a file
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
