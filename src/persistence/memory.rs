//! In-process high score store for tests and throwaway sessions

use super::{HighScoreStore, Result};
use crate::highscores::HighScore;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    stored: Option<HighScore>,
    /// Number of successful saves
    pub saves: usize,
}

impl MemoryStore {
    /// Store that already holds `high_score`
    pub fn with(high_score: HighScore) -> Self {
        Self {
            stored: Some(high_score),
            saves: 0,
        }
    }

    pub fn stored(&self) -> Option<HighScore> {
        self.stored
    }
}

impl HighScoreStore for MemoryStore {
    fn load_high_score(&self) -> Result<HighScore> {
        Ok(self.stored.unwrap_or_default())
    }

    fn save_high_score(&mut self, high_score: &HighScore) -> Result<()> {
        self.stored = Some(*high_score);
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_defaults() {
        let store = MemoryStore::default();
        assert_eq!(store.load_high_score().unwrap().score, 0);
        assert_eq!(store.stored(), None);
    }

    #[test]
    fn test_save_replaces() {
        let mut store = MemoryStore::with(HighScore::new(10, 1));
        store.save_high_score(&HighScore::new(20, 2)).unwrap();
        assert_eq!(store.load_high_score().unwrap(), HighScore::new(20, 2));
        assert_eq!(store.saves, 1);
    }
}
