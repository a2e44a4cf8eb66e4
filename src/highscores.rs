//! High-water mark
//!
//! One record: the best score ever reached, and the wave it was reached on.

use serde::{Deserialize, Serialize};

/// The best session so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HighScore {
    /// Player's score
    pub score: u64,
    /// Wave reached
    pub wave: u32,
}

impl HighScore {
    pub fn new(score: u64, wave: u32) -> Self {
        Self { score, wave }
    }

    /// Check if a score beats the record (ties do not)
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.score
    }

    /// Replace the record if `score` beats it. Returns true when replaced.
    pub fn record(&mut self, score: u64, wave: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        *self = Self::new(score, wave);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.score == 0
    }
}
