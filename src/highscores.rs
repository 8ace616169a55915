//! High score leaderboard system
//!
//! Persisted as a bare JSON array under `leaderboard`, tracks top 3 scores.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::persistence::{Storage, load_json, save_json};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 3;

/// High score leaderboard, best first
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct HighScores {
    scores: Vec<u32>,
}

impl HighScores {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "leaderboard";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self { scores: Vec::new() }
    }

    /// Build from arbitrary scores, keeping the invariant
    pub fn from_scores(scores: impl IntoIterator<Item = u32>) -> Self {
        let mut scores: Vec<u32> = scores.into_iter().collect();
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(MAX_HIGH_SCORES);
        Self { scores }
    }

    /// Scores, descending
    pub fn top_scores(&self) -> &[u32] {
        &self.scores
    }

    /// Check if a score would make the board
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.scores.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.scores.last().is_none_or(|&lowest| score > lowest)
    }

    /// Insert a score, keep the best three.
    /// Returns the rank achieved (1-indexed) or None if it fell off.
    pub fn record_score(&mut self, score: u32) -> Option<usize> {
        // Ties go after existing entries
        let pos = self
            .scores
            .iter()
            .position(|&s| score > s)
            .unwrap_or(self.scores.len());
        self.scores.insert(pos, score);
        self.scores.truncate(MAX_HIGH_SCORES);
        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.scores.first().copied()
    }

    /// Load from storage; missing or malformed data is an empty board
    pub fn load(storage: &impl Storage) -> Self {
        match load_json::<Vec<u32>>(storage, Self::STORAGE_KEY) {
            Some(scores) => {
                let board = Self::from_scores(scores);
                log::info!("Loaded {} high scores", board.scores.len());
                board
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    pub fn save(&self, storage: &mut impl Storage) -> Result<()> {
        save_json(storage, Self::STORAGE_KEY, &self.scores)?;
        log::info!("High scores saved ({} entries)", self.scores.len());
        Ok(())
    }
}
