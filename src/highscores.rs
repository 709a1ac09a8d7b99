//! High score leaderboard
//!
//! Tracks the ten longest survival times. The best entry is "the high score"
//! shown on the HUD and the game over screen.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistError};
use crate::platform::storage::Storage;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score (seconds survived plus bonuses)
    pub score: u64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    const STORAGE_KEY: &'static str = "dodge_football_highscores";
    /// Single-number key written by earlier builds
    const LEGACY_KEY: &'static str = "highScore";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u64, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry { score, timestamp };

        // Ties go after existing entries
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// The high score, 0 when nothing is recorded
    pub fn best(&self) -> u64 {
        self.top_score().unwrap_or(0)
    }

    /// Load from storage, migrating the legacy single value if needed
    ///
    /// Corrupt data is logged and replaced with an empty board.
    pub fn load(storage: &dyn Storage) -> Self {
        match persistence::load_json::<HighScores>(storage, Self::STORAGE_KEY) {
            Ok(Some(mut scores)) => {
                scores.normalize();
                log::info!("Loaded {} high scores", scores.entries.len());
                return scores;
            }
            Ok(None) => {}
            Err(e) => {
                log::warn!("Discarding unreadable high scores: {}", e);
                return Self::new();
            }
        }

        if let Some(legacy) = Self::legacy_best(storage) {
            log::info!("Migrated legacy high score {}", legacy);
            let mut scores = Self::new();
            scores.add_score(legacy, 0.0);
            return scores;
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Persist the leaderboard
    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), PersistError> {
        persistence::save_json(storage, Self::STORAGE_KEY, self)?;
        // Keep the plain value current for anything still reading it
        storage.set_item(Self::LEGACY_KEY, &self.best().to_string())?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }

    fn legacy_best(storage: &dyn Storage) -> Option<u64> {
        let raw = storage.get_item(Self::LEGACY_KEY)?;
        let value: f64 = raw.trim().parse().ok()?;
        (value.is_finite() && value > 0.0).then(|| value.floor() as u64)
    }

    /// Re-sort and trim data that came from outside
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::storage::MemoryStorage;
    use proptest::prelude::*;

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
    }

    #[test]
    fn test_add_score_ranks() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(30, 1.0), Some(1));
        assert_eq!(scores.add_score(50, 2.0), Some(1));
        assert_eq!(scores.add_score(40, 3.0), Some(2));
        // Tie ranks below the existing entry
        assert_eq!(scores.add_score(40, 4.0), Some(3));
        assert_eq!(scores.best(), 50);
    }

    #[test]
    fn test_full_board_rejects_low_scores() {
        let mut scores = HighScores::new();
        for s in 1..=10 {
            scores.add_score(s * 10, s as f64);
        }
        assert!(!scores.qualifies(10));
        assert_eq!(scores.add_score(5, 0.0), None);
        assert_eq!(scores.add_score(15, 0.0), Some(10));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(15));
    }

    #[test]
    fn test_save_and_load() {
        let mut storage = MemoryStorage::new();
        let mut scores = HighScores::new();
        scores.add_score(12, 100.0);
        scores.add_score(34, 200.0);
        scores.save(&mut storage).unwrap();

        let loaded = HighScores::load(&storage);
        assert_eq!(loaded.entries, scores.entries);
        assert_eq!(storage.get_item("highScore").as_deref(), Some("34"));
    }

    #[test]
    fn test_legacy_migration() {
        let mut storage = MemoryStorage::new();
        storage.set_item("highScore", "27").unwrap();
        let loaded = HighScores::load(&storage);
        assert_eq!(loaded.best(), 27);
        assert_eq!(loaded.entries.len(), 1);
    }

    #[test]
    fn test_corrupt_storage_starts_fresh() {
        let mut storage = MemoryStorage::new();
        storage.set_item("dodge_football_highscores", "{ nope").unwrap();
        storage.set_item("highScore", "99").unwrap();
        assert!(HighScores::load(&storage).is_empty());
    }

    proptest! {
        #[test]
        fn leaderboard_stays_sorted_and_bounded(scores in prop::collection::vec(0u64..500, 0..40)) {
            let mut board = HighScores::new();
            for (i, s) in scores.iter().enumerate() {
                board.add_score(*s, i as f64);
            }
            prop_assert!(board.entries.len() <= MAX_HIGH_SCORES);
            prop_assert!(board.entries.windows(2).all(|w| w[0].score >= w[1].score));
            let max = scores.iter().copied().max().unwrap_or(0);
            prop_assert_eq!(board.best(), max);
        }
    }
}
