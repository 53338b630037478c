//! Run score and the persisted high score leaderboard
//!
//! The run score follows the skier's descent and freezes permanently once
//! the rhino wins. The skier's death event calls [`RunScore::stop`] and no
//! later update can move it again. High scores persist to LocalStorage.

use serde::{Deserialize, Serialize};

/// World units of descent per score point
const DESCENT_PER_POINT: f32 = 10.0;

/// Score for the current run.
#[derive(Debug, Clone, Default)]
pub struct RunScore {
    points: u64,
    stopped: bool,
}

impl RunScore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    /// Track the skier's descent. Score only ever increases, and not at all
    /// once stopped.
    pub fn advance(&mut self, skier_y: f32) {
        if self.stopped {
            return;
        }
        let descended = (skier_y.max(0.0) / DESCENT_PER_POINT) as u64;
        self.points = self.points.max(descended);
    }

    /// Freeze the score for good. Idempotent.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final run score
    pub score: u64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "powder_run_highscores";

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
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u64, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry { score, timestamp };

        // Find insertion point (sorted descending by score)
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

    /// Load high scores from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(scores) = serde_json::from_str::<HighScores>(&json) {
                    log::info!("Loaded {} high scores", scores.entries.len());
                    return scores;
                }
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save high scores to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High scores saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_tracks_descent_monotonically() {
        let mut score = RunScore::new();
        score.advance(105.0);
        assert_eq!(score.points(), 10);
        // Skiing back uphill never lowers the score
        score.advance(50.0);
        assert_eq!(score.points(), 10);
        score.advance(250.0);
        assert_eq!(score.points(), 25);
    }

    #[test]
    fn test_negative_y_scores_nothing() {
        let mut score = RunScore::new();
        score.advance(-500.0);
        assert_eq!(score.points(), 0);
    }

    #[test]
    fn test_stop_freezes_score_permanently() {
        let mut score = RunScore::new();
        score.advance(100.0);
        score.stop();
        score.stop();
        score.advance(10_000.0);
        assert!(score.is_stopped());
        assert_eq!(score.points(), 10);
    }

    #[test]
    fn test_highscores_sorted_and_capped() {
        let mut scores = HighScores::new();
        assert!(!scores.qualifies(0));

        for i in 1..=12u64 {
            scores.add_score(i * 100, i as f64);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(1200));
        // Lowest surviving entry is 300: 100 and 200 fell off
        assert_eq!(scores.entries.last().unwrap().score, 300);
    }

    #[test]
    fn test_add_score_reports_rank() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(500, 0.0), Some(1));
        assert_eq!(scores.add_score(700, 1.0), Some(1));
        assert_eq!(scores.add_score(600, 2.0), Some(2));
        assert_eq!(scores.add_score(0, 3.0), None);
    }
}
