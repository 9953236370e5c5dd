//! High score leaderboard
//!
//! In-memory only, tracks the top 5 final scores of this process.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score of the run
    pub score: u64,
    /// Level the run ended on
    pub level: u32,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a finished run.
    ///
    /// Every run is recorded, zero included; ties keep earlier runs ahead.
    /// Returns the rank achieved (1-indexed) or None if it fell off the board.
    pub fn record(&mut self, score: u64, level: u32) -> Option<usize> {
        let entry = HighScoreEntry { score, level };

        // Find insertion point (sorted descending by score)
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    /// Scores only, best first
    pub fn scores(&self) -> Vec<u64> {
        self.entries.iter().map(|e| e.score).collect()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_descending_and_capped() {
        let mut board = HighScores::new();
        for (i, score) in [300, 100, 900, 0, 500, 700, 200].into_iter().enumerate() {
            board.record(score, i as u32 + 1);
        }
        assert_eq!(board.scores(), vec![900, 700, 500, 300, 200]);
        assert_eq!(board.top_score(), Some(900));
    }

    #[test]
    fn test_rank_reporting() {
        let mut board = HighScores::new();
        assert_eq!(board.record(0, 1), Some(1));
        assert_eq!(board.record(500, 3), Some(1));
        assert_eq!(board.record(200, 2), Some(2));
        assert_eq!(board.scores(), vec![500, 200, 0]);
    }

    #[test]
    fn test_ties_keep_earlier_run_first() {
        let mut board = HighScores::new();
        board.record(400, 2);
        board.record(400, 5);
        assert_eq!(board.entries[0].level, 2);
        assert_eq!(board.entries[1].level, 5);
    }

    #[test]
    fn test_full_board_rejects_low_score() {
        let mut board = HighScores::new();
        for score in [500, 400, 300, 200, 100] {
            board.record(score, 1);
        }
        assert_eq!(board.record(100, 1), None);
        assert_eq!(board.record(50, 1), None);
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(board.record(450, 4), Some(2));
        assert_eq!(board.scores(), vec![500, 450, 400, 300, 200]);
    }
}
