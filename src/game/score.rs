//! High-Score Board
//!
//! Top-three `pairs_matched` results across rounds, descending, ties kept as
//! duplicates. The ranking rule carries a known quirk: a score beating first
//! place OVERWRITES first without demoting the old value to second, so the
//! old first place is lost. Tests document that behavior; do not "fix" it
//! without migrating recorded boards.

use serde::{Serialize, Deserialize};
use tracing::debug;

/// Ordered top-three score board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    first: u32,
    second: u32,
    third: u32,
}

impl ScoreBoard {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest recorded score.
    #[inline]
    pub fn first(&self) -> u32 {
        self.first
    }

    /// Second-highest recorded score.
    #[inline]
    pub fn second(&self) -> u32 {
        self.second
    }

    /// Third-highest recorded score.
    #[inline]
    pub fn third(&self) -> u32 {
        self.third
    }

    /// The board as `[first, second, third]`.
    #[inline]
    pub fn as_array(&self) -> [u32; 3] {
        [self.first, self.second, self.third]
    }

    /// Record a completed round's match count.
    ///
    /// Called once per round end. Scores below 1 leave the board untouched.
    /// Ranking rule:
    /// - beats first: second shifts to third, first is overwritten
    ///   (the old first is NOT demoted; it is lost)
    /// - beats second and differs from first: second shifts to third
    /// - otherwise, if it differs from second: it becomes third
    pub fn record(&mut self, score: u32) {
        if score < 1 {
            return;
        }

        if score > self.first {
            self.third = self.second;
            self.first = score;
        } else if score > self.second {
            if score != self.first {
                self.third = self.second;
                self.second = score;
            }
        } else if score != self.second {
            self.third = score;
        }

        debug!(score, board = ?self.as_array(), "score recorded");
    }
}
