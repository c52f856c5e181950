//! Duel rule parameters.
//!
//! The board geometry (six slots per hand, 16-card deck) is fixed by the
//! wire frame and lives in `cards`/`frame`. The thresholds that end a duel
//! are configurable here.

use serde::{Deserialize, Serialize};

/// Number of slots (columns A-F) in each hand.
pub const HAND_SLOTS: usize = 6;

/// Copies of each card kind in a fresh deck.
pub const COPIES_PER_KIND: usize = 4;

/// Thresholds that end a duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Score that wins the duel (default: 9).
    pub win_score: u32,

    /// Round number at which the duel ends in a draw (default: 5).
    /// Reached only through mutual passing.
    pub round_limit: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            win_score: 9,
            round_limit: 5,
        }
    }
}

impl RulesConfig {
    /// Set the winning score.
    #[must_use]
    pub fn with_win_score(mut self, score: u32) -> Self {
        self.win_score = score;
        self
    }

    /// Set the draw round.
    #[must_use]
    pub fn with_round_limit(mut self, round: u32) -> Self {
        self.round_limit = round;
        self
    }
}
