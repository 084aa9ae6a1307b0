//! Game Events
//!
//! Events emitted by the round core for the playfield collaborator. The core
//! never renders anything: every visible consequence of a state change
//! (spawn, highlight, deselect, fade-removal, label refresh) is described by
//! one of these events and acted on by the presentation layer.

use serde::{Serialize, Deserialize};

use crate::game::state::{RoundPhase, Token, TokenId};

/// Live status of the round, emitted after every state mutation.
///
/// Subscribers re-render status displays from this snapshot; no field write
/// ever refreshes a label implicitly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundStatus {
    /// Current phase
    pub phase: RoundPhase,
    /// Elapsed round time (seconds)
    pub elapsed: f64,
    /// Remaining time budget (seconds)
    pub remaining: f64,
    /// Pairs created so far
    pub pairs_spawned: u32,
    /// Pairs matched so far
    pub pairs_matched: u32,
}

impl RoundStatus {
    /// Formatted info-label line for status displays.
    pub fn status_line(&self) -> String {
        format!(
            "| Time: {:2.1}  |  Pairs: {:2}  |  Matches{:2} |",
            self.remaining, self.pairs_spawned, self.pairs_matched
        )
    }
}

/// Events consumed by presentation collaborators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A token appeared on the playfield. Carries the full token so the
    /// collaborator can build its view (rect, color) without a state query.
    TokenSpawned {
        /// The spawned token
        token: Token,
    },

    /// A token became a pending selection; show its highlight.
    TokenArmed {
        /// The armed token
        token_id: TokenId,
    },

    /// A pending selection was cleared after a mismatch; drop its highlight.
    TokenDeselected {
        /// The deselected token
        token_id: TokenId,
    },

    /// A matched token left play; fade it out over `fade_duration`.
    TokenRemoved {
        /// The removed token
        token_id: TokenId,
        /// Seconds the removal animation should take
        fade_duration: f64,
    },

    /// Round counters or phase changed; refresh status displays.
    RoundStatusChanged(RoundStatus),

    /// The round is over.
    RoundEnded {
        /// Final match count of the round
        pairs_matched: u32,
        /// Score board after recording this round, as [first, second, third]
        scores: [u32; 3],
    },
}

impl GameEvent {
    /// Create a token-spawned event.
    pub fn token_spawned(token: Token) -> Self {
        Self::TokenSpawned { token }
    }

    /// Create a token-armed event.
    pub fn token_armed(token_id: TokenId) -> Self {
        Self::TokenArmed { token_id }
    }

    /// Create a token-deselected event.
    pub fn token_deselected(token_id: TokenId) -> Self {
        Self::TokenDeselected { token_id }
    }

    /// Create a token-removed event.
    pub fn token_removed(token_id: TokenId, fade_duration: f64) -> Self {
        Self::TokenRemoved {
            token_id,
            fade_duration,
        }
    }

    /// Create a round-ended event.
    pub fn round_ended(pairs_matched: u32, scores: [u32; 3]) -> Self {
        Self::RoundEnded {
            pairs_matched,
            scores,
        }
    }
}
