//! Round State Definitions
//!
//! All state for one play round: spawned tokens, the selection slots, the
//! phase machine and the time budget. Uses BTreeMap for deterministic
//! iteration order.

use std::collections::BTreeMap;
use std::fmt;
use serde::{Serialize, Deserialize};

use crate::core::color::Rgba;
use crate::core::geom::Rect;
use crate::core::rng::DeterministicRng;
use crate::game::events::{GameEvent, RoundStatus};

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Unique token identifier (monotonic counter within a round).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct TokenId(pub u32);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Pair identifier linking exactly two sibling tokens.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct PairId(pub u32);

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

// =============================================================================
// TOKEN
// =============================================================================

/// One spawned game piece, half of a pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Unique token id
    pub id: TokenId,

    /// Links this token to exactly one sibling
    pub pair_id: PairId,

    /// Position and extent inside the playfield
    pub rect: Rect,

    /// Fill color, shared with the sibling
    pub color: Rgba,

    /// Held as a pending selection, awaiting match evaluation
    pub armed: bool,

    /// Resolved as part of a match and handed to the fade-removal animation
    pub removed: bool,
}

impl Token {
    /// Create a fresh, unarmed token.
    pub fn new(id: TokenId, pair_id: PairId, rect: Rect, color: Rgba) -> Self {
        Self {
            id,
            pair_id,
            rect,
            color,
            armed: false,
            removed: false,
        }
    }

    /// Whether this token is still in play (not removed).
    #[inline]
    pub fn is_live(&self) -> bool {
        !self.removed
    }
}

// =============================================================================
// ROUND PHASE
// =============================================================================

/// Lifecycle phase of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No round has been started yet
    #[default]
    Idle,
    /// Round in progress: timers armed, selections accepted
    Running,
    /// Round suspended: timers cancelled, time budget preserved
    Paused,
    /// Round finished: score recorded, waiting for a new game
    Ended,
}

// =============================================================================
// ROUND STATE
// =============================================================================

/// Complete state of one round.
///
/// Owned exclusively by the active round; discarded (reset in place) when a
/// new game starts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundState {
    /// Current phase
    pub phase: RoundPhase,

    /// Round duration captured at `start_new_game` (seconds)
    pub duration: f64,

    /// Remaining time budget (seconds). Decremented by the spawn interval on
    /// every spawn; pinned to zero when the round ends.
    pub remaining: f64,

    /// Pairs created so far this round
    pub pairs_spawned: u32,

    /// Pairs matched so far this round
    pub pairs_matched: u32,

    /// All tokens of this round keyed by id (BTreeMap for deterministic
    /// iteration)
    pub tokens: BTreeMap<TokenId, Token>,

    /// First selection slot
    pub first_pick: Option<TokenId>,

    /// Second selection slot
    pub second_pick: Option<TokenId>,

    /// RNG seed (for replaying a round's spawn stream)
    pub rng_seed: u64,

    /// Per-round RNG
    #[serde(skip)]
    pub rng: DeterministicRng,

    /// Next token id (monotonic counter)
    next_token_id: u32,

    /// Next pair id (monotonic counter)
    next_pair_id: u32,

    /// Events generated since the last drain
    #[serde(skip)]
    pending_events: Vec<GameEvent>,
}

impl RoundState {
    /// Create idle round state with a seeded RNG.
    pub fn new(rng_seed: u64) -> Self {
        Self {
            phase: RoundPhase::Idle,
            duration: 0.0,
            remaining: 0.0,
            pairs_spawned: 0,
            pairs_matched: 0,
            tokens: BTreeMap::new(),
            first_pick: None,
            second_pick: None,
            rng_seed,
            rng: DeterministicRng::new(rng_seed),
            next_token_id: 0,
            next_pair_id: 0,
            pending_events: Vec::new(),
        }
    }

    /// Elapsed round time (seconds), derived from the remaining budget and
    /// floored at zero.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        (self.duration - self.remaining).max(0.0)
    }

    /// Allocate the next token id.
    pub fn alloc_token_id(&mut self) -> TokenId {
        let id = TokenId(self.next_token_id);
        self.next_token_id += 1;
        id
    }

    /// Allocate the next pair id.
    pub fn alloc_pair_id(&mut self) -> PairId {
        let id = PairId(self.next_pair_id);
        self.next_pair_id += 1;
        id
    }

    /// Get a token by id.
    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(&id)
    }

    /// Get a token mutably by id.
    pub fn token_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        self.tokens.get_mut(&id)
    }

    /// Iterate over tokens still in play.
    pub fn live_tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values().filter(|t| t.is_live())
    }

    /// Number of tokens still in play.
    pub fn live_token_count(&self) -> usize {
        self.live_tokens().count()
    }

    /// The sibling of a token, if the token exists.
    pub fn sibling_of(&self, id: TokenId) -> Option<&Token> {
        let pair_id = self.token(id)?.pair_id;
        self.tokens
            .values()
            .find(|t| t.pair_id == pair_id && t.id != id)
    }

    /// Snapshot of the round counters for status displays.
    pub fn status(&self) -> RoundStatus {
        RoundStatus {
            phase: self.phase,
            elapsed: self.elapsed(),
            remaining: self.remaining,
            pairs_spawned: self.pairs_spawned,
            pairs_matched: self.pairs_matched,
        }
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new(0)
    }
}

// =============================================================================
// TESTS
// =============================================================================
