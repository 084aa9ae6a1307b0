//! Game Logic Module
//!
//! The round core: pure, synchronous, timer-free. The runtime layer feeds it
//! timer ticks and user picks; presentation collaborators consume its events.
//!
//! ## Module Structure
//!
//! - `config`: round tunables, clamping, the shared session handle
//! - `state`: tokens, selection slots, phase machine, time budget
//! - `round`: lifecycle operations, pair spawner, match evaluator
//! - `score`: top-three high-score board
//! - `events`: events for the playfield collaborator
//! - `slider`: slider-position ↔ delay mapping for settings screens

pub mod config;
pub mod state;
pub mod round;
pub mod score;
pub mod events;
pub mod slider;

// Re-export key types
pub use config::{GameConfig, RoundConfig, SharedConfig};
pub use state::{PairId, RoundPhase, RoundState, Token, TokenId};
pub use score::ScoreBoard;
pub use events::{GameEvent, RoundStatus};
