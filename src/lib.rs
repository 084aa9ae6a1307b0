//! # MatchEm Core
//!
//! Round lifecycle and pair-matching core for the MatchEm game: rectangles
//! of random size, position and color spawn in matched pairs; the player
//! picks two tokens; matches are removed and scored, mismatches deselected;
//! a timer ends the round and a top-three board keeps the best results.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       MATCHEM CORE                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/          - Deterministic primitives                  │
//! │  ├── rng.rs     - Seeded Xorshift128+ PRNG                  │
//! │  ├── geom.rs    - Sizes, points, rectangles (f32)           │
//! │  └── color.rs   - RGBA colors with random alpha             │
//! │                                                             │
//! │  game/          - Round logic (pure, synchronous)           │
//! │  ├── config.rs  - Tunables, clamping, shared handle         │
//! │  ├── state.rs   - Tokens, selection slots, phase machine    │
//! │  ├── round.rs   - Lifecycle, spawner, match evaluator       │
//! │  ├── score.rs   - Top-three high-score board                │
//! │  ├── events.rs  - Events for the playfield collaborator     │
//! │  └── slider.rs  - Slider ↔ delay mapping for settings       │
//! │                                                             │
//! │  runtime.rs     - tokio timer driver (non-deterministic)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules are deterministic: no wall-clock reads,
//! all randomness from one seeded Xorshift128+ instance, BTreeMap iteration
//! everywhere. Given the same seed and the same operation sequence, a round
//! produces an identical token stream on any platform. Timers, and only
//! timers, live in `runtime`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod runtime;

// Re-export commonly used types
pub use self::core::color::Rgba;
pub use self::core::geom::{Point, Rect, Size};
pub use self::core::rng::DeterministicRng;
pub use game::config::{GameConfig, RoundConfig, SharedConfig};
pub use game::events::{GameEvent, RoundStatus};
pub use game::score::ScoreBoard;
pub use game::state::{PairId, RoundPhase, RoundState, Token, TokenId};
pub use runtime::{RoundHandle, RuntimeError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
