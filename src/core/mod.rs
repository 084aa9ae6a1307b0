//! Core deterministic primitives.
//!
//! Randomness, geometry and color types used by the round logic.
//! Everything here is seed-reproducible: the same seed replays the same
//! sizes, positions and colors.

pub mod rng;
pub mod geom;
pub mod color;

// Re-export core types
pub use rng::DeterministicRng;
pub use geom::{Size, Point, Rect};
pub use color::Rgba;
