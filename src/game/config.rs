//! Round Configuration
//!
//! Tunable parameters for a round, plus the session-wide shared handle that
//! couples configuration with the high-score board. Values written from the
//! settings side are clamped silently and picked up by the round core on its
//! next read.

use std::sync::Arc;
use serde::{Serialize, Deserialize};
use tokio::sync::RwLock;

use crate::core::geom::Size;
use crate::game::score::ScoreBoard;

/// Smallest allowed pair-spawn interval (seconds).
pub const SPAWN_INTERVAL_MIN: f64 = 0.5;

/// Largest allowed pair-spawn interval (seconds).
pub const SPAWN_INTERVAL_MAX: f64 = 5.0;

/// Smallest allowed fade-removal duration (seconds).
pub const FADE_DURATION_MIN: f64 = 0.5;

/// Largest allowed fade-removal duration (seconds).
pub const FADE_DURATION_MAX: f64 = 1.5;

/// Default pair-spawn interval (seconds).
pub const DEFAULT_SPAWN_INTERVAL: f64 = 1.5;

/// Default fade-removal duration (seconds).
pub const DEFAULT_FADE_DURATION: f64 = 0.8;

/// Default round duration (seconds).
pub const DEFAULT_ROUND_DURATION: f64 = 12.0;

/// Default minimum token edge length (points).
pub const DEFAULT_TOKEN_SIZE_MIN: f32 = 50.0;

/// Default maximum token edge length (points).
pub const DEFAULT_TOKEN_SIZE_MAX: f32 = 150.0;

/// Default playfield bounds (points).
pub const DEFAULT_PLAYFIELD: Size = Size::new(390.0, 700.0);

/// Tunable parameters for a round.
///
/// Interval and fade duration are clamped on write, never rejected. The
/// round duration is fixed at configuration time: changing it mid-round has
/// no effect until the next `start_new_game`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundConfig {
    spawn_interval: f64,
    fade_duration: f64,
    round_duration: f64,
    token_size_min: f32,
    token_size_max: f32,
    /// Draw a random alpha for each pair instead of full opacity.
    pub random_alpha: bool,
    /// Use the alternate playfield background.
    pub alt_background: bool,
    /// Playfield bounds tokens must fit inside.
    pub playfield: Size,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            spawn_interval: DEFAULT_SPAWN_INTERVAL,
            fade_duration: DEFAULT_FADE_DURATION,
            round_duration: DEFAULT_ROUND_DURATION,
            token_size_min: DEFAULT_TOKEN_SIZE_MIN,
            token_size_max: DEFAULT_TOKEN_SIZE_MAX,
            random_alpha: true,
            alt_background: false,
            playfield: DEFAULT_PLAYFIELD,
        }
    }
}

impl RoundConfig {
    /// Current pair-spawn interval (seconds).
    #[inline]
    pub fn spawn_interval(&self) -> f64 {
        self.spawn_interval
    }

    /// Set the pair-spawn interval, clamped to
    /// [[`SPAWN_INTERVAL_MIN`], [`SPAWN_INTERVAL_MAX`]].
    pub fn set_spawn_interval(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }
        self.spawn_interval = seconds.clamp(SPAWN_INTERVAL_MIN, SPAWN_INTERVAL_MAX);
    }

    /// Current fade-removal duration (seconds).
    #[inline]
    pub fn fade_duration(&self) -> f64 {
        self.fade_duration
    }

    /// Set the fade-removal duration, clamped to
    /// [[`FADE_DURATION_MIN`], [`FADE_DURATION_MAX`]].
    pub fn set_fade_duration(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }
        self.fade_duration = seconds.clamp(FADE_DURATION_MIN, FADE_DURATION_MAX);
    }

    /// Round duration (seconds), read at `start_new_game`.
    #[inline]
    pub fn round_duration(&self) -> f64 {
        self.round_duration
    }

    /// Set the round duration used by the NEXT round.
    pub fn set_round_duration(&mut self, seconds: f64) {
        if !seconds.is_finite() || seconds <= 0.0 {
            return;
        }
        self.round_duration = seconds;
    }

    /// Smallest token edge length (points).
    #[inline]
    pub fn token_size_min(&self) -> f32 {
        self.token_size_min
    }

    /// Largest token edge length (points).
    #[inline]
    pub fn token_size_max(&self) -> f32 {
        self.token_size_max
    }

    /// Set the token edge-length bounds. Inverted bounds are reordered,
    /// non-positive values are floored to one point.
    pub fn set_token_size_bounds(&mut self, min: f32, max: f32) {
        if !min.is_finite() || !max.is_finite() {
            return;
        }
        let lo = min.min(max).max(1.0);
        let hi = min.max(max).max(1.0);
        self.token_size_min = lo;
        self.token_size_max = hi;
    }
}

/// Session-wide state shared between the round runtime and the settings
/// collaborator: the tunables plus the high-score board.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GameConfig {
    /// Round tunables.
    pub round: RoundConfig,
    /// Top-three score board across rounds.
    pub scores: ScoreBoard,
}

/// Shared handle to the session [`GameConfig`].
///
/// One instance lives for the app session and is handed to both the round
/// runtime and the settings collaborator. Writes are serialized against
/// spawner reads by the lock.
pub type SharedConfig = Arc<RwLock<GameConfig>>;

/// Wrap a [`GameConfig`] into the shared session handle.
pub fn shared(config: GameConfig) -> SharedConfig {
    Arc::new(RwLock::new(config))
}
