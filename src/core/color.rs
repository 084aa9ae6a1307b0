//! Token Colors
//!
//! RGBA color with random generation. Both tokens of a pair share one color,
//! which is the only visual cue linking them.

use std::fmt;
use serde::{Serialize, Deserialize};

use super::rng::DeterministicRng;

/// Lower bound of the random-alpha sub-range.
///
/// Keeps randomly-translucent tokens visible against any background.
pub const RANDOM_ALPHA_MIN: f32 = 0.5;

/// Upper bound (exclusive) of the random-alpha sub-range.
pub const RANDOM_ALPHA_MAX: f32 = 1.0;

/// An RGBA color with channels in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel (1.0 = fully opaque)
    pub a: f32,
}

impl Rgba {
    /// Create a color from channels.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Draw a random color.
    ///
    /// Channels are uniform in [0, 1). With `random_alpha` the alpha is
    /// uniform in [[`RANDOM_ALPHA_MIN`], [`RANDOM_ALPHA_MAX`]); otherwise
    /// the color is fully opaque.
    pub fn random(rng: &mut DeterministicRng, random_alpha: bool) -> Self {
        let r = rng.next_f32();
        let g = rng.next_f32();
        let b = rng.next_f32();
        let a = if random_alpha {
            rng.next_f32_range(RANDOM_ALPHA_MIN, RANDOM_ALPHA_MAX)
        } else {
            1.0
        };
        Self { r, g, b, a }
    }

    /// Whether this color is fully opaque.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({:.2}, {:.2}, {:.2}, {:.2})",
            self.r, self.g, self.b, self.a
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_opaque() {
        let mut rng = DeterministicRng::new(42);

        for _ in 0..100 {
            let c = Rgba::random(&mut rng, false);
            assert_eq!(c.a, 1.0);
            assert!(c.is_opaque());
            assert!((0.0..1.0).contains(&c.r));
            assert!((0.0..1.0).contains(&c.g));
            assert!((0.0..1.0).contains(&c.b));
        }
    }

    #[test]
    fn test_random_alpha_stays_in_sub_range() {
        let mut rng = DeterministicRng::new(42);

        for _ in 0..1000 {
            let c = Rgba::random(&mut rng, true);
            assert!((RANDOM_ALPHA_MIN..RANDOM_ALPHA_MAX).contains(&c.a));
        }
    }

    #[test]
    fn test_random_is_deterministic() {
        let mut rng1 = DeterministicRng::new(7);
        let mut rng2 = DeterministicRng::new(7);

        for _ in 0..100 {
            assert_eq!(Rgba::random(&mut rng1, true), Rgba::random(&mut rng2, true));
        }
    }
}
