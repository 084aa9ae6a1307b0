//! Slider Mapping
//!
//! Linear mapping between a normalized settings-slider position and a delay
//! value, shared by every settings presentation so slider position and delay
//! round-trip exactly.
//!
//! The slider runs "faster to the right": position 0 maps to the largest
//! delay, position 1 to the smallest.

use crate::game::config::{
    FADE_DURATION_MAX, FADE_DURATION_MIN, SPAWN_INTERVAL_MAX, SPAWN_INTERVAL_MIN,
};

/// Slider position at the left stop.
pub const SLIDER_MIN: f64 = 0.0;

/// Slider position at the right stop.
pub const SLIDER_MAX: f64 = 1.0;

/// Slope of the slider-to-delay line for a [min, max] delay range.
#[inline]
fn slope(min: f64, max: f64) -> f64 {
    (max - min) / (SLIDER_MIN - SLIDER_MAX)
}

/// Delay corresponding to a slider position for a [min, max] delay range.
#[inline]
pub fn delay_given_slider(slider: f64, min: f64, max: f64) -> f64 {
    slope(min, max) * slider + max
}

/// Slider position corresponding to a delay for a [min, max] delay range.
///
/// Inverse of [`delay_given_slider`].
#[inline]
pub fn slider_given_delay(delay: f64, min: f64, max: f64) -> f64 {
    (delay - max) / slope(min, max)
}

/// Spawn interval for a spawn-speed slider position.
#[inline]
pub fn spawn_interval_given_slider(slider: f64) -> f64 {
    delay_given_slider(slider, SPAWN_INTERVAL_MIN, SPAWN_INTERVAL_MAX)
}

/// Spawn-speed slider position for a spawn interval.
#[inline]
pub fn slider_given_spawn_interval(interval: f64) -> f64 {
    slider_given_delay(interval, SPAWN_INTERVAL_MIN, SPAWN_INTERVAL_MAX)
}

/// Fade duration for a fade slider position.
#[inline]
pub fn fade_duration_given_slider(slider: f64) -> f64 {
    delay_given_slider(slider, FADE_DURATION_MIN, FADE_DURATION_MAX)
}

/// Fade slider position for a fade duration.
#[inline]
pub fn slider_given_fade_duration(duration: f64) -> f64 {
    slider_given_delay(duration, FADE_DURATION_MIN, FADE_DURATION_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_slider_endpoints() {
        // Left stop is the slowest setting, right stop the fastest.
        assert_eq!(spawn_interval_given_slider(0.0), SPAWN_INTERVAL_MAX);
        assert_eq!(spawn_interval_given_slider(1.0), SPAWN_INTERVAL_MIN);

        assert_eq!(fade_duration_given_slider(0.0), FADE_DURATION_MAX);
        assert_eq!(fade_duration_given_slider(1.0), FADE_DURATION_MIN);
    }

    #[test]
    fn test_midpoint() {
        let mid = spawn_interval_given_slider(0.5);
        assert!((mid - (SPAWN_INTERVAL_MIN + SPAWN_INTERVAL_MAX) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_inverse_of_default_settings() {
        // Default interval 1.5 on a [0.5, 5.0] range sits at slider ~0.777...
        let s = slider_given_spawn_interval(1.5);
        assert!((spawn_interval_given_slider(s) - 1.5).abs() < 1e-12);

        let s = slider_given_fade_duration(0.8);
        assert!((fade_duration_given_slider(s) - 0.8).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_slider_round_trips(s in 0.0f64..=1.0) {
            let d = spawn_interval_given_slider(s);
            let back = slider_given_spawn_interval(d);
            prop_assert!((back - s).abs() < 1e-9);
        }

        #[test]
        fn prop_delay_round_trips(d in SPAWN_INTERVAL_MIN..=SPAWN_INTERVAL_MAX) {
            let s = slider_given_spawn_interval(d);
            let back = spawn_interval_given_slider(s);
            prop_assert!((back - d).abs() < 1e-9);
        }

        #[test]
        fn prop_fade_round_trips(s in 0.0f64..=1.0) {
            let d = fade_duration_given_slider(s);
            let back = slider_given_fade_duration(d);
            prop_assert!((back - s).abs() < 1e-9);
        }

        #[test]
        fn prop_mapping_stays_in_delay_range(s in 0.0f64..=1.0) {
            let d = spawn_interval_given_slider(s);
            prop_assert!(d >= SPAWN_INTERVAL_MIN - 1e-9);
            prop_assert!(d <= SPAWN_INTERVAL_MAX + 1e-9);
        }
    }
}
