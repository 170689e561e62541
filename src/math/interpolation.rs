//! Linear interpolation and the level-to-height encoding law
//!
//! Measured, computed and saved values all reach the display through
//! [`HeightMapping`], so a given level always lands at the same height
//! regardless of where it came from.

use num_traits::Float;

use crate::io::configuration::{
    DEFAULT_HIGH_HEIGHT, DEFAULT_HIGH_LEVEL, DEFAULT_LOW_HEIGHT, DEFAULT_LOW_LEVEL,
};

/// Interpolate between `a` and `b` by `t` without clamping
pub fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    (b - a).mul_add(t, a)
}

/// Position of `value` relative to the range `a..b`
///
/// A collapsed range (`a == b`) yields zero.
pub fn inverse_lerp<T: Float>(a: T, b: T, value: T) -> T {
    let span = b - a;
    if span.abs() <= T::epsilon() {
        return T::zero();
    }
    (value - a) / span
}

/// Clamp into `[0, 1]`, mapping NaN to zero
pub fn clamp01<T: Float>(t: T) -> T {
    if t.is_nan() {
        return T::zero();
    }
    t.max(T::zero()).min(T::one())
}

/// Maps a signal level onto a visual height
///
/// Levels at or below `low_level` sit at `low_height`, levels at or above
/// `high_level` at `high_height`, and everything in between is linear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightMapping {
    /// Level mapped to the lowest height
    pub low_level: i32,
    /// Level mapped to the highest height
    pub high_level: i32,
    /// Height assigned to weak signals
    pub low_height: f32,
    /// Height assigned to strong signals
    pub high_height: f32,
}

impl HeightMapping {
    /// Create a mapping from level thresholds and height bounds
    pub const fn new(low_level: i32, high_level: i32, low_height: f32, high_height: f32) -> Self {
        Self {
            low_level,
            high_level,
            low_height,
            high_height,
        }
    }

    /// Normalized position of `value` between the thresholds, clamped to `[0, 1]`
    pub fn fraction(&self, value: f32) -> f32 {
        clamp01(inverse_lerp(
            self.low_level as f32,
            self.high_level as f32,
            value,
        ))
    }

    /// Height for a continuous value (computed estimates)
    pub fn height(&self, value: f32) -> f32 {
        lerp(self.low_height, self.high_height, self.fraction(value))
    }

    /// Height for an integer level (measured and saved values)
    pub fn level_height(&self, level: i32) -> f32 {
        self.height(level as f32)
    }
}

impl Default for HeightMapping {
    fn default() -> Self {
        Self::new(
            DEFAULT_LOW_LEVEL,
            DEFAULT_HIGH_LEVEL,
            DEFAULT_LOW_HEIGHT,
            DEFAULT_HIGH_HEIGHT,
        )
    }
}
