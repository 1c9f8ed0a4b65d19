// File: crates/axis-core/src/range.rs
// Summary: Scalar plot-space interval and the sanitizers that keep it renderable.

use crate::types::{LOG_FLOOR, MAX_TIME, MIN_TIME};

/// Closed plot-space interval. Contract once constrained: `max > min`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn size(&self) -> f64 {
        self.max - self.min
    }

    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    /// Halves before adding so `[f64::MIN, f64::MAX]` stays finite.
    pub fn midpoint(&self) -> f64 {
        self.min * 0.5 + self.max * 0.5
    }

    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

/// True for NaN and both infinities.
#[inline]
pub fn nan_or_inf(v: f64) -> bool {
    !v.is_finite()
}

/// NaN becomes 0.
#[inline]
pub fn constrain_nan(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v }
}

/// Infinities become the largest finite values.
#[inline]
pub fn constrain_inf(v: f64) -> f64 {
    if v == f64::INFINITY {
        f64::MAX
    } else if v == f64::NEG_INFINITY {
        f64::MIN
    } else {
        v
    }
}

/// Non-positive values become [`LOG_FLOOR`].
#[inline]
pub fn constrain_log(v: f64) -> f64 {
    if v <= 0.0 { LOG_FLOOR } else { v }
}

/// Clamp into the supported timestamp window.
#[inline]
pub fn constrain_time(v: f64) -> f64 {
    v.clamp(MIN_TIME, MAX_TIME)
}

