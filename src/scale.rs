//! Zoom scale arithmetic.
//!
//! Zoom is stored everywhere in this crate as a *level*: the exponent of
//! the text-size multiplier step. A level of 0.0 is the neutral 1.0×
//! factor, 1.0 is one zoom-in step (1.2×), -1.0 one zoom-out step, and so
//! on. Levels compose additively, which is why the registry stores levels
//! rather than raw factors.

/// Multiplier applied per zoom step (factor = step ^ level).
pub const ZOOM_FACTOR_STEP: f64 = 1.2;

/// Two levels closer than this are considered the same level.
pub const ZOOM_LEVEL_EPSILON: f64 = 0.001;

/// Converts a zoom level (step exponent) to a page scale factor.
pub fn level_to_factor(level: f64) -> f64 {
    ZOOM_FACTOR_STEP.powf(level)
}

/// Converts a page scale factor to a zoom level (step exponent).
pub fn factor_to_level(factor: f64) -> f64 {
    factor.ln() / ZOOM_FACTOR_STEP.ln()
}

/// Compares two zoom levels with [`ZOOM_LEVEL_EPSILON`] tolerance.
///
/// Levels come out of floating point conversions, so every "is this the
/// same level" decision in the crate goes through this instead of `==`.
pub fn levels_equal(a: f64, b: f64) -> bool {
    (a - b).abs() <= ZOOM_LEVEL_EPSILON
}
