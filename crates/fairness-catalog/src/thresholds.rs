//! Assessment thresholds.
//!
//! Ratio metrics are fairer when higher, difference metrics when closer to
//! zero. Boundary values belong to the fairer band on the ratio scale and to
//! the less fair band on the difference scale.

/// Ratio at or above which a ratio metric is Fair (four-fifths rule).
pub const RATIO_FAIR_MIN: f64 = 0.8;

/// Ratio at or above which a ratio metric is a Warning rather than a Violation.
pub const RATIO_WARNING_MIN: f64 = 0.6;

/// Absolute difference below which a difference metric is Fair.
pub const DIFFERENCE_FAIR_MAX: f64 = 0.10;

/// Absolute difference below which a difference metric is a Warning rather
/// than a Violation.
pub const DIFFERENCE_WARNING_MAX: f64 = 0.20;

/// Scores within this distance of a threshold count as sitting on it.
///
/// Rates are ratios of counts, so a gap such as `3/10 - 2/10` lands a rounding
/// step away from `0.10` rather than on it.
pub const THRESHOLD_TOLERANCE: f64 = 1e-9;
