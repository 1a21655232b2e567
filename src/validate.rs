//! Input validation helpers.
//!
//! Uses `!is_finite()` to reject NaN, +Inf and -Inf uniformly, so no invalid
//! input ever reaches a formula and surfaces later as a NaN price.

use crate::error::{OptionsError, Result};

/// Validate that a value is strictly positive and finite.
pub(crate) fn validate_positive(value: f64, name: &'static str) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(OptionsError::InvalidParameter {
            parameter: name,
            value,
            reason: "must be positive and finite",
        });
    }
    Ok(value)
}

/// Validate that a value is non-negative and finite.
pub(crate) fn validate_non_negative(value: f64, name: &'static str) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(OptionsError::InvalidParameter {
            parameter: name,
            value,
            reason: "must be non-negative and finite",
        });
    }
    Ok(value)
}

/// Validate that a value is finite (zero and negatives allowed).
pub(crate) fn validate_finite(value: f64, name: &'static str) -> Result<f64> {
    if !value.is_finite() {
        return Err(OptionsError::InvalidParameter {
            parameter: name,
            value,
            reason: "must be finite",
        });
    }
    Ok(value)
}

/// Validate that a count is at least one.
pub(crate) fn validate_count(value: usize, name: &'static str) -> Result<usize> {
    if value == 0 {
        return Err(OptionsError::InvalidParameter {
            parameter: name,
            value: 0.0,
            reason: "must be at least 1",
        });
    }
    Ok(value)
}
