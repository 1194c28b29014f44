//! Error type for the opt-in parameter checks.
//!
//! The numeric core never returns errors: invalid parameters simply propagate
//! `NaN`/`inf` through densities and samples. These errors are only produced by
//! [`Model2D::validate`](crate::distributions::Model2D::validate), by grid
//! construction with fewer than two points per axis, and by parsing a
//! distribution kind from a string.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("Invalid parameter `{field}` = {value}: {reason}")]
    InvalidParameter {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Grid size must be at least 2, got {0}")]
    GridTooSmall(usize),

    #[error("Unknown distribution kind: {0:?} (expected \"normal\" or \"banana\")")]
    UnknownKind(String),
}

impl ParameterError {
    pub(crate) fn invalid<T: num_traits::ToPrimitive>(
        field: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        ParameterError::InvalidParameter {
            field,
            value: value.to_f64().unwrap_or(f64::NAN),
            reason,
        }
    }
}

/// Checks that a scale parameter is a positive finite number.
pub(crate) fn check_positive<T: num_traits::Float>(
    field: &'static str,
    value: T,
) -> Result<(), ParameterError> {
    if value.is_finite() && value > T::zero() {
        Ok(())
    } else {
        Err(ParameterError::invalid(field, value, "must be finite and > 0"))
    }
}

pub(crate) fn check_finite<T: num_traits::Float>(
    field: &'static str,
    value: T,
) -> Result<(), ParameterError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParameterError::invalid(field, value, "must be finite"))
    }
}
