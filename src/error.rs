use crate::common::Real;

use thiserror::Error;

/// Result type for the radar signal-chain operations.
pub type StapResult<T> = Result<T, StapError>;

/// All failures are detected at the point of first violation; nothing in
/// this crate retries or recovers.
#[derive(Error, Debug)]
pub enum StapError {
    /// Malformed timing/geometry parameter, rejected at the setter.
    #[error("invalid value for {name}: {value}")]
    Validation { name: &'static str, value: Real },

    /// Steering-vector frequency arguments of different lengths.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Operation requires an array aperture.
    #[error("unsupported geometry: {0}")]
    UnsupportedGeometry(&'static str),

    /// Interference model requested for an unsupported source variant.
    #[error("unsupported interference source: {0}")]
    UnsupportedSourceType(&'static str),
}

pub(crate) fn check_finite(name: &'static str, value: Real) -> StapResult<Real> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StapError::Validation { name, value })
    }
}

pub(crate) fn check_non_negative(name: &'static str, value: Real) -> StapResult<Real> {
    match check_finite(name, value)? {
        v if v >= 0.0 => Ok(v),
        v => Err(StapError::Validation { name, value: v }),
    }
}

pub(crate) fn check_positive(name: &'static str, value: Real) -> StapResult<Real> {
    match check_finite(name, value)? {
        v if v > 0.0 => Ok(v),
        v => Err(StapError::Validation { name, value: v }),
    }
}
