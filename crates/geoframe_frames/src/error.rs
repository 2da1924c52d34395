//! Error types for frame conversions.

use geoframe_time::TimeError;
use thiserror::Error;

/// Errors from coordinate conversion.
///
/// Every failing conversion reports exactly one of these; no conversion
/// substitutes a default value for a rejected input.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum FrameError {
    /// Input outside its valid domain (latitude beyond ±90°, negative range, NaN).
    #[error("{what} out of range: {value}")]
    Domain { what: &'static str, value: f64 },
    /// Ellipsoid name not in the datum table.
    #[error("unknown datum: {0:?}")]
    UnknownDatum(String),
    /// Geodetic inversion did not reach tolerance within the iteration cap.
    #[error("geodetic inversion did not converge after {iterations} iterations (last step {residual_rad:e} rad)")]
    ConvergenceFailure { iterations: u32, residual_rad: f64 },
    /// Malformed or out-of-range timestamp.
    #[error("invalid epoch: {0}")]
    InvalidEpoch(#[from] TimeError),
    /// Solver configuration rejected by validation.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}
