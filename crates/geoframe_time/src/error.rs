//! Error types for time conversions.

use thiserror::Error;

/// Errors from epoch validation, calendar handling, or UTC string parsing.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// Timestamp or Julian Date is non-finite or outside the supported range.
    #[error("invalid epoch: {value} is not a supported timestamp")]
    InvalidEpoch { value: f64 },
    /// Calendar field out of range (month 13, hour 24, ...).
    #[error("invalid calendar date: {0}")]
    InvalidCalendar(String),
    /// UTC string did not match `YYYY-MM-DDThh:mm:ss[.fff]Z`.
    #[error("UTC parse error: {0}")]
    Parse(String),
}
