//! Time handling for Earth-fixed ↔ inertial frame rotation.
//!
//! This crate provides:
//! - Unix seconds ↔ Julian Date ↔ calendar conversions
//! - Greenwich Mean Sidereal Time (IAU 1982)
//! - `UtcTime` for calendar input/output and ISO-8601 parsing
//! - An `Epoch` type holding a validated instant

pub mod error;
pub mod julian;
pub mod sidereal;
pub mod utc_time;

pub use error::TimeError;
pub use julian::{
    DAYS_PER_JULIAN_CENTURY, J2000_JD, MAX_UNIX_SECONDS, MIN_UNIX_SECONDS, SECONDS_PER_DAY,
    UNIX_EPOCH_JD, calendar_to_jd, jd_to_calendar, jd_to_centuries, jd_to_unix_seconds,
    unix_seconds_to_jd,
};
pub use sidereal::{gmst_rad, gmst_seconds, greenwich_sidereal_time_deg, local_sidereal_time_deg};
pub use utc_time::UtcTime;

/// Julian Date for a Unix timestamp.
///
/// Fails with [`TimeError::InvalidEpoch`] for non-finite or out-of-range input.
pub fn julian_date(unix_seconds: f64) -> Result<f64, TimeError> {
    Ok(Epoch::from_unix_seconds(unix_seconds)?.as_jd())
}

/// A validated instant, stored as Unix seconds (UTC).
///
/// Construction rejects NaN, infinities, and instants outside
/// Julian Date 0 ..= 9999-12-31T23:59:59Z, so every `Epoch` yields a
/// meaningful Julian Date and sidereal angle.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Epoch {
    unix_seconds: f64,
}

impl Epoch {
    /// Create an epoch from seconds since 1970-01-01T00:00:00Z.
    pub fn from_unix_seconds(unix_seconds: f64) -> Result<Self, TimeError> {
        if !unix_seconds.is_finite()
            || !(MIN_UNIX_SECONDS..=MAX_UNIX_SECONDS).contains(&unix_seconds)
        {
            return Err(TimeError::InvalidEpoch {
                value: unix_seconds,
            });
        }
        Ok(Self { unix_seconds })
    }

    /// Create an epoch from a Julian Date (UTC).
    pub fn from_jd(jd: f64) -> Result<Self, TimeError> {
        if !jd.is_finite() {
            return Err(TimeError::InvalidEpoch { value: jd });
        }
        Self::from_unix_seconds(jd_to_unix_seconds(jd))
            .map_err(|_| TimeError::InvalidEpoch { value: jd })
    }

    /// Create an epoch from a UTC calendar date.
    pub fn from_utc(utc: &UtcTime) -> Result<Self, TimeError> {
        Self::from_unix_seconds(utc.to_unix_seconds()?)
    }

    /// Seconds since 1970-01-01T00:00:00Z.
    pub fn as_unix_seconds(self) -> f64 {
        self.unix_seconds
    }

    /// Julian Date (UTC).
    pub fn as_jd(self) -> f64 {
        unix_seconds_to_jd(self.unix_seconds)
    }

    /// UTC calendar form.
    pub fn to_utc(self) -> UtcTime {
        UtcTime::from_unix_seconds(self.unix_seconds)
    }

    /// Greenwich Mean Sidereal Time in degrees, [0, 360).
    pub fn gst_deg(self) -> f64 {
        greenwich_sidereal_time_deg(self.as_jd())
    }

    /// Greenwich Mean Sidereal Time in radians, [0, 2π).
    pub fn gst_rad(self) -> f64 {
        gmst_rad(self.as_jd())
    }
}

impl std::str::FromStr for Epoch {
    type Err = TimeError;

    /// Accepts either a Unix-seconds number or an ISO-8601 UTC string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.parse::<f64>() {
            Ok(seconds) => Self::from_unix_seconds(seconds),
            Err(_) => Self::from_utc(&trimmed.parse::<UtcTime>()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_from_jd_roundtrip() {
        let jd = 2_460_000.5;
        let epoch = Epoch::from_jd(jd).unwrap();
        assert!((epoch.as_jd() - jd).abs() < 1e-9);
    }

    #[test]
    fn epoch_unix_zero() {
        let epoch = Epoch::from_unix_seconds(0.0).unwrap();
        assert_eq!(epoch.as_jd(), UNIX_EPOCH_JD);
    }

    #[test]
    fn epoch_rejects_nan_and_infinity() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                Epoch::from_unix_seconds(bad),
                Err(TimeError::InvalidEpoch { .. })
            ));
        }
    }

    #[test]
    fn epoch_rejects_out_of_range() {
        assert!(Epoch::from_unix_seconds(MAX_UNIX_SECONDS + 1.0).is_err());
        assert!(Epoch::from_unix_seconds(MIN_UNIX_SECONDS - 1.0).is_err());
        assert!(Epoch::from_jd(-1.0).is_err());
        assert!(Epoch::from_unix_seconds(MAX_UNIX_SECONDS).is_ok());
    }

    #[test]
    fn epoch_from_utc_matches_unix() {
        let utc = UtcTime::new(2023, 1, 1, 0, 0, 0.0);
        let epoch = Epoch::from_utc(&utc).unwrap();
        assert_eq!(epoch.as_unix_seconds(), 1_672_531_200.0);
        assert_eq!(epoch.to_utc(), utc);
    }

    #[test]
    fn epoch_parses_number_or_iso() {
        let a: Epoch = "1672531200".parse().unwrap();
        let b: Epoch = "2023-01-01T00:00:00Z".parse().unwrap();
        assert_eq!(a, b);
        assert!("yesterday".parse::<Epoch>().is_err());
    }

    #[test]
    fn julian_date_of_j2000() {
        let jd = julian_date(946_728_000.0).unwrap();
        assert!((jd - J2000_JD).abs() < 1e-9);
        assert!(julian_date(f64::NAN).is_err());
    }

    #[test]
    fn epoch_gst_matches_free_function() {
        let epoch = Epoch::from_unix_seconds(1_700_000_000.0).unwrap();
        assert_eq!(epoch.gst_deg(), greenwich_sidereal_time_deg(epoch.as_jd()));
    }
}
