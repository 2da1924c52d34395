//! Julian Date arithmetic.
//!
//! Conversions between Unix seconds, Julian Dates and the proleptic
//! Gregorian calendar. Julian Dates here are on the UTC time scale and are
//! used as an approximation of UT1 by the sidereal-time routines.

/// Julian Date of the J2000.0 epoch (2000-01-01T12:00:00).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of the Unix epoch (1970-01-01T00:00:00Z).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days in one Julian century.
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Earliest supported Unix timestamp: Julian Date 0.0.
pub const MIN_UNIX_SECONDS: f64 = -UNIX_EPOCH_JD * SECONDS_PER_DAY;

/// Latest supported Unix timestamp: 9999-12-31T23:59:59Z.
pub const MAX_UNIX_SECONDS: f64 = 253_402_300_799.0;

/// Convert Unix seconds to a Julian Date.
///
/// JD = s / 86400 + 2440587.5. Fractional seconds are preserved to the
/// resolution of an `f64` Julian Date (about 40 µs near the present).
pub fn unix_seconds_to_jd(unix_seconds: f64) -> f64 {
    unix_seconds / SECONDS_PER_DAY + UNIX_EPOCH_JD
}

/// Convert a Julian Date to Unix seconds.
pub fn jd_to_unix_seconds(jd: f64) -> f64 {
    (jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY
}

/// Julian centuries elapsed since J2000.0.
pub fn jd_to_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_JULIAN_CENTURY
}

/// Proleptic Gregorian calendar date to Julian Date.
///
/// `day` carries the time of day as a fraction (e.g. 1.5 = noon on the 1st).
///
/// Source: Meeus, *Astronomical Algorithms*, ch. 7, with the Gregorian
/// correction applied to every date.
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let a = y.div_euclid(100);
    let b = 2 - a + a.div_euclid(4);
    (365.25 * f64::from(y + 4716)).floor() + (30.6001 * f64::from(m + 1)).floor() + day
        + f64::from(b)
        - 1524.5
}

/// Julian Date to proleptic Gregorian calendar date.
///
/// Returns `(year, month, day)` where `day` carries the fraction of the day.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let shifted = jd + 0.5;
    let z = shifted.floor();
    let f = shifted - z;
    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

    (year as i32, month as u32, day)
}
