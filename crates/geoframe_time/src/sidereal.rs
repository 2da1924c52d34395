//! Greenwich Mean Sidereal Time.
//!
//! Provides the Earth rotation angle used to rotate between the
//! Earth-fixed and inertial frames. The model is the IAU 1982 GMST
//! polynomial; polar motion, nutation and precession are not applied.
//!
//! Functions take Julian Dates on the UTC scale, used as UT1
//! (|UT1 − UTC| < 0.9 s, i.e. < 0.004° of rotation).
//!
//! Source: Aoki et al. 1982, as given in the Explanatory Supplement to
//! the Astronomical Almanac (1992), eq. 2.24-1. Public domain.

use std::f64::consts::TAU;

use crate::julian::jd_to_centuries;

/// Seconds of sidereal time per degree of rotation (86400 s / 360°).
const SECONDS_PER_DEGREE: f64 = 240.0;

/// GMST in seconds of time at a given Julian Date, not wrapped.
///
/// GMST = 67310.54841 + (876600 h + 8640184.812866) s·T
///        + 0.093104 s·T² − 6.2e-6 s·T³
/// where T = Julian centuries from J2000.0.
pub fn gmst_seconds(jd: f64) -> f64 {
    let t = jd_to_centuries(jd);
    let t2 = t * t;
    let t3 = t2 * t;
    67_310.548_41 + (876_600.0 * 3600.0 + 8_640_184.812_866) * t + 0.093_104 * t2 - 6.2e-6 * t3
}

/// Greenwich Mean Sidereal Time in degrees, range [0, 360).
pub fn greenwich_sidereal_time_deg(jd: f64) -> f64 {
    wrap_degrees(gmst_seconds(jd) / SECONDS_PER_DEGREE)
}

/// Greenwich Mean Sidereal Time in radians, range [0, 2π).
pub fn gmst_rad(jd: f64) -> f64 {
    let rad = greenwich_sidereal_time_deg(jd).to_radians();
    if rad >= TAU { 0.0 } else { rad }
}

/// Local Sidereal Time from GST and observer east longitude, both in degrees.
///
/// LST = GST + longitude_east. Returns degrees in [0, 360).
pub fn local_sidereal_time_deg(gst_deg: f64, longitude_east_deg: f64) -> f64 {
    wrap_degrees(gst_deg + longitude_east_deg)
}

// rem_euclid can round a tiny negative input up to exactly 360.0.
fn wrap_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
