//! Angle normalization and input-domain checks shared by the converters.

use crate::error::FrameError;

/// Wrap degrees into [0, 360).
pub fn normalize_deg_360(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Wrap degrees into (-180, 180].
pub fn normalize_deg_180(deg: f64) -> f64 {
    let wrapped = normalize_deg_360(deg);
    if wrapped > 180.0 { wrapped - 360.0 } else { wrapped }
}

pub(crate) fn check_finite(what: &'static str, value: f64) -> Result<f64, FrameError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FrameError::Domain { what, value })
    }
}

/// Latitude must lie in [-90, 90]; it is never clamped.
pub(crate) fn check_latitude_deg(lat_deg: f64) -> Result<f64, FrameError> {
    if lat_deg.is_finite() && (-90.0..=90.0).contains(&lat_deg) {
        Ok(lat_deg)
    } else {
        Err(FrameError::Domain {
            what: "latitude",
            value: lat_deg,
        })
    }
}

/// Longitude accepted in either convention, (-180, 180] or [0, 360).
pub(crate) fn check_longitude_deg(lon_deg: f64) -> Result<f64, FrameError> {
    if lon_deg.is_finite() && (-180.0..=360.0).contains(&lon_deg) {
        Ok(lon_deg)
    } else {
        Err(FrameError::Domain {
            what: "longitude",
            value: lon_deg,
        })
    }
}

pub(crate) fn check_elevation_deg(el_deg: f64) -> Result<f64, FrameError> {
    if el_deg.is_finite() && (-90.0..=90.0).contains(&el_deg) {
        Ok(el_deg)
    } else {
        Err(FrameError::Domain {
            what: "elevation",
            value: el_deg,
        })
    }
}

pub(crate) fn check_range_m(range_m: f64) -> Result<f64, FrameError> {
    if range_m.is_finite() && range_m >= 0.0 {
        Ok(range_m)
    } else {
        Err(FrameError::Domain {
            what: "slant range",
            value: range_m,
        })
    }
}
