//! Reference ellipsoids, looked up by datum name.
//!
//! The datum table is a `const` array: immutable, built at compile time
//! and safe to read from any number of threads.

use crate::error::FrameError;

/// A biaxial reference ellipsoid.
///
/// Stored as semi-major and semi-minor axes; flattening and first
/// eccentricity squared are derived from them when the table is built.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Ellipsoid {
    /// Lookup key, lower case (e.g. `"wgs84"`).
    pub name: &'static str,
    /// Human-readable model name.
    pub display_name: &'static str,
    /// Equatorial radius `a` in meters.
    pub semi_major_axis_m: f64,
    /// Polar radius `b` in meters.
    pub semi_minor_axis_m: f64,
    /// f = (a − b) / a.
    pub flattening: f64,
    /// e² = f(2 − f).
    pub eccentricity_sq: f64,
}

impl Ellipsoid {
    const fn from_axes(name: &'static str, display_name: &'static str, a: f64, b: f64) -> Self {
        let f = (a - b) / a;
        Self {
            name,
            display_name,
            semi_major_axis_m: a,
            semi_minor_axis_m: b,
            flattening: f,
            eccentricity_sq: f * (2.0 - f),
        }
    }

    /// The WGS-84 ellipsoid, the default datum.
    pub const fn wgs84() -> Self {
        DATUMS[0]
    }

    /// Look up a datum by name, ignoring ASCII case and surrounding whitespace.
    pub fn lookup(name: &str) -> Result<Self, FrameError> {
        let key = name.trim();
        DATUMS
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(key))
            .copied()
            .ok_or_else(|| FrameError::UnknownDatum(name.to_string()))
    }

    /// Names of all supported datums.
    pub fn names() -> impl Iterator<Item = &'static str> {
        DATUMS.iter().map(|e| e.name)
    }

    /// Third flattening n = (a − b) / (a + b).
    pub fn third_flattening(&self) -> f64 {
        (self.semi_major_axis_m - self.semi_minor_axis_m)
            / (self.semi_major_axis_m + self.semi_minor_axis_m)
    }

    /// First eccentricity e.
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity_sq.sqrt()
    }

    /// Prime-vertical radius of curvature N(φ) = a / √(1 − e² sin²φ).
    pub fn prime_vertical_radius(&self, lat_rad: f64) -> f64 {
        let s = lat_rad.sin();
        self.semi_major_axis_m / (1.0 - self.eccentricity_sq * s * s).sqrt()
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::wgs84()
    }
}

const DATUMS: [Ellipsoid; 4] = [
    Ellipsoid::from_axes("wgs84", "WGS-84 (1984)", 6_378_137.0, 6_356_752.314_245_18),
    Ellipsoid::from_axes("cgcs2000", "CGCS-2000 (2008)", 6_378_137.0, 6_356_752.314_14),
    Ellipsoid::from_axes("moon", "Moon", 1_738_100.0, 1_736_000.0),
    Ellipsoid::from_axes("mars", "Mars", 3_396_190.0, 3_376_097.805_859_52),
];
