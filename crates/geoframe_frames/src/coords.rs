//! Coordinate value types.
//!
//! Plain `Copy` records with unit-suffixed fields. None of them carry an
//! ellipsoid or epoch; those are passed to the conversion that needs them.

/// Ellipsoidal geodetic position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geodetic {
    /// Geodetic latitude in degrees, north positive. Range: [-90, 90].
    pub lat_deg: f64,
    /// Longitude in degrees, east positive. Outputs use (-180, 180].
    pub lon_deg: f64,
    /// Height above the ellipsoid in meters (negative inside it).
    pub alt_m: f64,
}

impl Geodetic {
    pub fn new(lat_deg: f64, lon_deg: f64, alt_m: f64) -> Self {
        Self {
            lat_deg,
            lon_deg,
            alt_m,
        }
    }

    /// Latitude in radians.
    pub fn lat_rad(&self) -> f64 {
        self.lat_deg.to_radians()
    }

    /// Longitude in radians (east positive).
    pub fn lon_rad(&self) -> f64 {
        self.lon_deg.to_radians()
    }
}

/// Earth-centered, Earth-fixed Cartesian position in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ecef {
    pub x_m: f64,
    pub y_m: f64,
    pub z_m: f64,
}

impl Ecef {
    pub fn new(x_m: f64, y_m: f64, z_m: f64) -> Self {
        Self { x_m, y_m, z_m }
    }

    pub fn from_array(xyz: [f64; 3]) -> Self {
        Self::new(xyz[0], xyz[1], xyz[2])
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x_m, self.y_m, self.z_m]
    }
}

/// Earth-centered inertial Cartesian position in meters.
///
/// Shares its origin with [`Ecef`]; the two differ by a rotation about
/// the polar axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Eci {
    pub x_m: f64,
    pub y_m: f64,
    pub z_m: f64,
}

impl Eci {
    pub fn new(x_m: f64, y_m: f64, z_m: f64) -> Self {
        Self { x_m, y_m, z_m }
    }

    pub fn from_array(xyz: [f64; 3]) -> Self {
        Self::new(xyz[0], xyz[1], xyz[2])
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x_m, self.y_m, self.z_m]
    }
}

/// East-North-Up offset from a reference point, meters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enu {
    pub east_m: f64,
    pub north_m: f64,
    pub up_m: f64,
}

impl Enu {
    pub fn new(east_m: f64, north_m: f64, up_m: f64) -> Self {
        Self {
            east_m,
            north_m,
            up_m,
        }
    }
}

/// Azimuth-Elevation-Range look angles from a reference point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aer {
    /// Azimuth in degrees clockwise from north, range [0, 360).
    pub az_deg: f64,
    /// Elevation above the local horizon in degrees, range [-90, 90].
    pub el_deg: f64,
    /// Slant range in meters, >= 0.
    pub range_m: f64,
}

impl Aer {
    pub fn new(az_deg: f64, el_deg: f64, range_m: f64) -> Self {
        Self {
            az_deg,
            el_deg,
            range_m,
        }
    }
}
