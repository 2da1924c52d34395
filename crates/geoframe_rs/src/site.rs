use geoframe_frames::rotation::{ecef_to_enu_matrix, mat_vec};
use geoframe_frames::{
    Aer, Ecef, Eci, Ellipsoid, Enu, Epoch, FrameError, Geodetic, Matrix3, eci_to_ecef,
    enu_to_aer, geodetic_to_ecef,
};

use crate::error::GeoframeError;

/// A named ground site, e.g. an antenna or observer.
///
/// The site's ECEF position and its ECEF → ENU rotation are computed once
/// at construction, which also validates its coordinates. Look angles only
/// translate and rotate the target.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    name: String,
    location: Geodetic,
    ellipsoid: Ellipsoid,
    ecef: Ecef,
    to_enu: Matrix3,
}

impl Site {
    pub fn new(
        name: impl Into<String>,
        location: Geodetic,
        ellipsoid: Ellipsoid,
    ) -> Result<Self, GeoframeError> {
        let ecef = geodetic_to_ecef(&location, &ellipsoid)?;
        let to_enu =
            ecef_to_enu_matrix(location.lat_deg.to_radians(), location.lon_deg.to_radians());
        Ok(Self {
            name: name.into(),
            location,
            ellipsoid,
            ecef,
            to_enu,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &Geodetic {
        &self.location
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    pub fn ecef(&self) -> &Ecef {
        &self.ecef
    }

    /// Azimuth, elevation and slant range from the site to an ECEF target.
    pub fn look_angles(&self, target: &Ecef) -> Result<Aer, GeoframeError> {
        Ok(enu_to_aer(&self.local_offset(target)?)?)
    }

    /// Look angles to an inertial target at `epoch`.
    pub fn look_angles_eci(&self, target: &Eci, epoch: Epoch) -> Result<Aer, GeoframeError> {
        self.look_angles(&eci_to_ecef(target, epoch))
    }

    /// Local ENU offset of an ECEF target.
    pub fn local_offset(&self, target: &Ecef) -> Result<Enu, GeoframeError> {
        let delta = [
            finite("x", target.x_m)? - self.ecef.x_m,
            finite("y", target.y_m)? - self.ecef.y_m,
            finite("z", target.z_m)? - self.ecef.z_m,
        ];
        let [east_m, north_m, up_m] = mat_vec(&self.to_enu, &delta);
        Ok(Enu::new(east_m, north_m, up_m))
    }

    /// Whether the target is at or above `min_elevation_deg` as seen from the site.
    pub fn is_visible(&self, target: &Ecef, min_elevation_deg: f64) -> Result<bool, GeoframeError> {
        Ok(self.look_angles(target)?.el_deg >= min_elevation_deg)
    }
}

fn finite(what: &'static str, value: f64) -> Result<f64, FrameError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FrameError::Domain { what, value })
    }
}
