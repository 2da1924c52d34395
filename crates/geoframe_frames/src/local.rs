//! Local tangent-plane conversions (ENU and AER).
//!
//! ENU ↔ ECEF needs a geodetic reference point and its ellipsoid;
//! AER ↔ ENU is pure spherical trigonometry. Everything else here is a
//! composition of the two with [`crate::geodetic`].

use crate::angle::{
    check_elevation_deg, check_finite, check_latitude_deg, check_longitude_deg, check_range_m,
    normalize_deg_360,
};
use crate::coords::{Aer, Ecef, Enu, Geodetic};
use crate::ellipsoid::Ellipsoid;
use crate::error::FrameError;
use crate::geodetic::{ecef_to_geodetic, geodetic_to_ecef};
use crate::rotation::{ecef_to_enu_matrix, mat_vec, transpose};

/// ENU → AER.
///
/// range = √(e² + n² + u²), el = atan2(u, √(e² + n²)), az = atan2(e, n) in [0, 360).
/// A zero vector has no direction; it maps to az = el = range = 0.
pub fn enu_to_aer(enu: &Enu) -> Result<Aer, FrameError> {
    let e = check_finite("east", enu.east_m)?;
    let n = check_finite("north", enu.north_m)?;
    let u = check_finite("up", enu.up_m)?;

    let horizontal = e.hypot(n);
    let range = horizontal.hypot(u);

    if range == 0.0 {
        return Ok(Aer {
            az_deg: 0.0,
            el_deg: 0.0,
            range_m: 0.0,
        });
    }

    Ok(Aer {
        az_deg: normalize_deg_360(e.atan2(n).to_degrees()),
        el_deg: u.atan2(horizontal).to_degrees(),
        range_m: range,
    })
}

/// AER → ENU.
///
/// e = r cos(el) sin(az), n = r cos(el) cos(az), u = r sin(el).
pub fn aer_to_enu(aer: &Aer) -> Result<Enu, FrameError> {
    let az = check_finite("azimuth", aer.az_deg)?.to_radians();
    let el = check_elevation_deg(aer.el_deg)?.to_radians();
    let range = check_range_m(aer.range_m)?;

    let (sin_el, cos_el) = el.sin_cos();
    let (sin_az, cos_az) = az.sin_cos();
    let horizontal = range * cos_el;

    Ok(Enu {
        east_m: horizontal * sin_az,
        north_m: horizontal * cos_az,
        up_m: range * sin_el,
    })
}

/// ENU offset from `reference` → absolute ECEF position.
pub fn enu_to_ecef(
    enu: &Enu,
    reference: &Geodetic,
    ellipsoid: &Ellipsoid,
) -> Result<Ecef, FrameError> {
    let origin = geodetic_to_ecef(reference, ellipsoid)?;
    let local = [
        check_finite("east", enu.east_m)?,
        check_finite("north", enu.north_m)?,
        check_finite("up", enu.up_m)?,
    ];
    let rot = transpose(&reference_matrix(reference)?);
    let d = mat_vec(&rot, &local);
    Ok(Ecef {
        x_m: origin.x_m + d[0],
        y_m: origin.y_m + d[1],
        z_m: origin.z_m + d[2],
    })
}

/// Absolute ECEF position → ENU offset from `reference`.
pub fn ecef_to_enu(
    ecef: &Ecef,
    reference: &Geodetic,
    ellipsoid: &Ellipsoid,
) -> Result<Enu, FrameError> {
    let origin = geodetic_to_ecef(reference, ellipsoid)?;
    let delta = [
        check_finite("x", ecef.x_m)? - origin.x_m,
        check_finite("y", ecef.y_m)? - origin.y_m,
        check_finite("z", ecef.z_m)? - origin.z_m,
    ];
    let local = mat_vec(&reference_matrix(reference)?, &delta);
    Ok(Enu {
        east_m: local[0],
        north_m: local[1],
        up_m: local[2],
    })
}

/// AER from `reference` → ECEF.
pub fn aer_to_ecef(
    aer: &Aer,
    reference: &Geodetic,
    ellipsoid: &Ellipsoid,
) -> Result<Ecef, FrameError> {
    enu_to_ecef(&aer_to_enu(aer)?, reference, ellipsoid)
}

/// ECEF → AER seen from `reference`.
pub fn ecef_to_aer(
    ecef: &Ecef,
    reference: &Geodetic,
    ellipsoid: &Ellipsoid,
) -> Result<Aer, FrameError> {
    enu_to_aer(&ecef_to_enu(ecef, reference, ellipsoid)?)
}

pub fn geodetic_to_enu(
    point: &Geodetic,
    reference: &Geodetic,
    ellipsoid: &Ellipsoid,
) -> Result<Enu, FrameError> {
    ecef_to_enu(&geodetic_to_ecef(point, ellipsoid)?, reference, ellipsoid)
}

pub fn enu_to_geodetic(
    enu: &Enu,
    reference: &Geodetic,
    ellipsoid: &Ellipsoid,
) -> Result<Geodetic, FrameError> {
    ecef_to_geodetic(&enu_to_ecef(enu, reference, ellipsoid)?, ellipsoid)
}

/// Look angles from `reference` to a geodetic target.
pub fn geodetic_to_aer(
    point: &Geodetic,
    reference: &Geodetic,
    ellipsoid: &Ellipsoid,
) -> Result<Aer, FrameError> {
    enu_to_aer(&geodetic_to_enu(point, reference, ellipsoid)?)
}

pub fn aer_to_geodetic(
    aer: &Aer,
    reference: &Geodetic,
    ellipsoid: &Ellipsoid,
) -> Result<Geodetic, FrameError> {
    ecef_to_geodetic(&aer_to_ecef(aer, reference, ellipsoid)?, ellipsoid)
}

fn reference_matrix(reference: &Geodetic) -> Result<crate::rotation::Matrix3, FrameError> {
    let lat = check_latitude_deg(reference.lat_deg)?.to_radians();
    let lon = check_longitude_deg(reference.lon_deg)?.to_radians();
    Ok(ecef_to_enu_matrix(lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn enu_to_aer_known_value() {
        let aer = enu_to_aer(&Enu::new(10.0, 20.0, 30.0)).unwrap();
        assert!((aer.az_deg - 26.565_051_177).abs() < 1e-6, "az = {}", aer.az_deg);
        assert!((aer.el_deg - 53.300_774_799).abs() < 1e-6, "el = {}", aer.el_deg);
        assert!((aer.range_m - 37.416_573_868).abs() < 1e-6, "r = {}", aer.range_m);
    }

    #[test]
    fn aer_to_enu_known_value() {
        let enu = aer_to_enu(&Aer::new(45.0, 30.0, 2000.0)).unwrap();
        assert!((enu.east_m - 1224.744_871).abs() < 1e-6);
        assert!((enu.north_m - 1224.744_871).abs() < 1e-6);
        assert!((enu.up_m - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn zero_range_is_origin() {
        let enu = aer_to_enu(&Aer::new(123.0, 45.0, 0.0)).unwrap();
        assert_eq!(enu, Enu::new(0.0, 0.0, 0.0));
        let aer = enu_to_aer(&enu).unwrap();
        assert_eq!(aer, Aer::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn azimuth_quadrants() {
        let west = enu_to_aer(&Enu::new(-1.0, 0.0, 0.0)).unwrap();
        assert!((west.az_deg - 270.0).abs() < EPS);
        let south = enu_to_aer(&Enu::new(0.0, -1.0, 0.0)).unwrap();
        assert!((south.az_deg - 180.0).abs() < EPS);
        let north = enu_to_aer(&Enu::new(0.0, 1.0, 0.0)).unwrap();
        assert_eq!(north.az_deg, 0.0);
    }

    #[test]
    fn zenith_and_nadir() {
        let up = enu_to_aer(&Enu::new(0.0, 0.0, 5.0)).unwrap();
        assert!((up.el_deg - 90.0).abs() < EPS);
        let down = enu_to_aer(&Enu::new(0.0, 0.0, -5.0)).unwrap();
        assert!((down.el_deg + 90.0).abs() < EPS);
    }

    #[test]
    fn aer_rejects_bad_inputs() {
        assert!(matches!(
            aer_to_enu(&Aer::new(0.0, 91.0, 1.0)),
            Err(FrameError::Domain {
                what: "elevation",
                ..
            })
        ));
        assert!(matches!(
            aer_to_enu(&Aer::new(0.0, 10.0, -1.0)),
            Err(FrameError::Domain {
                what: "slant range",
                ..
            })
        ));
    }

    #[test]
    fn enu_zero_at_reference() {
        let ell = Ellipsoid::wgs84();
        let reference = Geodetic::new(42.0, -82.0, 200.0);
        let origin = geodetic_to_ecef(&reference, &ell).unwrap();
        let enu = ecef_to_enu(&origin, &reference, &ell).unwrap();
        assert!(enu.east_m.abs() < 1e-6);
        assert!(enu.north_m.abs() < 1e-6);
        assert!(enu.up_m.abs() < 1e-6);
    }

    #[test]
    fn up_moves_along_normal() {
        let ell = Ellipsoid::wgs84();
        let reference = Geodetic::new(42.0, -82.0, 200.0);
        let ecef = enu_to_ecef(&Enu::new(0.0, 0.0, 1000.0), &reference, &ell).unwrap();
        let g = ecef_to_geodetic(&ecef, &ell).unwrap();
        assert!((g.lat_deg - 42.0).abs() < 1e-9);
        assert!((g.lon_deg + 82.0).abs() < 1e-9);
        assert!((g.alt_m - 1200.0).abs() < 1e-6);
    }

    #[test]
    fn enu_roundtrip_at_equator() {
        let ell = Ellipsoid::wgs84();
        let reference = Geodetic::new(0.0, 0.0, 0.0);
        let enu = Enu::new(15.0, -8.0, 2.5);
        let back = ecef_to_enu(&enu_to_ecef(&enu, &reference, &ell).unwrap(), &reference, &ell)
            .unwrap();
        assert!((back.east_m - enu.east_m).abs() < 1e-6);
        assert!((back.north_m - enu.north_m).abs() < 1e-6);
        assert!((back.up_m - enu.up_m).abs() < 1e-6);
    }

    #[test]
    fn aer_to_geodetic_straight_up() {
        let ell = Ellipsoid::wgs84();
        let reference = Geodetic::new(-33.9, 18.4, 0.0);
        let g = aer_to_geodetic(&Aer::new(0.0, 90.0, 500.0), &reference, &ell).unwrap();
        assert!((g.lat_deg + 33.9).abs() < 1e-9);
        assert!((g.alt_m - 500.0).abs() < 1e-6);
    }

    #[test]
    fn geodetic_to_aer_due_north() {
        let ell = Ellipsoid::wgs84();
        let reference = Geodetic::new(10.0, 20.0, 0.0);
        let target = Geodetic::new(10.01, 20.0, 0.0);
        let aer = geodetic_to_aer(&target, &reference, &ell).unwrap();
        assert!(aer.az_deg < 1e-6 || aer.az_deg > 360.0 - 1e-6, "az = {}", aer.az_deg);
        // Earth curvature puts the target slightly below the horizon.
        assert!(aer.el_deg < 0.0);
        assert!((aer.range_m - 1106.0).abs() < 5.0, "r = {}", aer.range_m);
    }

    #[test]
    fn bad_reference_latitude_fails() {
        let ell = Ellipsoid::wgs84();
        let err = ecef_to_enu(&Ecef::new(0.0, 0.0, 0.0), &Geodetic::new(-95.0, 0.0, 0.0), &ell)
            .unwrap_err();
        assert!(matches!(err, FrameError::Domain { what: "latitude", .. }));
    }
}
