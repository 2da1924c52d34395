//! Geodetic ↔ ECEF conversion.
//!
//! The forward direction is closed-form. The inverse has no closed form
//! and is solved by Newton's method on the latitude of the surface foot
//! point, i.e. the root of
//!
//!   F(φ) = p·sin φ − z·cos φ − e²·N(φ)·sin φ·cos φ,   p = √(x² + y²)
//!
//! seeded with Bowring's estimate from the parametric latitude
//! β₀ = atan2(a·z, b·p):
//!
//!   φ₀ = atan2(z + e'²·b·sin³β₀, p − e²·a·cos³β₀)
//!
//! The seed is exact on the surface and within ~1e-10 rad at low-orbit
//! heights, so one or two steps reach 1e-9 rad there. F changes sign between the equator and the
//! pole on the point's side, and a Newton step that leaves that bracket
//! is replaced by bisection, so deep-interior points converge as well.
//! Height is then taken from
//!
//!   h = p·cos φ + z·sin φ − a·√(1 − e² sin²φ)
//!
//! which stays well-conditioned at the poles, unlike h = p / cos φ − N.

use std::f64::consts::FRAC_PI_2;

use crate::angle::{check_finite, check_latitude_deg, check_longitude_deg, normalize_deg_180};
use crate::coords::{Ecef, Geodetic};
use crate::ellipsoid::Ellipsoid;
use crate::error::FrameError;

/// Distance from the polar axis below which longitude is reported as 0.
const POLAR_AXIS_TOLERANCE_M: f64 = 1e-6;

/// Upper bound accepted for [`InversionConfig::max_iterations`].
pub const MAX_ITERATION_CAP: u32 = 100;

/// Tuning for the iterative ECEF → geodetic inversion.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InversionConfig {
    /// Stop once a step changes latitude by less than this, in radians.
    pub tolerance_rad: f64,
    /// Fail with [`FrameError::ConvergenceFailure`] after this many steps.
    pub max_iterations: u32,
}

impl Default for InversionConfig {
    fn default() -> Self {
        Self {
            tolerance_rad: 1e-9,
            max_iterations: 10,
        }
    }
}

impl InversionConfig {
    pub fn validate(&self) -> Result<(), FrameError> {
        if !self.tolerance_rad.is_finite() || self.tolerance_rad <= 0.0 {
            return Err(FrameError::InvalidConfig(
                "tolerance_rad must be finite and positive",
            ));
        }
        if self.max_iterations == 0 || self.max_iterations > MAX_ITERATION_CAP {
            return Err(FrameError::InvalidConfig(
                "max_iterations must be between 1 and 100",
            ));
        }
        Ok(())
    }
}

/// Geodetic latitude/longitude/height to ECEF.
///
/// N = a / √(1 − e² sin²φ)
/// x = (N + h) cos φ cos λ,  y = (N + h) cos φ sin λ,  z = ((1 − e²) N + h) sin φ
pub fn geodetic_to_ecef(point: &Geodetic, ellipsoid: &Ellipsoid) -> Result<Ecef, FrameError> {
    let lat = check_latitude_deg(point.lat_deg)?.to_radians();
    let lon = check_longitude_deg(point.lon_deg)?.to_radians();
    let alt = check_finite("altitude", point.alt_m)?;

    let n = ellipsoid.prime_vertical_radius(lat);
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();

    Ok(Ecef {
        x_m: (n + alt) * cos_lat * cos_lon,
        y_m: (n + alt) * cos_lat * sin_lon,
        z_m: ((1.0 - ellipsoid.eccentricity_sq) * n + alt) * sin_lat,
    })
}

/// ECEF to geodetic with the default [`InversionConfig`].
pub fn ecef_to_geodetic(point: &Ecef, ellipsoid: &Ellipsoid) -> Result<Geodetic, FrameError> {
    ecef_to_geodetic_with(point, ellipsoid, &InversionConfig::default())
}

/// ECEF to geodetic latitude/longitude/height.
///
/// Longitude is `atan2(y, x)` in (-180, 180]. On the polar axis it is
/// undefined and reported as 0, with latitude ±90 (+90 at the center).
pub fn ecef_to_geodetic_with(
    point: &Ecef,
    ellipsoid: &Ellipsoid,
    config: &InversionConfig,
) -> Result<Geodetic, FrameError> {
    config.validate()?;
    let x = check_finite("x", point.x_m)?;
    let y = check_finite("y", point.y_m)?;
    let z = check_finite("z", point.z_m)?;

    let a = ellipsoid.semi_major_axis_m;
    let e2 = ellipsoid.eccentricity_sq;
    let p = x.hypot(y);

    if p < POLAR_AXIS_TOLERANCE_M {
        return Ok(Geodetic {
            lat_deg: if z < 0.0 { -90.0 } else { 90.0 },
            lon_deg: 0.0,
            alt_m: z.abs() - ellipsoid.semi_minor_axis_m,
        });
    }

    let lon = y.atan2(x);
    let mut lat = bowring_seed(p, z, ellipsoid);
    let (mut lo, mut hi) = if z < 0.0 {
        (-FRAC_PI_2, 0.0)
    } else {
        (0.0, FRAC_PI_2)
    };
    lat = lat.clamp(lo, hi);
    let mut step = f64::INFINITY;

    for iteration in 1..=config.max_iterations {
        let (sin_lat, cos_lat) = lat.sin_cos();
        let n = ellipsoid.prime_vertical_radius(lat);
        let residual = p * sin_lat - z * cos_lat - e2 * n * sin_lat * cos_lat;
        if residual < 0.0 {
            lo = lo.max(lat);
        } else if residual > 0.0 {
            hi = hi.min(lat);
        }

        let dn = n * e2 * sin_lat * cos_lat / (1.0 - e2 * sin_lat * sin_lat);
        let slope = p * cos_lat + z * sin_lat
            - e2 * (dn * sin_lat * cos_lat + n * (cos_lat * cos_lat - sin_lat * sin_lat));
        let mut next = lat - residual / slope;
        if !(lo..=hi).contains(&next) {
            next = 0.5 * (lo + hi);
        }
        step = (next - lat).abs();
        lat = next;

        if step < config.tolerance_rad {
            #[cfg(feature = "log")]
            log::debug!("geodetic inversion converged in {iteration} iterations (step {step:e} rad)");
            #[cfg(not(feature = "log"))]
            let _ = iteration;

            let (sin_lat, cos_lat) = lat.sin_cos();
            let alt = p * cos_lat + z * sin_lat - a * (1.0 - e2 * sin_lat * sin_lat).sqrt();
            return Ok(Geodetic {
                lat_deg: lat.to_degrees(),
                lon_deg: normalize_deg_180(lon.to_degrees()),
                alt_m: alt,
            });
        }
    }

    #[cfg(feature = "log")]
    log::warn!(
        "geodetic inversion gave up after {} iterations at ({x}, {y}, {z}), last step {step:e} rad",
        config.max_iterations
    );

    Err(FrameError::ConvergenceFailure {
        iterations: config.max_iterations,
        residual_rad: step,
    })
}

/// Bowring's latitude estimate for a point at distance `p` from the polar
/// axis and height `z` above the equatorial plane.
fn bowring_seed(p: f64, z: f64, ellipsoid: &Ellipsoid) -> f64 {
    let a = ellipsoid.semi_major_axis_m;
    let b = ellipsoid.semi_minor_axis_m;
    let e2 = ellipsoid.eccentricity_sq;
    let ep2 = e2 / (1.0 - e2);
    let (sin_beta, cos_beta) = (a * z).atan2(b * p).sin_cos();
    (z + ep2 * b * sin_beta.powi(3)).atan2(p - e2 * a * cos_beta.powi(3))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wgs84() -> Ellipsoid {
        Ellipsoid::wgs84()
    }

    #[test]
    fn equator_prime_meridian() {
        let ecef = geodetic_to_ecef(&Geodetic::new(0.0, 0.0, 0.0), &wgs84()).unwrap();
        assert!((ecef.x_m - 6_378_137.0).abs() < 1e-6);
        assert!(ecef.y_m.abs() < 1e-6);
        assert!(ecef.z_m.abs() < 1e-6);
    }

    #[test]
    fn north_pole_forward() {
        let ecef = geodetic_to_ecef(&Geodetic::new(90.0, 0.0, 0.0), &wgs84()).unwrap();
        assert!(ecef.x_m.abs() < 1e-6);
        assert!((ecef.z_m - wgs84().semi_minor_axis_m).abs() < 1e-6);
    }

    #[test]
    fn forward_rejects_bad_latitude() {
        let err = geodetic_to_ecef(&Geodetic::new(91.0, 0.0, 0.0), &wgs84()).unwrap_err();
        assert_eq!(
            err,
            FrameError::Domain {
                what: "latitude",
                value: 91.0
            }
        );
    }

    #[test]
    fn inverse_on_equator() {
        let g = ecef_to_geodetic(&Ecef::new(6_378_137.0, 0.0, 0.0), &wgs84()).unwrap();
        assert!(g.lat_deg.abs() < 1e-12);
        assert!(g.lon_deg.abs() < 1e-12);
        assert!(g.alt_m.abs() < 1e-6);
    }

    #[test]
    fn inverse_pole_reports_zero_longitude() {
        let ell = wgs84();
        for lon in [0.0, 45.0, -120.0] {
            let ecef = geodetic_to_ecef(&Geodetic::new(-90.0, lon, 100.0), &ell).unwrap();
            let g = ecef_to_geodetic(&ecef, &ell).unwrap();
            assert_eq!(g.lat_deg, -90.0);
            assert_eq!(g.lon_deg, 0.0);
            assert!((g.alt_m - 100.0).abs() < 1e-6);
        }
    }

    #[test]
    fn inverse_inside_ellipsoid_has_negative_altitude() {
        let ell = wgs84();
        let ecef = geodetic_to_ecef(&Geodetic::new(30.0, 60.0, -5000.0), &ell).unwrap();
        let g = ecef_to_geodetic(&ecef, &ell).unwrap();
        assert!((g.alt_m + 5000.0).abs() < 1e-3, "alt = {}", g.alt_m);
    }

    #[test]
    fn inverse_antimeridian() {
        let ell = wgs84();
        let ecef = geodetic_to_ecef(&Geodetic::new(10.0, 180.0, 0.0), &ell).unwrap();
        let g = ecef_to_geodetic(&ecef, &ell).unwrap();
        assert!((g.lon_deg.abs() - 180.0).abs() < 1e-9, "lon = {}", g.lon_deg);
    }

    #[test]
    fn longitude_in_0_360_comes_back_signed() {
        let ell = wgs84();
        let ecef = geodetic_to_ecef(&Geodetic::new(37.0, 238.0, 0.0), &ell).unwrap();
        let g = ecef_to_geodetic(&ecef, &ell).unwrap();
        assert!((g.lon_deg + 122.0).abs() < 1e-9, "lon = {}", g.lon_deg);
    }

    #[test]
    fn iteration_cap_is_reported() {
        // Geostationary altitude: the seed is off by a few nanoradians.
        let ell = wgs84();
        let ecef = geodetic_to_ecef(&Geodetic::new(45.0, 10.0, 35_786_000.0), &ell).unwrap();
        let config = InversionConfig {
            tolerance_rad: 1e-15,
            max_iterations: 1,
        };
        let err = ecef_to_geodetic_with(&ecef, &ell, &config).unwrap_err();
        assert!(matches!(
            err,
            FrameError::ConvergenceFailure { iterations: 1, .. }
        ));
    }

    #[test]
    fn deep_interior_points_converge() {
        let ell = wgs84();
        for r_km in [50.0, 100.0, 200.0, 400.0, 1000.0] {
            for lat in [1.0_f64, 10.0, 30.0, 45.0, 60.0, 89.0] {
                let r = r_km * 1000.0;
                let (s, c) = lat.to_radians().sin_cos();
                for z_sign in [1.0, -1.0] {
                    let ecef = Ecef::new(r * c, 0.0, z_sign * r * s);
                    let g = ecef_to_geodetic(&ecef, &ell)
                        .unwrap_or_else(|e| panic!("r={r_km}km lat={lat}: {e}"));
                    assert_eq!(g.lat_deg.signum(), z_sign);
                    let back = geodetic_to_ecef(&g, &ell).unwrap();
                    let err = ((back.x_m - ecef.x_m).powi(2)
                        + (back.y_m - ecef.y_m).powi(2)
                        + (back.z_m - ecef.z_m).powi(2))
                    .sqrt();
                    assert!(err < 1e-6, "r={r_km}km lat={lat}: {err} m");
                }
            }
        }
    }

    #[test]
    fn surface_points_need_few_iterations() {
        let ell = wgs84();
        let config = InversionConfig {
            tolerance_rad: 1e-9,
            max_iterations: 2,
        };
        for lat in [-80.0, -45.0, 0.5, 30.0, 60.0, 89.0] {
            let ecef = geodetic_to_ecef(&Geodetic::new(lat, 25.0, 120.0), &ell).unwrap();
            let g = ecef_to_geodetic_with(&ecef, &ell, &config).unwrap();
            assert!((g.lat_deg - lat).abs() < 1e-8, "lat = {}", g.lat_deg);
            assert!((g.alt_m - 120.0).abs() < 1e-5, "alt = {}", g.alt_m);
        }
    }

    #[test]
    fn config_validation() {
        assert!(InversionConfig::default().validate().is_ok());
        let bad_tol = InversionConfig {
            tolerance_rad: 0.0,
            max_iterations: 10,
        };
        assert!(matches!(
            bad_tol.validate(),
            Err(FrameError::InvalidConfig(_))
        ));
        let bad_cap = InversionConfig {
            tolerance_rad: 1e-9,
            max_iterations: 0,
        };
        assert!(bad_cap.validate().is_err());
    }

    #[test]
    fn inverse_rejects_nan() {
        let err = ecef_to_geodetic(&Ecef::new(f64::NAN, 0.0, 0.0), &wgs84()).unwrap_err();
        assert!(matches!(err, FrameError::Domain { what: "x", .. }));
    }
}
