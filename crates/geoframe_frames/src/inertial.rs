//! ECI ↔ ECEF conversion.
//!
//! The two frames share an origin and differ only by Earth's rotation
//! about the polar axis, taken as Greenwich Mean Sidereal Time:
//!
//!   r_ecef = R3(GST) · r_eci,   r_eci = R3(GST)ᵀ · r_ecef
//!
//! Polar motion, nutation and precession are ignored.

use geoframe_time::Epoch;

use crate::coords::{Aer, Ecef, Eci, Enu, Geodetic};
use crate::ellipsoid::Ellipsoid;
use crate::error::FrameError;
use crate::geodetic::{ecef_to_geodetic, geodetic_to_ecef};
use crate::local::{aer_to_ecef, ecef_to_aer, ecef_to_enu, enu_to_ecef};
use crate::rotation::{Matrix3, mat_vec, rotation_z, transpose};

/// Rotation taking ECI vectors to ECEF at `epoch`.
pub fn eci_to_ecef_matrix(epoch: Epoch) -> Matrix3 {
    rotation_z(epoch.gst_rad())
}

/// ECI → ECEF at `epoch`.
///
/// x' = x cos θ + y sin θ,  y' = −x sin θ + y cos θ,  z' = z,  θ = GST.
pub fn eci_to_ecef(eci: &Eci, epoch: Epoch) -> Ecef {
    Ecef::from_array(mat_vec(&eci_to_ecef_matrix(epoch), &eci.to_array()))
}

/// ECEF → ECI at `epoch`; the transpose of [`eci_to_ecef`].
pub fn ecef_to_eci(ecef: &Ecef, epoch: Epoch) -> Eci {
    let rot = transpose(&eci_to_ecef_matrix(epoch));
    Eci::from_array(mat_vec(&rot, &ecef.to_array()))
}

/// Unix-timestamp form of [`eci_to_ecef`]; rejects malformed timestamps.
pub fn eci_to_ecef_at(eci: &Eci, unix_seconds: f64) -> Result<Ecef, FrameError> {
    Ok(eci_to_ecef(eci, Epoch::from_unix_seconds(unix_seconds)?))
}

/// Unix-timestamp form of [`ecef_to_eci`]; rejects malformed timestamps.
pub fn ecef_to_eci_at(ecef: &Ecef, unix_seconds: f64) -> Result<Eci, FrameError> {
    Ok(ecef_to_eci(ecef, Epoch::from_unix_seconds(unix_seconds)?))
}

pub fn eci_to_geodetic(
    eci: &Eci,
    epoch: Epoch,
    ellipsoid: &Ellipsoid,
) -> Result<Geodetic, FrameError> {
    ecef_to_geodetic(&eci_to_ecef(eci, epoch), ellipsoid)
}

pub fn geodetic_to_eci(
    point: &Geodetic,
    epoch: Epoch,
    ellipsoid: &Ellipsoid,
) -> Result<Eci, FrameError> {
    Ok(ecef_to_eci(&geodetic_to_ecef(point, ellipsoid)?, epoch))
}

pub fn eci_to_enu(
    eci: &Eci,
    epoch: Epoch,
    reference: &Geodetic,
    ellipsoid: &Ellipsoid,
) -> Result<Enu, FrameError> {
    ecef_to_enu(&eci_to_ecef(eci, epoch), reference, ellipsoid)
}

pub fn enu_to_eci(
    enu: &Enu,
    epoch: Epoch,
    reference: &Geodetic,
    ellipsoid: &Ellipsoid,
) -> Result<Eci, FrameError> {
    Ok(ecef_to_eci(&enu_to_ecef(enu, reference, ellipsoid)?, epoch))
}

/// Look angles from a ground reference to an inertial position.
pub fn eci_to_aer(
    eci: &Eci,
    epoch: Epoch,
    reference: &Geodetic,
    ellipsoid: &Ellipsoid,
) -> Result<Aer, FrameError> {
    ecef_to_aer(&eci_to_ecef(eci, epoch), reference, ellipsoid)
}

pub fn aer_to_eci(
    aer: &Aer,
    epoch: Epoch,
    reference: &Geodetic,
    ellipsoid: &Ellipsoid,
) -> Result<Eci, FrameError> {
    Ok(ecef_to_eci(&aer_to_ecef(aer, reference, ellipsoid)?, epoch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoframe_time::{J2000_JD, TimeError};

    #[test]
    fn roundtrip_is_exact_rotation() {
        let epoch = Epoch::from_unix_seconds(1_672_531_200.0).unwrap();
        let ecef = Ecef::new(6_378_137.0, 0.0, 0.0);
        let back = eci_to_ecef(&ecef_to_eci(&ecef, epoch), epoch);
        assert!((back.x_m - ecef.x_m).abs() < 1e-6);
        assert!(back.y_m.abs() < 1e-6);
        assert!(back.z_m.abs() < 1e-6);
    }

    #[test]
    fn rotation_preserves_norm_and_z() {
        let epoch = Epoch::from_unix_seconds(1_700_000_000.0).unwrap();
        let eci = Eci::new(-4_000_000.0, 5_500_000.0, 2_100_000.0);
        let ecef = eci_to_ecef(&eci, epoch);
        let n1 = eci.x_m.hypot(eci.y_m);
        let n2 = ecef.x_m.hypot(ecef.y_m);
        assert!((n1 - n2).abs() < 1e-6);
        assert_eq!(ecef.z_m, eci.z_m);
    }

    #[test]
    fn greenwich_meridian_lies_at_gst() {
        // At J2000.0 the ECEF +X axis points at right ascension GST ≈ 280.46°.
        let epoch = Epoch::from_jd(J2000_JD).unwrap();
        let eci = ecef_to_eci(&Ecef::new(1.0, 0.0, 0.0), epoch);
        let ra = eci.y_m.atan2(eci.x_m).to_degrees().rem_euclid(360.0);
        assert!((ra - 280.460_618).abs() < 1e-5, "ra = {ra}");
    }

    #[test]
    fn timestamp_form_rejects_nan() {
        let err = eci_to_ecef_at(&Eci::new(1.0, 2.0, 3.0), f64::NAN).unwrap_err();
        assert!(matches!(
            err,
            FrameError::InvalidEpoch(TimeError::InvalidEpoch { .. })
        ));
    }

    #[test]
    fn ground_station_aer_from_eci() {
        let ell = Ellipsoid::wgs84();
        let epoch = Epoch::from_unix_seconds(1_700_000_000.0).unwrap();
        let site = Geodetic::new(51.5, -0.1, 20.0);
        // A point 400 km straight above the site, expressed in ECI.
        let overhead = Geodetic::new(51.5, -0.1, 400_020.0);
        let eci = geodetic_to_eci(&overhead, epoch, &ell).unwrap();
        let aer = eci_to_aer(&eci, epoch, &site, &ell).unwrap();
        assert!((aer.el_deg - 90.0).abs() < 1e-6, "el = {}", aer.el_deg);
        assert!((aer.range_m - 400_000.0).abs() < 1e-3);
    }
}
