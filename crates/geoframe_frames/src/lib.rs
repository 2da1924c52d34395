//! Coordinate frame conversions for geospatial and orbital work.
//!
//! Provides conversions between geodetic (lat/lon/alt), Earth-fixed
//! (ECEF), Earth-centered inertial (ECI) and local tangent-plane
//! (ENU, AER) coordinates on a named reference ellipsoid.
//!
//! Every conversion is a pure function of its inputs. Angles are in
//! degrees, distances in meters, epochs come from [`geoframe_time`].

pub mod angle;
pub mod coords;
pub mod ellipsoid;
pub mod error;
pub mod geodetic;
pub mod inertial;
pub mod local;
pub mod rotation;

pub use angle::{normalize_deg_180, normalize_deg_360};
pub use coords::{Aer, Ecef, Eci, Enu, Geodetic};
pub use ellipsoid::Ellipsoid;
pub use error::FrameError;
pub use geodetic::{
    InversionConfig, MAX_ITERATION_CAP, ecef_to_geodetic, ecef_to_geodetic_with,
    geodetic_to_ecef,
};
pub use inertial::{
    aer_to_eci, ecef_to_eci, ecef_to_eci_at, eci_to_aer, eci_to_ecef, eci_to_ecef_at,
    eci_to_ecef_matrix, eci_to_enu, eci_to_geodetic, enu_to_eci, geodetic_to_eci,
};
pub use local::{
    aer_to_ecef, aer_to_enu, aer_to_geodetic, ecef_to_aer, ecef_to_enu, enu_to_aer, enu_to_ecef,
    enu_to_geodetic, geodetic_to_aer, geodetic_to_enu,
};
pub use rotation::Matrix3;

pub use geoframe_time::Epoch;
