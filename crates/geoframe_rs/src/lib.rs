//! Typed convenience layer over `geoframe_frames`.
//!
//! Wraps the free conversion functions in a [`Converter`] that knows its
//! ellipsoid, local reference point and epoch, so any supported frame can
//! be converted to any other in one call.
//!
//! # Quick start
//!
//! ```rust
//! use geoframe_rs::*;
//!
//! let conv = Converter::with_datum("wgs84")
//!     .unwrap()
//!     .reference(Geodetic::new(37.0, -122.0, 0.0));
//!
//! let ecef = Position::Ecef(Ecef::new(-2_700_226.9, -4_292_413.9, 3_855_273.8));
//! let aer = conv.convert(&ecef, FrameKind::Aer).unwrap();
//! println!("{aer}");
//! ```

pub mod convert;
pub mod error;
pub mod site;

pub use convert::{Converter, FrameKind, Position};
pub use error::GeoframeError;
pub use site::Site;

// Re-export value types so callers only need `use geoframe_rs::*`.
pub use geoframe_frames::{Aer, Ecef, Eci, Ellipsoid, Enu, Geodetic, InversionConfig};
pub use geoframe_time::{Epoch, UtcTime};
