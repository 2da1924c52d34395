//! C-facing adapter for the geoframe conversion functions.
//!
//! Every export returns a [`GeoframeStatus`] and writes its result through
//! an out-pointer. Datums are passed as NUL-terminated UTF-8 names and
//! matched case-insensitively.

use std::ffi::{CStr, c_char};

use geoframe_frames::{
    Aer, Ecef, Eci, Ellipsoid, Enu, FrameError, Geodetic, InversionConfig, aer_to_ecef,
    aer_to_enu, ecef_to_aer, ecef_to_eci, ecef_to_enu, ecef_to_geodetic_with, eci_to_ecef,
    enu_to_aer, enu_to_ecef, geodetic_to_ecef,
};
use geoframe_time::{Epoch, TimeError};

/// ABI version for downstream bindings.
pub const GEOFRAME_API_VERSION: u32 = 1;

/// C-facing status codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoframeStatus {
    Ok = 0,
    DomainError = 1,
    UnknownDatum = 2,
    ConvergenceFailure = 3,
    InvalidEpoch = 4,
    InvalidConfig = 5,
    NullPointer = 6,
    InvalidUtf8 = 7,
    Internal = 255,
}

impl From<&FrameError> for GeoframeStatus {
    fn from(value: &FrameError) -> Self {
        match value {
            FrameError::Domain { .. } => Self::DomainError,
            FrameError::UnknownDatum(_) => Self::UnknownDatum,
            FrameError::ConvergenceFailure { .. } => Self::ConvergenceFailure,
            FrameError::InvalidEpoch(_) => Self::InvalidEpoch,
            FrameError::InvalidConfig(_) => Self::InvalidConfig,
            _ => Self::Internal,
        }
    }
}

impl From<&TimeError> for GeoframeStatus {
    fn from(_: &TimeError) -> Self {
        Self::InvalidEpoch
    }
}

/// Azimuth/elevation/slant range.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoframeAer {
    /// Azimuth in degrees, clockwise from north, [0, 360).
    pub az_deg: f64,
    /// Elevation in degrees, [-90, 90].
    pub el_deg: f64,
    /// Slant range in meters.
    pub srange_m: f64,
}

impl From<Aer> for GeoframeAer {
    fn from(value: Aer) -> Self {
        Self {
            az_deg: value.az_deg,
            el_deg: value.el_deg,
            srange_m: value.range_m,
        }
    }
}

/// East/north/up offsets in meters.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoframeEnu {
    pub east_m: f64,
    pub north_m: f64,
    pub up_m: f64,
}

impl From<Enu> for GeoframeEnu {
    fn from(value: Enu) -> Self {
        Self {
            east_m: value.east_m,
            north_m: value.north_m,
            up_m: value.up_m,
        }
    }
}

/// Cartesian position in meters, ECEF or ECI depending on the call.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoframeXyz {
    pub x_m: f64,
    pub y_m: f64,
    pub z_m: f64,
}

impl From<Ecef> for GeoframeXyz {
    fn from(value: Ecef) -> Self {
        Self {
            x_m: value.x_m,
            y_m: value.y_m,
            z_m: value.z_m,
        }
    }
}

impl From<Eci> for GeoframeXyz {
    fn from(value: Eci) -> Self {
        Self {
            x_m: value.x_m,
            y_m: value.y_m,
            z_m: value.z_m,
        }
    }
}

/// Geodetic latitude/longitude in degrees, height in meters.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoframeGeodetic {
    pub lat_deg: f64,
    pub lon_deg: f64,
    pub alt_m: f64,
}

impl From<Geodetic> for GeoframeGeodetic {
    fn from(value: Geodetic) -> Self {
        Self {
            lat_deg: value.lat_deg,
            lon_deg: value.lon_deg,
            alt_m: value.alt_m,
        }
    }
}

/// C-compatible tuning for the ECEF → geodetic inversion.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoframeInversionConfig {
    pub tolerance_rad: f64,
    pub max_iterations: u32,
}

impl From<GeoframeInversionConfig> for InversionConfig {
    fn from(value: GeoframeInversionConfig) -> Self {
        Self {
            tolerance_rad: value.tolerance_rad,
            max_iterations: value.max_iterations,
        }
    }
}

impl From<InversionConfig> for GeoframeInversionConfig {
    fn from(value: InversionConfig) -> Self {
        Self {
            tolerance_rad: value.tolerance_rad,
            max_iterations: value.max_iterations,
        }
    }
}

fn status<E>(err: E) -> GeoframeStatus
where
    for<'a> GeoframeStatus: From<&'a E>,
{
    GeoframeStatus::from(&err)
}

fn lookup_datum(datum: &str) -> Result<Ellipsoid, GeoframeStatus> {
    Ellipsoid::lookup(datum).map_err(status)
}

pub fn geoframe_enu_to_aer_internal(enu: &Enu) -> Result<GeoframeAer, GeoframeStatus> {
    enu_to_aer(enu).map(GeoframeAer::from).map_err(status)
}

pub fn geoframe_aer_to_enu_internal(aer: &Aer) -> Result<GeoframeEnu, GeoframeStatus> {
    aer_to_enu(aer).map(GeoframeEnu::from).map_err(status)
}

pub fn geoframe_aer_to_ecef_internal(
    aer: &Aer,
    reference: &Geodetic,
    datum: &str,
) -> Result<GeoframeXyz, GeoframeStatus> {
    let ell = lookup_datum(datum)?;
    aer_to_ecef(aer, reference, &ell)
        .map(GeoframeXyz::from)
        .map_err(status)
}

pub fn geoframe_ecef_to_aer_internal(
    ecef: &Ecef,
    reference: &Geodetic,
    datum: &str,
) -> Result<GeoframeAer, GeoframeStatus> {
    let ell = lookup_datum(datum)?;
    ecef_to_aer(ecef, reference, &ell)
        .map(GeoframeAer::from)
        .map_err(status)
}

pub fn geoframe_geodetic_to_ecef_internal(
    point: &Geodetic,
    datum: &str,
) -> Result<GeoframeXyz, GeoframeStatus> {
    let ell = lookup_datum(datum)?;
    geodetic_to_ecef(point, &ell)
        .map(GeoframeXyz::from)
        .map_err(status)
}

pub fn geoframe_ecef_to_geodetic_internal(
    ecef: &Ecef,
    datum: &str,
    config: &InversionConfig,
) -> Result<GeoframeGeodetic, GeoframeStatus> {
    let ell = lookup_datum(datum)?;
    ecef_to_geodetic_with(ecef, &ell, config)
        .map(GeoframeGeodetic::from)
        .map_err(status)
}

pub fn geoframe_ecef_to_enu_internal(
    ecef: &Ecef,
    reference: &Geodetic,
    datum: &str,
) -> Result<GeoframeEnu, GeoframeStatus> {
    let ell = lookup_datum(datum)?;
    ecef_to_enu(ecef, reference, &ell)
        .map(GeoframeEnu::from)
        .map_err(status)
}

pub fn geoframe_enu_to_ecef_internal(
    enu: &Enu,
    reference: &Geodetic,
    datum: &str,
) -> Result<GeoframeXyz, GeoframeStatus> {
    let ell = lookup_datum(datum)?;
    enu_to_ecef(enu, reference, &ell)
        .map(GeoframeXyz::from)
        .map_err(status)
}

pub fn geoframe_julian_date_internal(unix_seconds: f64) -> Result<f64, GeoframeStatus> {
    geoframe_time::julian_date(unix_seconds).map_err(status)
}

/// GST in degrees; the Julian date must lie in the supported epoch range.
pub fn geoframe_greenwich_sidereal_time_internal(jd: f64) -> Result<f64, GeoframeStatus> {
    Epoch::from_jd(jd).map(Epoch::gst_deg).map_err(status)
}

pub fn geoframe_eci_to_ecef_internal(
    eci: &Eci,
    unix_seconds: f64,
) -> Result<GeoframeXyz, GeoframeStatus> {
    let epoch = Epoch::from_unix_seconds(unix_seconds).map_err(status)?;
    Ok(eci_to_ecef(eci, epoch).into())
}

pub fn geoframe_ecef_to_eci_internal(
    ecef: &Ecef,
    unix_seconds: f64,
) -> Result<GeoframeXyz, GeoframeStatus> {
    let epoch = Epoch::from_unix_seconds(unix_seconds).map_err(status)?;
    Ok(ecef_to_eci(ecef, epoch).into())
}

/// Return ABI version of the exported C API.
#[unsafe(no_mangle)]
pub extern "C" fn geoframe_api_version() -> u32 {
    GEOFRAME_API_VERSION
}

/// Default inversion tuning: 1e-9 rad, 10 iterations.
#[unsafe(no_mangle)]
pub extern "C" fn geoframe_inversion_config_default() -> GeoframeInversionConfig {
    InversionConfig::default().into()
}

/// ENU → AER.
///
/// # Safety
/// `out` must be a valid, non-null pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn geoframe_enu_to_aer(
    e: f64,
    n: f64,
    u: f64,
    out: *mut GeoframeAer,
) -> GeoframeStatus {
    ffi_boundary(|| {
        if out.is_null() {
            return GeoframeStatus::NullPointer;
        }
        match geoframe_enu_to_aer_internal(&Enu::new(e, n, u)) {
            Ok(aer) => {
                // SAFETY: Pointer is checked for null and written once.
                unsafe { *out = aer };
                GeoframeStatus::Ok
            }
            Err(status) => status,
        }
    })
}

/// AER → ENU. A zero slant range yields a zero vector.
///
/// # Safety
/// `out` must be a valid, non-null pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn geoframe_aer_to_enu(
    az_deg: f64,
    el_deg: f64,
    srange_m: f64,
    out: *mut GeoframeEnu,
) -> GeoframeStatus {
    ffi_boundary(|| {
        if out.is_null() {
            return GeoframeStatus::NullPointer;
        }
        match geoframe_aer_to_enu_internal(&Aer::new(az_deg, el_deg, srange_m)) {
            Ok(enu) => {
                // SAFETY: Pointer is checked for null and written once.
                unsafe { *out = enu };
                GeoframeStatus::Ok
            }
            Err(status) => status,
        }
    })
}

/// AER seen from (`lat0`, `lon0`, `h0`) → ECEF.
///
/// # Safety
/// `datum_utf8` must be a valid, non-null, NUL-terminated C string.
/// `out` must be a valid, non-null pointer.
#[allow(clippy::too_many_arguments)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn geoframe_aer_to_ecef(
    az_deg: f64,
    el_deg: f64,
    srange_m: f64,
    lat0_deg: f64,
    lon0_deg: f64,
    h0_m: f64,
    datum_utf8: *const u8,
    out: *mut GeoframeXyz,
) -> GeoframeStatus {
    ffi_boundary(|| {
        if datum_utf8.is_null() || out.is_null() {
            return GeoframeStatus::NullPointer;
        }
        // SAFETY: Pointer is checked for null; read until NUL byte.
        let datum = match unsafe { decode_c_utf8(datum_utf8) } {
            Ok(s) => s,
            Err(status) => return status,
        };
        let reference = Geodetic::new(lat0_deg, lon0_deg, h0_m);
        match geoframe_aer_to_ecef_internal(&Aer::new(az_deg, el_deg, srange_m), &reference, datum)
        {
            Ok(xyz) => {
                // SAFETY: Pointer is checked for null and written once.
                unsafe { *out = xyz };
                GeoframeStatus::Ok
            }
            Err(status) => status,
        }
    })
}

/// ECEF → AER seen from (`lat0`, `lon0`, `h0`).
///
/// # Safety
/// `datum_utf8` must be a valid, non-null, NUL-terminated C string.
/// `out` must be a valid, non-null pointer.
#[allow(clippy::too_many_arguments)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn geoframe_ecef_to_aer(
    x_m: f64,
    y_m: f64,
    z_m: f64,
    lat0_deg: f64,
    lon0_deg: f64,
    h0_m: f64,
    datum_utf8: *const u8,
    out: *mut GeoframeAer,
) -> GeoframeStatus {
    ffi_boundary(|| {
        if datum_utf8.is_null() || out.is_null() {
            return GeoframeStatus::NullPointer;
        }
        // SAFETY: Pointer is checked for null; read until NUL byte.
        let datum = match unsafe { decode_c_utf8(datum_utf8) } {
            Ok(s) => s,
            Err(status) => return status,
        };
        let reference = Geodetic::new(lat0_deg, lon0_deg, h0_m);
        match geoframe_ecef_to_aer_internal(&Ecef::new(x_m, y_m, z_m), &reference, datum) {
            Ok(aer) => {
                // SAFETY: Pointer is checked for null and written once.
                unsafe { *out = aer };
                GeoframeStatus::Ok
            }
            Err(status) => status,
        }
    })
}

/// Geodetic → ECEF.
///
/// # Safety
/// `datum_utf8` must be a valid, non-null, NUL-terminated C string.
/// `out` must be a valid, non-null pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn geoframe_geodetic_to_ecef(
    lat_deg: f64,
    lon_deg: f64,
    alt_m: f64,
    datum_utf8: *const u8,
    out: *mut GeoframeXyz,
) -> GeoframeStatus {
    ffi_boundary(|| {
        if datum_utf8.is_null() || out.is_null() {
            return GeoframeStatus::NullPointer;
        }
        // SAFETY: Pointer is checked for null; read until NUL byte.
        let datum = match unsafe { decode_c_utf8(datum_utf8) } {
            Ok(s) => s,
            Err(status) => return status,
        };
        match geoframe_geodetic_to_ecef_internal(&Geodetic::new(lat_deg, lon_deg, alt_m), datum) {
            Ok(xyz) => {
                // SAFETY: Pointer is checked for null and written once.
                unsafe { *out = xyz };
                GeoframeStatus::Ok
            }
            Err(status) => status,
        }
    })
}

/// ECEF → geodetic with the default inversion tuning.
///
/// # Safety
/// `datum_utf8` must be a valid, non-null, NUL-terminated C string.
/// `out` must be a valid, non-null pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn geoframe_ecef_to_geodetic(
    x_m: f64,
    y_m: f64,
    z_m: f64,
    datum_utf8: *const u8,
    out: *mut GeoframeGeodetic,
) -> GeoframeStatus {
    let config = geoframe_inversion_config_default();
    // SAFETY: Caller upholds the pointer contract; `config` is a live local.
    unsafe { geoframe_ecef_to_geodetic_with(x_m, y_m, z_m, datum_utf8, &config, out) }
}

/// ECEF → geodetic with caller-supplied inversion tuning.
///
/// # Safety
/// `datum_utf8` must be a valid, non-null, NUL-terminated C string.
/// `config` and `out` must be valid, non-null pointers.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn geoframe_ecef_to_geodetic_with(
    x_m: f64,
    y_m: f64,
    z_m: f64,
    datum_utf8: *const u8,
    config: *const GeoframeInversionConfig,
    out: *mut GeoframeGeodetic,
) -> GeoframeStatus {
    ffi_boundary(|| {
        if datum_utf8.is_null() || config.is_null() || out.is_null() {
            return GeoframeStatus::NullPointer;
        }
        // SAFETY: Pointer is checked for null; read until NUL byte.
        let datum = match unsafe { decode_c_utf8(datum_utf8) } {
            Ok(s) => s,
            Err(status) => return status,
        };
        // SAFETY: Pointer is checked for null and copied by value.
        let config = InversionConfig::from(unsafe { *config });
        match geoframe_ecef_to_geodetic_internal(&Ecef::new(x_m, y_m, z_m), datum, &config) {
            Ok(g) => {
                // SAFETY: Pointer is checked for null and written once.
                unsafe { *out = g };
                GeoframeStatus::Ok
            }
            Err(status) => status,
        }
    })
}

/// ECEF → ENU relative to (`lat0`, `lon0`, `h0`).
///
/// # Safety
/// `datum_utf8` must be a valid, non-null, NUL-terminated C string.
/// `out` must be a valid, non-null pointer.
#[allow(clippy::too_many_arguments)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn geoframe_ecef_to_enu(
    x_m: f64,
    y_m: f64,
    z_m: f64,
    lat0_deg: f64,
    lon0_deg: f64,
    h0_m: f64,
    datum_utf8: *const u8,
    out: *mut GeoframeEnu,
) -> GeoframeStatus {
    ffi_boundary(|| {
        if datum_utf8.is_null() || out.is_null() {
            return GeoframeStatus::NullPointer;
        }
        // SAFETY: Pointer is checked for null; read until NUL byte.
        let datum = match unsafe { decode_c_utf8(datum_utf8) } {
            Ok(s) => s,
            Err(status) => return status,
        };
        let reference = Geodetic::new(lat0_deg, lon0_deg, h0_m);
        match geoframe_ecef_to_enu_internal(&Ecef::new(x_m, y_m, z_m), &reference, datum) {
            Ok(enu) => {
                // SAFETY: Pointer is checked for null and written once.
                unsafe { *out = enu };
                GeoframeStatus::Ok
            }
            Err(status) => status,
        }
    })
}

/// ENU relative to (`lat0`, `lon0`, `h0`) → ECEF.
///
/// # Safety
/// `datum_utf8` must be a valid, non-null, NUL-terminated C string.
/// `out` must be a valid, non-null pointer.
#[allow(clippy::too_many_arguments)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn geoframe_enu_to_ecef(
    e_m: f64,
    n_m: f64,
    u_m: f64,
    lat0_deg: f64,
    lon0_deg: f64,
    h0_m: f64,
    datum_utf8: *const u8,
    out: *mut GeoframeXyz,
) -> GeoframeStatus {
    ffi_boundary(|| {
        if datum_utf8.is_null() || out.is_null() {
            return GeoframeStatus::NullPointer;
        }
        // SAFETY: Pointer is checked for null; read until NUL byte.
        let datum = match unsafe { decode_c_utf8(datum_utf8) } {
            Ok(s) => s,
            Err(status) => return status,
        };
        let reference = Geodetic::new(lat0_deg, lon0_deg, h0_m);
        match geoframe_enu_to_ecef_internal(&Enu::new(e_m, n_m, u_m), &reference, datum) {
            Ok(xyz) => {
                // SAFETY: Pointer is checked for null and written once.
                unsafe { *out = xyz };
                GeoframeStatus::Ok
            }
            Err(status) => status,
        }
    })
}

/// Julian Date for a Unix timestamp.
///
/// # Safety
/// `out_jd` must be a valid, non-null pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn geoframe_julian_date(unix_seconds: f64, out_jd: *mut f64) -> GeoframeStatus {
    ffi_boundary(|| {
        if out_jd.is_null() {
            return GeoframeStatus::NullPointer;
        }
        match geoframe_julian_date_internal(unix_seconds) {
            Ok(jd) => {
                // SAFETY: Pointer is checked for null and written once.
                unsafe { *out_jd = jd };
                GeoframeStatus::Ok
            }
            Err(status) => status,
        }
    })
}

/// Greenwich Mean Sidereal Time in degrees, [0, 360).
///
/// # Safety
/// `out_deg` must be a valid, non-null pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn geoframe_greenwich_sidereal_time(
    jd: f64,
    out_deg: *mut f64,
) -> GeoframeStatus {
    ffi_boundary(|| {
        if out_deg.is_null() {
            return GeoframeStatus::NullPointer;
        }
        match geoframe_greenwich_sidereal_time_internal(jd) {
            Ok(deg) => {
                // SAFETY: Pointer is checked for null and written once.
                unsafe { *out_deg = deg };
                GeoframeStatus::Ok
            }
            Err(status) => status,
        }
    })
}

/// ECI → ECEF at a Unix timestamp.
///
/// # Safety
/// `out` must be a valid, non-null pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn geoframe_eci_to_ecef(
    x_m: f64,
    y_m: f64,
    z_m: f64,
    unix_seconds: f64,
    out: *mut GeoframeXyz,
) -> GeoframeStatus {
    ffi_boundary(|| {
        if out.is_null() {
            return GeoframeStatus::NullPointer;
        }
        match geoframe_eci_to_ecef_internal(&Eci::new(x_m, y_m, z_m), unix_seconds) {
            Ok(xyz) => {
                // SAFETY: Pointer is checked for null and written once.
                unsafe { *out = xyz };
                GeoframeStatus::Ok
            }
            Err(status) => status,
        }
    })
}

/// ECEF → ECI at a Unix timestamp.
///
/// # Safety
/// `out` must be a valid, non-null pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn geoframe_ecef_to_eci(
    x_m: f64,
    y_m: f64,
    z_m: f64,
    unix_seconds: f64,
    out: *mut GeoframeXyz,
) -> GeoframeStatus {
    ffi_boundary(|| {
        if out.is_null() {
            return GeoframeStatus::NullPointer;
        }
        match geoframe_ecef_to_eci_internal(&Ecef::new(x_m, y_m, z_m), unix_seconds) {
            Ok(xyz) => {
                // SAFETY: Pointer is checked for null and written once.
                unsafe { *out = xyz };
                GeoframeStatus::Ok
            }
            Err(status) => status,
        }
    })
}

fn ffi_boundary(f: impl FnOnce() -> GeoframeStatus) -> GeoframeStatus {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
        Ok(status) => status,
        Err(_) => GeoframeStatus::Internal,
    }
}

/// Borrow a NUL-terminated UTF-8 string.
///
/// # Safety
/// `ptr` must be non-null and point to a NUL-terminated buffer that
/// outlives the returned slice.
unsafe fn decode_c_utf8<'a>(ptr: *const u8) -> Result<&'a str, GeoframeStatus> {
    // SAFETY: Upheld by the caller.
    let c_str = unsafe { CStr::from_ptr(ptr.cast::<c_char>()) };
    c_str.to_str().map_err(|_| GeoframeStatus::InvalidUtf8)
}
