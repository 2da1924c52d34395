//! 3×3 rotation helpers.
//!
//! Matrices are row-major `[[f64; 3]; 3]` and act on column vectors.

/// Row-major 3×3 matrix.
pub type Matrix3 = [[f64; 3]; 3];

/// Frame rotation by `angle_rad` about +Z (R3).
///
/// Rotates the coordinate axes, not the vector: a point fixed in space
/// appears to turn by `-angle_rad` in the new frame.
pub fn rotation_z(angle_rad: f64) -> Matrix3 {
    let (s, c) = angle_rad.sin_cos();
    [[c, s, 0.0], [-s, c, 0.0], [0.0, 0.0, 1.0]]
}

/// ECEF → ENU rotation at a reference latitude/longitude (radians).
///
/// Rows are the local east, north and up unit vectors in ECEF.
pub fn ecef_to_enu_matrix(lat_rad: f64, lon_rad: f64) -> Matrix3 {
    let (sin_lat, cos_lat) = lat_rad.sin_cos();
    let (sin_lon, cos_lon) = lon_rad.sin_cos();
    [
        [-sin_lon, cos_lon, 0.0],
        [-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat],
        [cos_lat * cos_lon, cos_lat * sin_lon, sin_lat],
    ]
}

pub fn transpose(m: &Matrix3) -> Matrix3 {
    [
        [m[0][0], m[1][0], m[2][0]],
        [m[0][1], m[1][1], m[2][1]],
        [m[0][2], m[1][2], m[2][2]],
    ]
}

/// Matrix × column vector.
pub fn mat_vec(m: &Matrix3, v: &[f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}
