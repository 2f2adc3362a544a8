pub mod affine_2d;
pub mod bezier;
pub mod cyclic;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 2x2 matrix, the linear part of a planar affine map.
pub type Matrix2 = nalgebra::Matrix2<f64>;

/// 3x3 matrix.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Linearly interpolates between two points: `(1 - t) * a + t * b`.
#[must_use]
pub fn lerp_point(a: &Point3, b: &Point3, t: f64) -> Point3 {
    let s = 1.0 - t;
    Point3::new(s * a.x + t * b.x, s * a.y + t * b.y, s * a.z + t * b.z)
}
