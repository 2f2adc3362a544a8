//! Planar affine maps: landmark solving, decomposition and interpolation.

use super::{Matrix2, Matrix3, Point2, Point3, Vector2, Vector3, TOLERANCE};
use crate::error::{GeometryError, Result};

/// An affine map of the XY plane, `p ↦ linear * p + translation`.
///
/// Applied to a [`Point3`] the map acts on `x`/`y` and leaves `z` untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine2 {
    pub linear: Matrix2,
    pub translation: Vector2,
}

impl Affine2 {
    /// The identity map.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            linear: Matrix2::identity(),
            translation: Vector2::zeros(),
        }
    }

    /// Solves the unique affine map sending each `source[i]` to `target[i]`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the source landmarks are collinear.
    pub fn from_three_pairs(source: &[Point2; 3], target: &[Point2; 3]) -> Result<Self> {
        #[rustfmt::skip]
        let system = Matrix3::new(
            source[0].x, source[0].y, 1.0,
            source[1].x, source[1].y, 1.0,
            source[2].x, source[2].y, 1.0,
        );
        if system.determinant().abs() < TOLERANCE {
            let reason = "affine landmarks are collinear";
            return Err(GeometryError::Degenerate(reason.into()).into());
        }
        let inverse = system.try_inverse().ok_or_else(|| {
            GeometryError::Degenerate("affine landmark system is singular".into())
        })?;
        let row_x = inverse * Vector3::new(target[0].x, target[1].x, target[2].x);
        let row_y = inverse * Vector3::new(target[0].y, target[1].y, target[2].y);
        Ok(Self {
            linear: Matrix2::new(row_x.x, row_x.y, row_y.x, row_y.y),
            translation: Vector2::new(row_x.z, row_y.z),
        })
    }

    /// Solves the similarity (rotation, uniform scale, translation) sending
    /// `source[i]` to `target[i]`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the two source landmarks coincide.
    pub fn similarity_from_two_pairs(source: &[Point2; 2], target: &[Point2; 2]) -> Result<Self> {
        let ds = source[1] - source[0];
        let dd = target[1] - target[0];
        let denominator = ds.norm_squared();
        if denominator < TOLERANCE {
            return Err(
                GeometryError::Degenerate("similarity landmarks coincide".into()).into(),
            );
        }
        // Complex division dd / ds.
        let re = (dd.x * ds.x + dd.y * ds.y) / denominator;
        let im = (dd.y * ds.x - dd.x * ds.y) / denominator;
        let linear = Matrix2::new(re, -im, im, re);
        let translation = target[0].coords - linear * source[0].coords;
        Ok(Self {
            linear,
            translation,
        })
    }

    /// Applies the map to the XY components of a point.
    #[must_use]
    pub fn apply(&self, point: &Point3) -> Point3 {
        let xy = self.linear * Vector2::new(point.x, point.y) + self.translation;
        Point3::new(xy.x, xy.y, point.z)
    }

    /// Applies the map to a planar point.
    #[must_use]
    pub fn apply_2d(&self, point: &Point2) -> Point2 {
        Point2::from(self.linear * point.coords + self.translation)
    }
}

/// An affine map split into independently interpolable parts around a pivot.
///
/// The linear part is factored as `R(angle) * [[scale_x, shear], [0, scale_y]]`,
/// and the translation is expressed as the displacement of the pivot. Blending
/// the angle rather than raw matrix entries keeps intermediate maps free of
/// the shrink-and-shear that element-wise interpolation of a rotation causes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineDecomposition {
    pub pivot: Point2,
    pub angle: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub shear: f64,
    pub displacement: Vector2,
}

impl AffineDecomposition {
    /// Decomposes `map` about `pivot`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the map collapses the x axis.
    pub fn new(map: &Affine2, pivot: Point2) -> Result<Self> {
        let m = &map.linear;
        let scale_x = m[(0, 0)].hypot(m[(1, 0)]);
        if scale_x < TOLERANCE {
            let reason = "affine map has zero scale";
            return Err(GeometryError::Degenerate(reason.into()).into());
        }
        let angle = m[(1, 0)].atan2(m[(0, 0)]);
        let (sin, cos) = angle.sin_cos();
        let shear = cos * m[(0, 1)] + sin * m[(1, 1)];
        let scale_y = -sin * m[(0, 1)] + cos * m[(1, 1)];
        Ok(Self {
            pivot,
            angle,
            scale_x,
            scale_y,
            shear,
            displacement: map.apply_2d(&pivot) - pivot,
        })
    }

    /// Returns the map at fraction `t` of the way from the identity (`t = 0`)
    /// to the decomposed map (`t = 1`).
    #[must_use]
    pub fn at(&self, t: f64) -> Affine2 {
        let (sin, cos) = (self.angle * t).sin_cos();
        let rotation = Matrix2::new(cos, -sin, sin, cos);
        let upper = Matrix2::new(
            1.0 + t * (self.scale_x - 1.0),
            t * self.shear,
            0.0,
            1.0 + t * (self.scale_y - 1.0),
        );
        let linear = rotation * upper;
        let moved_pivot = self.pivot.coords + self.displacement * t;
        Affine2 {
            linear,
            translation: moved_pivot - linear * self.pivot.coords,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::*;

    fn p2(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn three_pairs_recover_translation() {
        let src = [p2(0.0, 0.0), p2(1.0, 0.0), p2(0.0, 1.0)];
        let dst = [p2(2.0, 3.0), p2(3.0, 3.0), p2(2.0, 4.0)];
        let map = Affine2::from_three_pairs(&src, &dst).unwrap();
        assert_relative_eq!(map.linear, Matrix2::identity(), epsilon = 1e-12);
        assert_relative_eq!(map.translation, Vector2::new(2.0, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn three_pairs_recover_general_map() {
        let linear = Matrix2::new(2.0, 0.5, -1.0, 1.5);
        let translation = Vector2::new(-1.0, 4.0);
        let truth = Affine2 {
            linear,
            translation,
        };
        let src = [p2(1.0, 2.0), p2(-3.0, 0.5), p2(4.0, -2.0)];
        let dst = src.map(|s| truth.apply_2d(&s));
        let map = Affine2::from_three_pairs(&src, &dst).unwrap();
        assert_relative_eq!(map.linear, linear, epsilon = 1e-9);
        assert_relative_eq!(map.translation, translation, epsilon = 1e-9);
    }

    #[test]
    fn collinear_landmarks_are_degenerate() {
        let src = [p2(0.0, 0.0), p2(1.0, 1.0), p2(2.0, 2.0)];
        let dst = [p2(0.0, 0.0), p2(1.0, 0.0), p2(0.0, 1.0)];
        assert!(Affine2::from_three_pairs(&src, &dst).is_err());
    }

    #[test]
    fn similarity_quarter_turn() {
        let src = [p2(0.0, 0.0), p2(1.0, 0.0)];
        let dst = [p2(0.0, 0.0), p2(0.0, 2.0)];
        let map = Affine2::similarity_from_two_pairs(&src, &dst).unwrap();
        assert_relative_eq!(map.apply_2d(&p2(1.0, 1.0)), p2(-2.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn similarity_coincident_landmarks_fail() {
        let src = [p2(1.0, 1.0), p2(1.0, 1.0)];
        let dst = [p2(0.0, 0.0), p2(0.0, 2.0)];
        assert!(Affine2::similarity_from_two_pairs(&src, &dst).is_err());
    }

    #[test]
    fn decomposition_endpoints() {
        let map = Affine2 {
            linear: Matrix2::new(0.0, -2.0, 1.0, 0.5),
            translation: Vector2::new(3.0, -1.0),
        };
        let parts = AffineDecomposition::new(&map, p2(1.0, 1.0)).unwrap();
        let start = parts.at(0.0);
        assert_relative_eq!(start.linear, Matrix2::identity(), epsilon = 1e-12);
        assert_relative_eq!(start.translation, Vector2::zeros(), epsilon = 1e-12);
        let end = parts.at(1.0);
        assert_relative_eq!(end.linear, map.linear, epsilon = 1e-12);
        assert_relative_eq!(end.translation, map.translation, epsilon = 1e-12);
    }

    #[test]
    fn rotation_is_interpolated_by_angle() {
        let rotation = Affine2 {
            linear: Matrix2::new(0.0, -1.0, 1.0, 0.0),
            translation: Vector2::zeros(),
        };
        let parts = AffineDecomposition::new(&rotation, p2(0.0, 0.0)).unwrap();
        assert_relative_eq!(parts.angle, FRAC_PI_2, epsilon = 1e-12);
        let half = parts.at(0.5);
        let moved = half.apply_2d(&p2(1.0, 0.0));
        // A raw matrix lerp would shrink this point to length sqrt(0.5).
        assert_relative_eq!(moved.coords.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(moved.y.atan2(moved.x), FRAC_PI_2 / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn apply_keeps_z() {
        let map = Affine2 {
            linear: Matrix2::identity(),
            translation: Vector2::new(1.0, 1.0),
        };
        let moved = map.apply(&Point3::new(0.0, 0.0, 7.0));
        assert_relative_eq!(moved, Point3::new(1.0, 1.0, 7.0));
    }
}
