use super::{Point3, TOLERANCE};

/// Computes the signed area of a polygon in the XY plane (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point3]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns the rotational sense of a polygon: `1` for counter-clockwise,
/// `-1` for clockwise, `0` when the signed area vanishes (e.g. collinear points).
#[must_use]
pub fn orientation_2d(points: &[Point3]) -> i8 {
    let area = signed_area_2d(points);
    if area > TOLERANCE {
        1
    } else if area < -TOLERANCE {
        -1
    } else {
        0
    }
}

/// Arithmetic mean of the points, or `None` for an empty slice.
#[must_use]
pub fn centroid(points: &[Point3]) -> Option<Point3> {
    if points.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let inv_n = 1.0 / points.len() as f64;
    Some(Point3::new(
        points.iter().map(|p| p.x).sum::<f64>() * inv_n,
        points.iter().map(|p| p.y).sum::<f64>() * inv_n,
        points.iter().map(|p| p.z).sum::<f64>() * inv_n,
    ))
}
