//! Cubic Bezier utilities.
//!
//! A cubic is stored as its control polygon `[p0, c1, c2, p3]`.

use super::{lerp_point, Point3};

/// Control polygon of a cubic Bezier segment.
pub type Cubic = [Point3; 4];

/// Returns the control polygon of a straight segment from `p0` to `p3`.
///
/// Handles sit at the thirds of the chord, which keeps the curve straight
/// and its parameterisation uniform.
#[must_use]
pub fn straight_cubic(p0: &Point3, p3: &Point3) -> Cubic {
    [
        *p0,
        lerp_point(p0, p3, 1.0 / 3.0),
        lerp_point(p0, p3, 2.0 / 3.0),
        *p3,
    ]
}

/// Evaluates the cubic at parameter `t` (De Casteljau).
#[must_use]
pub fn evaluate(cubic: &Cubic, t: f64) -> Point3 {
    let (left, _) = split(cubic, t);
    left[3]
}

/// Splits the cubic at parameter `t` into two cubics with De Casteljau's algorithm.
///
/// The union of the two halves traces exactly the same curve as the input.
#[must_use]
pub fn split(cubic: &Cubic, t: f64) -> (Cubic, Cubic) {
    let [p0, p1, p2, p3] = cubic;
    let p01 = lerp_point(p0, p1, t);
    let p12 = lerp_point(p1, p2, t);
    let p23 = lerp_point(p2, p3, t);
    let p012 = lerp_point(&p01, &p12, t);
    let p123 = lerp_point(&p12, &p23, t);
    let mid = lerp_point(&p012, &p123, t);
    ([*p0, p01, p012, mid], [mid, p123, p23, *p3])
}

/// Splits the cubic into `pieces` sub-curves of equal parameter length.
///
/// Returns the input unchanged (as a single piece) when `pieces <= 1`.
#[must_use]
pub fn subdivide_uniform(cubic: &Cubic, pieces: usize) -> Vec<Cubic> {
    if pieces <= 1 {
        return vec![*cubic];
    }
    let mut out = Vec::with_capacity(pieces);
    let mut rest = *cubic;
    for k in 0..pieces - 1 {
        #[allow(clippy::cast_precision_loss)]
        let t = 1.0 / (pieces - k) as f64;
        let (left, right) = split(&rest, t);
        out.push(left);
        rest = right;
    }
    out.push(rest);
    out
}
