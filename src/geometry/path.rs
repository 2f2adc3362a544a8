use std::f64::consts::TAU;
use std::ops::{Index, IndexMut};

use super::point::{PathPoint, PointKind};
use crate::math::bezier::{straight_cubic, Cubic};
use crate::math::cyclic::cyclic_index;
use crate::math::polygon_2d::{centroid, signed_area_2d};
use crate::math::{Point3, Vector3, TOLERANCE};

/// Handle length of a quarter-circle cubic, as a fraction of the radius.
const CIRCLE_KAPPA: f64 = 0.552_284_749_830_793_4;

/// An ordered, circularly indexed sequence of path points.
///
/// Index arithmetic wraps modulo the length, so `path[len]` is `path[0]`.
/// A path may hold several disjoint components; each component starts at a
/// point whose entering segment is invisible. A path in which every entering
/// segment is visible is a single closed loop (point 0 is entered from the
/// last point).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    points: Vec<PathPoint>,
}

impl Path {
    /// Creates a path from its points.
    #[must_use]
    pub fn new(points: Vec<PathPoint>) -> Self {
        Self { points }
    }

    /// Creates a closed polygon through the given anchors.
    #[must_use]
    pub fn from_polygon(anchors: &[Point3]) -> Self {
        Self::new(anchors.iter().copied().map(PathPoint::vertex).collect())
    }

    /// Creates an open polyline through the given anchors.
    #[must_use]
    pub fn from_polyline(anchors: &[Point3]) -> Self {
        let mut path = Self::from_polygon(anchors);
        if let Some(first) = path.points.first_mut() {
            first.visible = false;
        }
        path
    }

    /// Creates a counter-clockwise regular polygon with its first vertex on the +x axis.
    #[must_use]
    pub fn regular_polygon(center: Point3, radius: f64, sides: usize) -> Self {
        let anchors: Vec<Point3> = (0..sides)
            .map(|k| {
                #[allow(clippy::cast_precision_loss)]
                let angle = TAU * k as f64 / sides as f64;
                center + Vector3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
            })
            .collect();
        Self::from_polygon(&anchors)
    }

    /// Creates a counter-clockwise circle made of four cubic arcs.
    #[must_use]
    pub fn circle(center: Point3, radius: f64) -> Self {
        let points = (0..4)
            .map(|k| {
                let angle = TAU * f64::from(k) / 4.0;
                let (sin, cos) = angle.sin_cos();
                let radial = Vector3::new(cos, sin, 0.0) * radius;
                let tangent = Vector3::new(-sin, cos, 0.0) * (radius * CIRCLE_KAPPA);
                let anchor = center + radial;
                PathPoint::curve(anchor, anchor - tangent, anchor + tangent)
            })
            .collect();
        Self::new(points)
    }

    /// Concatenates several paths into one multi-component path.
    ///
    /// Each part becomes its own component. A closed-loop part is closed
    /// explicitly by a trailing copy of its first point, because inside a
    /// multi-component path the first point's entering segment is a boundary.
    #[must_use]
    pub fn concat(parts: &[Path]) -> Self {
        let mut points = Vec::with_capacity(parts.iter().map(|p| p.len() + 1).sum());
        for part in parts.iter().filter(|p| !p.is_empty()) {
            let start = points.len();
            points.extend_from_slice(&part.points);
            if part.is_closed_loop() && part.len() > 1 {
                points.push(part.points[0]);
            }
            points[start].visible = false;
        }
        Self::new(points)
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the path has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the points as a slice.
    #[must_use]
    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    /// Returns the points as a mutable slice.
    pub fn points_mut(&mut self) -> &mut [PathPoint] {
        &mut self.points
    }

    /// Consumes the path, returning its points.
    #[must_use]
    pub fn into_points(self) -> Vec<PathPoint> {
        self.points
    }

    /// Appends a point.
    pub fn push(&mut self, point: PathPoint) {
        self.points.push(point);
    }

    /// Iterates over the points in order.
    pub fn iter(&self) -> std::slice::Iter<'_, PathPoint> {
        self.points.iter()
    }

    /// Returns the point at a wrapped (possibly negative) index.
    #[must_use]
    pub fn point(&self, index: isize) -> Option<&PathPoint> {
        if self.points.is_empty() {
            return None;
        }
        self.points.get(cyclic_index(index, self.points.len()))
    }

    /// Returns the anchors in order.
    #[must_use]
    pub fn anchors(&self) -> Vec<Point3> {
        self.points.iter().map(|p| p.anchor).collect()
    }

    /// Signed area of the anchors treated as a polygon (XY plane).
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.anchors())
    }

    /// Mean of the anchors, or `None` for an empty path.
    #[must_use]
    pub fn centroid(&self) -> Option<Point3> {
        centroid(&self.anchors())
    }

    /// Returns the cubic control polygon of the segment entering point `index`.
    ///
    /// Returns `None` when the segment is invisible or the path has fewer than
    /// two points. Straight segments get handles at the thirds of the chord.
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<Cubic> {
        let n = self.points.len();
        if n < 2 {
            return None;
        }
        let end = &self.points[index % n];
        if !end.visible {
            return None;
        }
        let start = &self.points[(index + n - 1) % n];
        Some(segment_between(start, end))
    }

    /// Number of connected components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        if self.points.is_empty() {
            return 0;
        }
        1 + self.points[1..].iter().filter(|p| !p.visible).count()
    }

    /// Returns `true` if the path is a single implicitly closed loop.
    #[must_use]
    pub fn is_closed_loop(&self) -> bool {
        !self.points.is_empty() && self.points.iter().all(|p| p.visible)
    }

    /// Returns `true` if the last anchor coincides with the first, i.e. the
    /// path is closed by an explicit trailing copy of its start.
    #[must_use]
    pub fn is_explicitly_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) if self.points.len() > 2 => {
                (first.anchor - last.anchor).norm() < TOLERANCE
            }
            _ => false,
        }
    }

    /// Returns the path traversed in the opposite direction.
    ///
    /// Handles swap roles and each segment keeps its visibility and curvature.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let n = self.points.len();
        let points = (0..n)
            .map(|i| {
                let source = &self.points[n - 1 - i];
                let flags = &self.points[(n - i) % n];
                PathPoint {
                    anchor: source.anchor,
                    handle_in: source.handle_out,
                    handle_out: source.handle_in,
                    visible: flags.visible,
                    curved: flags.curved,
                    kind: source.kind,
                }
            })
            .collect();
        Self::new(points)
    }

    /// Returns a closed path re-indexed to start `offset` points later.
    ///
    /// Works on implicit loops and on explicitly closed paths (whose trailing
    /// copy of the start is rebuilt for the new start). Open paths have no
    /// meaningful rotation and are returned unchanged.
    #[must_use]
    pub fn rotated(&self, offset: usize) -> Self {
        if self.is_closed_loop() {
            let mut out = self.clone();
            let n = out.points.len();
            out.points.rotate_left(offset % n);
            return out;
        }
        if !self.is_explicitly_closed() {
            return self.clone();
        }
        let mut cycle = self.clone();
        cycle.close_loop();
        let n = cycle.points.len();
        cycle.points.rotate_left(offset % n);
        cycle.open_loop();
        cycle
    }

    /// Returns a copy with every interpolation point removed.
    #[must_use]
    pub fn without_interpolation_points(&self) -> Self {
        Self::new(
            self.points
                .iter()
                .filter(|p| !p.is_interpolation())
                .copied()
                .collect(),
        )
    }

    /// Returns a copy whose straight segments carry explicit handles at the
    /// thirds of their chords. The drawn shape is unchanged.
    #[must_use]
    pub fn with_explicit_handles(&self) -> Self {
        let mut out = self.clone();
        let n = out.points.len();
        if n < 2 {
            return out;
        }
        for i in 0..n {
            let end = self.points[i];
            if !end.visible || end.curved {
                continue;
            }
            let prev = (i + n - 1) % n;
            let cubic = straight_cubic(&self.points[prev].anchor, &end.anchor);
            out.points[prev].handle_out = cubic[1];
            out.points[i].handle_in = cubic[2];
        }
        out
    }

    /// Marks every segment as curved.
    pub fn mark_curved(&mut self) {
        for point in &mut self.points {
            point.curved = true;
        }
    }

    /// Turns an implicit loop into an open run closed by a trailing copy of
    /// its first point. The copy is an interpolation point that carries the
    /// closing segment.
    pub(crate) fn open_loop(&mut self) {
        let Some(first) = self.points.first_mut() else {
            return;
        };
        let mut closing = *first;
        closing.kind = PointKind::Interpolation;
        first.visible = false;
        self.points.push(closing);
    }

    /// Inverse of [`Path::open_loop`]: drops the trailing copy and moves the
    /// closing segment back onto the first point.
    pub(crate) fn close_loop(&mut self) {
        if self.points.len() < 2 {
            return;
        }
        let Some(closing) = self.points.pop() else {
            return;
        };
        let first = &mut self.points[0];
        first.visible = true;
        first.curved = closing.curved;
        first.handle_in = closing.handle_in;
        if closing.kind == PointKind::Vertex {
            first.kind = PointKind::Vertex;
        }
    }
}

/// Control polygon of the segment from `start` to `end`.
pub(crate) fn segment_between(start: &PathPoint, end: &PathPoint) -> Cubic {
    if end.curved {
        [start.anchor, start.handle_out, end.handle_in, end.anchor]
    } else {
        straight_cubic(&start.anchor, &end.anchor)
    }
}

/// Interpolates every point of two equal-length paths; flags come from `a`.
///
/// Extra points of the longer path are ignored.
#[must_use]
pub fn lerp_paths(a: &Path, b: &Path, t: f64) -> Path {
    Path::new(
        a.iter()
            .zip(b.iter())
            .map(|(pa, pb)| PathPoint::lerp(pa, pb, t))
            .collect(),
    )
}

/// Wraps `index` into the buffer. An empty buffer leaves it unchanged so the
/// slice access reports an out-of-bounds index.
fn wrap_index(index: usize, len: usize) -> usize {
    index.checked_rem(len).unwrap_or(index)
}

/// Circular indexing.
///
/// # Panics
///
/// Panics with an out-of-bounds message if the path is empty.
impl Index<usize> for Path {
    type Output = PathPoint;

    fn index(&self, index: usize) -> &PathPoint {
        &self.points[wrap_index(index, self.points.len())]
    }
}

impl IndexMut<usize> for Path {
    fn index_mut(&mut self, index: usize) -> &mut PathPoint {
        let len = self.points.len();
        &mut self.points[wrap_index(index, len)]
    }
}

impl From<Vec<PathPoint>> for Path {
    fn from(points: Vec<PathPoint>) -> Self {
        Self::new(points)
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathPoint;
    type IntoIter = std::slice::Iter<'a, PathPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
