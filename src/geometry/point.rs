use crate::math::{lerp_point, Point3};

/// Provenance of a path point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointKind {
    /// An authored point that belongs to the shape.
    #[default]
    Vertex,
    /// A point inserted only to equalise point counts; never shown as a vertex.
    Interpolation,
}

/// A path vertex: an anchor with two Bezier control handles.
///
/// The flags describe the segment *entering* this point from its predecessor:
/// - `visible = false` marks a component boundary (nothing is drawn into this point)
/// - `curved = false` means a straight segment, whose handles consumers ignore
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    pub anchor: Point3,
    /// Control handle of the entering segment.
    pub handle_in: Point3,
    /// Control handle of the exiting segment.
    pub handle_out: Point3,
    pub visible: bool,
    pub curved: bool,
    pub kind: PointKind,
}

impl PathPoint {
    /// Creates a straight-segment vertex with both handles on the anchor.
    #[must_use]
    pub fn vertex(anchor: Point3) -> Self {
        Self {
            anchor,
            handle_in: anchor,
            handle_out: anchor,
            visible: true,
            curved: false,
            kind: PointKind::Vertex,
        }
    }

    /// Creates a curved-segment vertex with explicit handles.
    #[must_use]
    pub fn curve(anchor: Point3, handle_in: Point3, handle_out: Point3) -> Self {
        Self {
            anchor,
            handle_in,
            handle_out,
            visible: true,
            curved: true,
            kind: PointKind::Vertex,
        }
    }

    /// Returns this point with its entering segment hidden (a component start).
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Returns `true` for points inserted by alignment.
    #[must_use]
    pub fn is_interpolation(&self) -> bool {
        self.kind == PointKind::Interpolation
    }

    /// Interpolates anchor and handles component-wise; flags are taken from `a`.
    #[must_use]
    pub fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            anchor: lerp_point(&a.anchor, &b.anchor, t),
            handle_in: lerp_point(&a.handle_in, &b.handle_in, t),
            handle_out: lerp_point(&a.handle_out, &b.handle_out, t),
            ..*a
        }
    }

    /// Overwrites anchor and handles with the interpolation of `a` and `b`,
    /// leaving this point's flags untouched.
    pub fn set_lerp(&mut self, a: &Self, b: &Self, t: f64) {
        self.anchor = lerp_point(&a.anchor, &b.anchor, t);
        self.handle_in = lerp_point(&a.handle_in, &b.handle_in, t);
        self.handle_out = lerp_point(&a.handle_out, &b.handle_out, t);
    }

    /// Copies kind, visibility and curvature from `other`.
    pub fn copy_flags_from(&mut self, other: &Self) {
        self.kind = other.kind;
        self.visible = other.visible;
        self.curved = other.curved;
    }
}
