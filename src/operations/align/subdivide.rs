use crate::geometry::path::segment_between;
use crate::geometry::{Path, PathPoint, PointKind};
use crate::math::bezier;
use crate::math::cyclic::even_distribution;

/// Inserts `count` interpolation points into an open component without
/// changing its shape.
///
/// The points are spread over the segments with the quotient/remainder rule,
/// so the original vertices stay as evenly spaced as possible among the new
/// ones. Each receiving segment is cut into equal parameter lengths by
/// De Casteljau subdivision, which also rewrites the neighbouring handles.
/// A single-point component is grown by replicating its point.
pub fn insert_interpolation_points(component: &mut Path, count: usize) {
    let n = component.len();
    if count == 0 || n == 0 {
        return;
    }

    if n == 1 {
        let mut copy = PathPoint::vertex(component[0].anchor);
        copy.kind = PointKind::Interpolation;
        for _ in 0..count {
            component.push(copy);
        }
        return;
    }

    let source = component.points();
    let per_segment = even_distribution(count, n - 1);
    let mut out: Vec<PathPoint> = Vec::with_capacity(n + count);
    out.push(source[0]);

    for (end, &extra) in source[1..].iter().zip(&per_segment) {
        if extra == 0 {
            out.push(*end);
            continue;
        }
        let Some(start) = out.last_mut() else {
            continue;
        };
        let pieces = bezier::subdivide_uniform(&segment_between(start, end), extra + 1);
        start.handle_out = pieces[0][1];
        for pair in pieces.windows(2) {
            out.push(PathPoint {
                anchor: pair[0][3],
                handle_in: pair[0][2],
                handle_out: pair[1][1],
                visible: true,
                curved: end.curved,
                kind: PointKind::Interpolation,
            });
        }
        out.push(PathPoint {
            handle_in: pieces[extra][2],
            ..*end
        });
    }

    *component = Path::new(out);
}

/// Splits an open component into `pieces` consecutive components.
///
/// The component is first upsampled to at least `pieces + 1` points. Split
/// points are spaced with the quotient/remainder rule; each split point is
/// duplicated so the earlier piece ends on an interpolation copy of it and the
/// later piece starts with the point itself.
///
/// If the computed step between split points is zero the component is
/// returned whole.
#[must_use]
pub fn subdivide_component(component: &Path, pieces: usize) -> Vec<Path> {
    if pieces <= 1 {
        return vec![component.clone()];
    }

    let mut work = component.clone();
    if work.len() < pieces + 1 {
        let missing = pieces + 1 - work.len();
        insert_interpolation_points(&mut work, missing);
    }

    let segments = work.len().saturating_sub(1);
    if segments / pieces == 0 {
        tracing::debug!(
            points = component.len(),
            pieces,
            "component too short to subdivide; leaving it whole"
        );
        return vec![component.clone()];
    }

    let points = work.points();
    let mut out = Vec::with_capacity(pieces);
    let mut start = 0;
    for (i, size) in even_distribution(segments, pieces).into_iter().enumerate() {
        let end = start + size;
        let mut piece = points[start..=end].to_vec();
        piece[0].visible = false;
        if i + 1 < pieces {
            if let Some(last) = piece.last_mut() {
                last.kind = PointKind::Interpolation;
            }
        }
        out.push(Path::new(piece));
        start = end;
    }
    out
}
