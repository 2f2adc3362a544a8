use super::cost::CostFunction;
use crate::error::{Result, TopologyError};
use crate::geometry::Path;
use crate::math::polygon_2d::orientation_2d;
use crate::math::{Point3, Vector3};
use crate::topology::CanonicalPath;

/// Traversal direction of an origin component relative to its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

impl Direction {
    /// `+1` or `-1`.
    #[must_use]
    pub fn sign(self) -> i8 {
        match self {
            Self::Forward => 1,
            Self::Reverse => -1,
        }
    }
}

/// The re-indexing chosen for one origin component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correspondence {
    pub offset: usize,
    pub direction: Direction,
    pub cost: f64,
}

impl Correspondence {
    /// Re-indexes `path`: reverses it if needed, then rotates its start by `offset`.
    ///
    /// Rotation only affects closed components.
    #[must_use]
    pub fn apply(&self, path: &Path) -> Path {
        let oriented = match self.direction {
            Direction::Forward => path.clone(),
            Direction::Reverse => path.reversed(),
        };
        oriented.rotated(self.offset)
    }
}

/// Chooses, per matched component pair, the rotation offset and direction of
/// the origin that minimises the configured [`CostFunction`].
///
/// The direction matches the orientation (signed area sign) of both sides;
/// a degenerate orientation on either side keeps the forward direction.
/// Offsets are searched exhaustively, which is quadratic in the component
/// length. Ties keep the smallest offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrespondenceOptimizer {
    cost: CostFunction,
}

impl CorrespondenceOptimizer {
    /// Creates a new `CorrespondenceOptimizer` using `cost`.
    #[must_use]
    pub fn new(cost: CostFunction) -> Self {
        Self { cost }
    }

    /// Finds the best correspondence of `origin` onto `destination` without
    /// modifying either.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::PointCountMismatch` if the components differ in length.
    pub fn find(self, origin: &Path, destination: &Path) -> Result<Correspondence> {
        self.find_component(0, origin, destination)
    }

    /// Re-indexes every origin component in place against its destination
    /// counterpart, returning the chosen correspondences in component order.
    ///
    /// # Errors
    ///
    /// - `TopologyError::ComponentCountMismatch` if the sides are not aligned
    /// - `TopologyError::PointCountMismatch` if a matched pair differs in length
    pub fn execute(
        self,
        origin: &mut CanonicalPath,
        destination: &CanonicalPath,
    ) -> Result<Vec<Correspondence>> {
        if origin.number_of_components() != destination.number_of_components() {
            return Err(TopologyError::ComponentCountMismatch {
                origin: origin.number_of_components(),
                destination: destination.number_of_components(),
            }
            .into());
        }

        let mut chosen = Vec::with_capacity(destination.number_of_components());
        for (index, (a, b)) in origin
            .components_mut()
            .iter_mut()
            .zip(destination.components())
            .enumerate()
        {
            let correspondence = self.find_component(index, a, b)?;
            tracing::trace!(
                component = index,
                offset = correspondence.offset,
                direction = ?correspondence.direction,
                cost = correspondence.cost,
                "chose correspondence"
            );
            *a = correspondence.apply(a);
            chosen.push(correspondence);
        }
        Ok(chosen)
    }

    fn find_component(
        self,
        component: usize,
        origin: &Path,
        destination: &Path,
    ) -> Result<Correspondence> {
        let n = origin.len();
        if n != destination.len() {
            return Err(TopologyError::PointCountMismatch {
                component,
                origin: n,
                destination: destination.len(),
            }
            .into());
        }

        let targets = destination.anchors();
        if n <= 1 {
            return Ok(Correspondence {
                offset: 0,
                direction: Direction::Forward,
                cost: self.cost_of(&origin.anchors(), &targets),
            });
        }

        let orientation = orientation_2d(&origin.anchors()) * orientation_2d(&targets);
        let direction = if orientation < 0 {
            Direction::Reverse
        } else {
            Direction::Forward
        };
        let oriented = match direction {
            Direction::Forward => origin.clone(),
            Direction::Reverse => origin.reversed(),
        };
        let anchors = oriented.anchors();

        // The distinct points of the cycle; an explicit closing copy repeats the start.
        let cycle_len = if oriented.is_explicitly_closed() {
            n - 1
        } else if oriented.is_closed_loop() {
            n
        } else {
            return Ok(Correspondence {
                offset: 0,
                direction,
                cost: self.cost_of(&anchors, &targets),
            });
        };

        let mut displacements: Vec<Vector3> = Vec::with_capacity(n);
        let mut best = Correspondence {
            offset: 0,
            direction,
            cost: f64::INFINITY,
        };
        for offset in 0..cycle_len {
            displacements.clear();
            displacements.extend(
                targets
                    .iter()
                    .enumerate()
                    .map(|(i, target)| anchors[(i + offset) % cycle_len] - target),
            );
            let cost = self.cost.evaluate(&displacements);
            if cost < best.cost {
                best.offset = offset;
                best.cost = cost;
            }
        }
        Ok(best)
    }

    fn cost_of(self, from: &[Point3], to: &[Point3]) -> f64 {
        let displacements: Vec<Vector3> = from.iter().zip(to).map(|(a, b)| a - b).collect();
        self.cost.evaluate(&displacements)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::PathmorphError;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    fn component(path: &Path) -> Path {
        CanonicalPath::split(path)
            .unwrap()
            .into_components()
            .remove(0)
    }

    fn unit_square() -> Path {
        Path::from_polygon(&[p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)])
    }

    #[test]
    fn rotated_square_finds_matching_corners() {
        // The same square with its start moved one corner along.
        let origin = component(&Path::from_polygon(&[
            p(1.0, 0.0),
            p(1.0, 1.0),
            p(0.0, 1.0),
            p(0.0, 0.0),
        ]));
        let destination = component(&unit_square());
        let optimizer = CorrespondenceOptimizer::default();

        let unaligned = optimizer.cost_of(&origin.anchors(), &destination.anchors());
        assert!(unaligned > 4.0);

        let best = optimizer.find(&origin, &destination).unwrap();
        assert_eq!(best.direction, Direction::Forward);
        assert_eq!(best.offset, 3);
        assert_relative_eq!(best.cost, 0.0, epsilon = 1e-12);

        let applied = best.apply(&origin);
        assert_eq!(applied.len(), destination.len());
        for (a, b) in applied.iter().zip(destination.iter()) {
            assert_relative_eq!(a.anchor, b.anchor, epsilon = 1e-12);
        }
        assert!(!applied[0].visible);
        assert!(applied[4].is_interpolation());
    }

    #[test]
    fn opposite_orientation_is_reversed() {
        let clockwise = component(&unit_square().reversed());
        let destination = component(&unit_square());
        let best = CorrespondenceOptimizer::default()
            .find(&clockwise, &destination)
            .unwrap();
        assert_eq!(best.direction, Direction::Reverse);
        assert_relative_eq!(best.cost, 0.0, epsilon = 1e-12);
        let applied = best.apply(&clockwise);
        assert!(orientation_2d(&applied.anchors()) > 0);
    }

    #[test]
    fn collinear_side_keeps_forward_direction() {
        let line = Path::from_polyline(&[p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)]);
        let tri = Path::from_polyline(&[p(0.0, 0.0), p(1.0, 1.0), p(2.0, 0.0)]);
        let optimizer = CorrespondenceOptimizer::default();
        let best = optimizer.find(&line, &tri).unwrap();
        assert_eq!(best.direction, Direction::Forward);
        assert_eq!(best.offset, 0);
        assert_relative_eq!(best.cost, 1.0);
    }

    #[test]
    fn open_component_is_not_rotated() {
        let line = Path::from_polyline(&[p(2.0, 0.0), p(0.0, 0.0), p(1.0, 0.0)]);
        let other = Path::from_polyline(&[p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)]);
        let optimizer = CorrespondenceOptimizer::default();
        let best = optimizer.find(&line, &other).unwrap();
        assert_eq!(best.offset, 0);
    }

    #[test]
    fn single_point_component_returns_offset_zero() {
        let dot = Path::from_polyline(&[p(1.0, 1.0)]);
        let other = Path::from_polyline(&[p(4.0, 5.0)]);
        let optimizer = CorrespondenceOptimizer::default();
        let best = optimizer.find(&dot, &other).unwrap();
        assert_eq!(best.offset, 0);
        assert_eq!(best.direction, Direction::Forward);
        assert_relative_eq!(best.cost, 5.0);
    }

    #[test]
    fn length_mismatch_is_reported() {
        let result =
            CorrespondenceOptimizer::default().find(&component(&unit_square()), &Path::default());
        assert!(matches!(
            result,
            Err(PathmorphError::Topology(
                TopologyError::PointCountMismatch { .. }
            ))
        ));
    }

    #[test]
    fn execute_reindexes_every_component() {
        let shifted = Path::from_polygon(&[p(0.0, 1.0), p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)]);
        let mut origin = CanonicalPath::new(vec![component(&shifted), component(&shifted)]);
        let destination =
            CanonicalPath::new(vec![component(&unit_square()), component(&unit_square())]);
        let chosen = CorrespondenceOptimizer::default()
            .execute(&mut origin, &destination)
            .unwrap();
        assert_eq!(chosen.len(), 2);
        assert!(chosen.iter().all(|c| c.offset == 1));
        for (a, b) in origin.points().zip(destination.points()) {
            assert_relative_eq!(a.anchor, b.anchor, epsilon = 1e-12);
        }
    }

    #[test]
    fn execute_rejects_unaligned_sides() {
        let mut origin = CanonicalPath::split(&unit_square()).unwrap();
        let destination = CanonicalPath::new(vec![unit_square(), unit_square()]);
        let result = CorrespondenceOptimizer::default().execute(&mut origin, &destination);
        assert!(matches!(
            result,
            Err(PathmorphError::Topology(
                TopologyError::ComponentCountMismatch { .. }
            ))
        ));
    }

    #[test]
    fn alternative_costs_agree_on_exact_match() {
        let origin = component(&Path::from_polygon(&[
            p(0.0, 1.0),
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(1.0, 1.0),
        ]));
        let destination = component(&unit_square());
        for cost in [CostFunction::DistanceVariance, CostFunction::AngleVariance] {
            let best = CorrespondenceOptimizer::new(cost)
                .find(&origin, &destination)
                .unwrap();
            assert_relative_eq!(best.cost, 0.0, epsilon = 1e-12);
        }
    }
}
