use super::subdivide::{insert_interpolation_points, subdivide_component};
use crate::error::{Result, TopologyError};
use crate::geometry::Path;
use crate::math::cyclic::even_distribution;
use crate::topology::CanonicalPath;

/// Makes two canonical paths comparable point by point.
///
/// # Algorithm
///
/// 1. **Components**: the side with fewer components (`n1`) has component `k`
///    subdivided into `n2 / n1` pieces, plus one for the first `n2 % n1`
///    components, so both sides end with `n2` components.
/// 2. **Points**: within each matched pair the shorter component receives
///    interpolation points (shape-preserving De Casteljau insertion) until
///    both have the same length.
#[derive(Debug)]
pub struct TopologyAligner {
    origin: CanonicalPath,
    destination: CanonicalPath,
}

impl TopologyAligner {
    /// Creates a new `TopologyAligner` operation.
    #[must_use]
    pub fn new(origin: CanonicalPath, destination: CanonicalPath) -> Self {
        Self {
            origin,
            destination,
        }
    }

    /// Executes the alignment, returning the aligned `(origin, destination)` pair.
    ///
    /// # Errors
    ///
    /// - `TopologyError::Degenerate` if either side has no components, or if a
    ///   component could not be subdivided so the component counts still differ
    /// - `TopologyError::PointCountMismatch` if a matched pair could not be
    ///   brought to the same length (an empty component paired with a non-empty one)
    pub fn execute(&self) -> Result<(CanonicalPath, CanonicalPath)> {
        let n_origin = self.origin.number_of_components();
        let n_destination = self.destination.number_of_components();
        if n_origin == 0 || n_destination == 0 {
            return Err(TopologyError::Degenerate(format!(
                "cannot align canonical paths with {n_origin} and {n_destination} components"
            ))
            .into());
        }

        let (mut origin, mut destination) = match n_origin.cmp(&n_destination) {
            std::cmp::Ordering::Less => (
                equalize_components(&self.origin, n_destination),
                self.destination.clone(),
            ),
            std::cmp::Ordering::Greater => (
                self.origin.clone(),
                equalize_components(&self.destination, n_origin),
            ),
            std::cmp::Ordering::Equal => (self.origin.clone(), self.destination.clone()),
        };

        if origin.number_of_components() != destination.number_of_components() {
            return Err(TopologyError::Degenerate(format!(
                "component subdivision fell short: {} vs {} components",
                origin.number_of_components(),
                destination.number_of_components()
            ))
            .into());
        }

        for (index, (a, b)) in origin
            .components_mut()
            .iter_mut()
            .zip(destination.components_mut().iter_mut())
            .enumerate()
        {
            equalize_points(a, b);
            if a.len() != b.len() {
                return Err(TopologyError::PointCountMismatch {
                    component: index,
                    origin: a.len(),
                    destination: b.len(),
                }
                .into());
            }
        }

        tracing::debug!(
            components = origin.number_of_components(),
            points = origin.size(),
            "aligned canonical paths"
        );
        Ok((origin, destination))
    }
}

/// Subdivides the components of `canonical` until it has `target` components.
fn equalize_components(canonical: &CanonicalPath, target: usize) -> CanonicalPath {
    let shares = even_distribution(target, canonical.number_of_components());
    let mut components = Vec::with_capacity(target);
    for (component, pieces) in canonical.components().iter().zip(shares) {
        components.extend(subdivide_component(component, pieces));
    }
    tracing::debug!(
        from = canonical.number_of_components(),
        to = components.len(),
        "subdivided components"
    );
    CanonicalPath::new(components)
}

/// Pads the shorter of two matched components with interpolation points.
fn equalize_points(a: &mut Path, b: &mut Path) {
    let missing = a.len().abs_diff(b.len());
    let shorter = match a.len().cmp(&b.len()) {
        std::cmp::Ordering::Less => a,
        std::cmp::Ordering::Greater => b,
        std::cmp::Ordering::Equal => return,
    };
    tracing::debug!(missing, "inserting interpolation points");
    insert_interpolation_points(shorter, missing);
}
