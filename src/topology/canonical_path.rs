use crate::error::{GeometryError, Result};
use crate::geometry::{Path, PathPoint};

/// A path decomposed into its maximal connected components.
///
/// Every component starts with an invisible point. An implicitly closed loop
/// is split into a single component that ends with an interpolation copy of
/// its start (carrying the closing segment); the canonical path remembers this
/// so that [`CanonicalPath::merge`] restores the loop exactly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalPath {
    components: Vec<Path>,
    closed_loop: bool,
}

impl CanonicalPath {
    /// Creates a canonical path from already separated components.
    ///
    /// The first point of each component is marked invisible.
    #[must_use]
    pub fn new(components: Vec<Path>) -> Self {
        let mut canonical = Self {
            components,
            closed_loop: false,
        };
        canonical.mark_boundaries();
        canonical
    }

    /// Splits a path at every point whose entering segment is invisible.
    ///
    /// Point 0 always starts a component; if the path has several components a
    /// visible flag on point 0 is canonicalised to invisible.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::EmptyPath` if the path has no points.
    pub fn split(path: &Path) -> Result<Self> {
        if path.is_empty() {
            return Err(GeometryError::EmptyPath.into());
        }

        if path.is_closed_loop() && path.len() > 1 {
            let mut component = path.clone();
            component.open_loop();
            return Ok(Self {
                components: vec![component],
                closed_loop: true,
            });
        }

        let mut components = Vec::with_capacity(path.component_count());
        let mut current: Vec<PathPoint> = Vec::new();
        for (i, point) in path.iter().enumerate() {
            if i > 0 && !point.visible {
                components.push(Path::new(std::mem::take(&mut current)));
            }
            current.push(*point);
        }
        components.push(Path::new(current));

        Ok(Self::new(components))
    }

    /// Flattens the components back into one path.
    ///
    /// Each component's first point is marked invisible (a boundary); all other
    /// flags are preserved. A canonical path split from a closed loop is closed
    /// again.
    #[must_use]
    pub fn merge(&self) -> Path {
        let mut points = Vec::with_capacity(self.size());
        for component in &self.components {
            let start = points.len();
            points.extend_from_slice(component.points());
            if let Some(first) = points.get_mut(start) {
                first.visible = false;
            }
        }
        let mut path = Path::new(points);
        if self.closed_loop && self.components.len() == 1 {
            path.close_loop();
        }
        path
    }

    /// Number of components.
    #[must_use]
    pub fn number_of_components(&self) -> usize {
        self.components.len()
    }

    /// Returns the component at `index`.
    #[must_use]
    pub fn component(&self, index: usize) -> Option<&Path> {
        self.components.get(index)
    }

    /// Returns the component at `index` mutably.
    pub fn component_mut(&mut self, index: usize) -> Option<&mut Path> {
        self.components.get_mut(index)
    }

    /// Returns all components.
    #[must_use]
    pub fn components(&self) -> &[Path] {
        &self.components
    }

    /// Returns all components mutably.
    pub fn components_mut(&mut self) -> &mut [Path] {
        &mut self.components
    }

    /// Consumes the canonical path, returning its components.
    #[must_use]
    pub fn into_components(self) -> Vec<Path> {
        self.components
    }

    /// Total number of points across all components.
    #[must_use]
    pub fn size(&self) -> usize {
        self.components.iter().map(Path::len).sum()
    }

    /// Returns `true` if there are no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns `true` if this canonical path stands for a single closed loop.
    #[must_use]
    pub fn is_closed_loop(&self) -> bool {
        self.closed_loop && self.components.len() == 1
    }

    pub(crate) fn set_closed_loop(&mut self, closed_loop: bool) {
        self.closed_loop = closed_loop;
    }

    /// Iterates over every point of every component in order.
    pub fn points(&self) -> impl Iterator<Item = &PathPoint> {
        self.components.iter().flat_map(Path::iter)
    }

    /// Iterates mutably over every point of every component in order.
    pub fn points_mut(&mut self) -> impl Iterator<Item = &mut PathPoint> {
        self.components
            .iter_mut()
            .flat_map(|c| c.points_mut().iter_mut())
    }

    fn mark_boundaries(&mut self) {
        for component in &mut self.components {
            if let Some(first) = component.points_mut().first_mut() {
                first.visible = false;
            }
        }
    }
}
