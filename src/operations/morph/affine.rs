use super::observer::ObserverSlot;
use super::{AffineMode, Landmarks, MorphObserver, MorphState, ParameterPolicy};
use crate::error::{GeometryError, MorphError, Result, TopologyError};
use crate::geometry::Path;
use crate::math::affine_2d::{Affine2, AffineDecomposition};
use crate::math::Point2;

/// Morphs by a single interpolated affine map applied to a frozen origin.
///
/// The map is solved from corresponding landmark points and decomposed into
/// rotation angle, scales, shear and centroid displacement; each `evaluate(t)`
/// blends those parts from the identity and applies the result to every
/// anchor and handle of the origin. Intermediate shapes stay affinely related
/// to the origin, so the result is faithful only when the destination is an
/// affine image of the origin.
#[derive(Debug, Default)]
pub struct AffineMorpher {
    mode: AffineMode,
    landmarks: Landmarks,
    parameter_policy: ParameterPolicy,
    state: MorphState,
    prepared: Option<Prepared>,
    observer: ObserverSlot,
}

#[derive(Debug)]
struct Prepared {
    origin: Path,
    destination: Path,
    decomposition: AffineDecomposition,
}

impl AffineMorpher {
    /// Creates a new `AffineMorpher` solving maps of the given `mode` from `landmarks`.
    #[must_use]
    pub fn new(mode: AffineMode, landmarks: Landmarks) -> Self {
        Self {
            mode,
            landmarks,
            ..Self::default()
        }
    }

    /// Sets how out-of-range parameters passed to `evaluate` are handled.
    #[must_use]
    pub fn with_parameter_policy(mut self, policy: ParameterPolicy) -> Self {
        self.parameter_policy = policy;
        self
    }

    /// Attaches an observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Box<dyn MorphObserver + Send>) -> Self {
        self.observer.set(observer);
        self
    }

    #[must_use]
    pub fn state(&self) -> MorphState {
        self.state
    }

    /// The decomposed map, once prepared.
    #[must_use]
    pub fn decomposition(&self) -> Option<&AffineDecomposition> {
        self.prepared.as_ref().map(|p| &p.decomposition)
    }

    /// Solves the map carrying `origin` onto `destination`.
    ///
    /// # Errors
    ///
    /// - `MorphError::InvalidState` unless the morpher is `Unprepared`
    /// - `GeometryError::EmptyPath` if either path has no points
    /// - `TopologyError::PointCountMismatch` if the point counts differ
    /// - `MorphError::InvalidInput` for too few points or bad landmark indices
    /// - `GeometryError::Degenerate` if the landmarks do not determine a map
    #[tracing::instrument(
        skip_all,
        fields(points = origin.len(), mode = ?self.mode)
    )]
    pub fn prepare(&mut self, origin: &Path, destination: &Path) -> Result<()> {
        self.state.check_prepare()?;
        if origin.is_empty() || destination.is_empty() {
            return Err(GeometryError::EmptyPath.into());
        }
        if origin.len() != destination.len() {
            return Err(TopologyError::PointCountMismatch {
                component: 0,
                origin: origin.len(),
                destination: destination.len(),
            }
            .into());
        }

        let indices = self.landmark_indices(origin.len())?;
        let source: Vec<Point2> = indices.iter().map(|&i| planar(origin, i)).collect();
        let target: Vec<Point2> = indices.iter().map(|&i| planar(destination, i)).collect();
        let map = match self.mode {
            AffineMode::Affine => Affine2::from_three_pairs(
                &[source[0], source[1], source[2]],
                &[target[0], target[1], target[2]],
            )?,
            AffineMode::Similarity => Affine2::similarity_from_two_pairs(
                &[source[0], source[1]],
                &[target[0], target[1]],
            )?,
        };

        let pivot = origin.centroid().ok_or(GeometryError::EmptyPath)?;
        let decomposition = AffineDecomposition::new(&map, Point2::new(pivot.x, pivot.y))?;
        tracing::debug!(
            ?indices,
            angle = decomposition.angle,
            scale_x = decomposition.scale_x,
            scale_y = decomposition.scale_y,
            shear = decomposition.shear,
            "solved affine morph"
        );

        if let Some(observer) = self.observer.get_mut() {
            observer.on_prepared(origin, destination);
        }
        self.prepared = Some(Prepared {
            origin: origin.clone(),
            destination: destination.clone(),
            decomposition,
        });
        self.state = MorphState::Prepared;
        Ok(())
    }

    /// Applies the map interpolated to `t` to the frozen origin.
    ///
    /// # Errors
    ///
    /// - `MorphError::InvalidState` unless the morpher is `Prepared` or `Evaluating`
    /// - `GeometryError::ParameterOutOfRange` for `t` outside `[0, 1]` (unless clamping)
    pub fn evaluate(&mut self, t: f64) -> Result<Path> {
        self.state.check_evaluate()?;
        let t = self.parameter_policy.resolve(t)?;
        let path = self.prepared("evaluate")?.at(t);

        if let Some(observer) = self.observer.get_mut() {
            observer.on_evaluated(t, &path);
        }
        self.state = MorphState::Evaluating;
        Ok(path)
    }

    /// Completes the morph: the fully transformed origin carrying the
    /// destination's kind, visibility and curvature flags.
    ///
    /// # Errors
    ///
    /// Returns `MorphError::InvalidState` unless the morpher is `Prepared` or `Evaluating`.
    pub fn finish(&mut self) -> Result<Path> {
        self.state.check_finish()?;
        let prepared = self.prepared("finish")?;
        let mut path = prepared.at(1.0);
        for (point, target) in path.points_mut().iter_mut().zip(&prepared.destination) {
            point.copy_flags_from(target);
        }

        if let Some(observer) = self.observer.get_mut() {
            observer.on_finished(&path);
        }
        self.state = MorphState::Finished;
        Ok(path)
    }

    fn landmark_indices(&self, len: usize) -> Result<Vec<usize>> {
        let count = self.mode.landmark_count();
        if len < count {
            return Err(MorphError::InvalidInput(format!(
                "{:?} morph needs at least {count} points, got {len}",
                self.mode
            ))
            .into());
        }
        match &self.landmarks {
            Landmarks::Auto => Ok((0..count).map(|k| k * len / count).collect()),
            Landmarks::Explicit(indices) => {
                if indices.len() != count {
                    return Err(MorphError::InvalidInput(format!(
                        "{:?} morph needs {count} landmarks, got {}",
                        self.mode,
                        indices.len()
                    ))
                    .into());
                }
                if let Some(&bad) = indices.iter().find(|&&i| i >= len) {
                    return Err(MorphError::InvalidInput(format!(
                        "landmark index {bad} out of range for {len} points"
                    ))
                    .into());
                }
                Ok(indices.clone())
            }
        }
    }

    fn prepared(&self, operation: &'static str) -> Result<&Prepared> {
        self.prepared.as_ref().ok_or_else(|| {
            MorphError::InvalidState {
                operation,
                state: self.state,
            }
            .into()
        })
    }
}

impl Prepared {
    fn at(&self, t: f64) -> Path {
        let map = self.decomposition.at(t);
        let mut path = self.origin.clone();
        for point in path.points_mut() {
            point.anchor = map.apply(&point.anchor);
            point.handle_in = map.apply(&point.handle_in);
            point.handle_out = map.apply(&point.handle_out);
        }
        path
    }
}

fn planar(path: &Path, index: usize) -> Point2 {
    let anchor = path[index].anchor;
    Point2::new(anchor.x, anchor.y)
}
