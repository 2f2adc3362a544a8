use super::observer::ObserverSlot;
use super::{MorphObserver, MorphState, ParameterPolicy};
use crate::error::{MorphError, Result, TopologyError};
use crate::geometry::Path;
use crate::operations::align::TopologyAligner;
use crate::operations::correspond::{Correspondence, CorrespondenceOptimizer, CostFunction};
use crate::topology::CanonicalPath;

/// Morphs by pointwise interpolation of two aligned canonical paths.
///
/// `prepare` splits both paths, equalises their components and point counts,
/// and re-indexes each origin component to its cheapest correspondence.
/// `evaluate(t)` then interpolates anchors and handles of every matched pair,
/// always from the two fixed aligned snapshots. `finish` restores the
/// destination's flags and handles and strips interpolation points.
#[derive(Debug, Default)]
pub struct PointMorpher {
    cost: CostFunction,
    parameter_policy: ParameterPolicy,
    state: MorphState,
    prepared: Option<Prepared>,
    observer: ObserverSlot,
}

#[derive(Debug)]
struct Prepared {
    destination: Path,
    aligned_origin: CanonicalPath,
    aligned_destination: CanonicalPath,
    working: CanonicalPath,
    correspondences: Vec<Correspondence>,
}

impl PointMorpher {
    /// Creates a new `PointMorpher` that chooses correspondences by `cost`.
    #[must_use]
    pub fn new(cost: CostFunction) -> Self {
        Self {
            cost,
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

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> MorphState {
        self.state
    }

    /// The working canonical path overwritten by each `evaluate`.
    #[must_use]
    pub fn working(&self) -> Option<&CanonicalPath> {
        self.prepared.as_ref().map(|p| &p.working)
    }

    /// The aligned `(origin, destination)` pair being interpolated.
    #[must_use]
    pub fn aligned(&self) -> Option<(&CanonicalPath, &CanonicalPath)> {
        self.prepared
            .as_ref()
            .map(|p| (&p.aligned_origin, &p.aligned_destination))
    }

    /// Correspondences chosen for the origin components, in component order.
    #[must_use]
    pub fn correspondences(&self) -> &[Correspondence] {
        self.prepared
            .as_ref()
            .map(|p| p.correspondences.as_slice())
            .unwrap_or_default()
    }

    /// Aligns `origin` with `destination`.
    ///
    /// On failure the morpher stays `Unprepared` and holds nothing to evaluate.
    ///
    /// # Errors
    ///
    /// - `MorphError::InvalidState` unless the morpher is `Unprepared`
    /// - `GeometryError::EmptyPath` if either path has no points
    /// - `TopologyError` if the paths cannot be aligned
    #[tracing::instrument(
        skip_all,
        fields(origin_points = origin.len(), destination_points = destination.len())
    )]
    pub fn prepare(&mut self, origin: &Path, destination: &Path) -> Result<()> {
        self.state.check_prepare()?;

        let split_origin = CanonicalPath::split(&origin.with_explicit_handles())?;
        let split_destination = CanonicalPath::split(&destination.with_explicit_handles())?;

        let (mut aligned_origin, aligned_destination) =
            TopologyAligner::new(split_origin, split_destination).execute()?;
        let correspondences = CorrespondenceOptimizer::new(self.cost)
            .execute(&mut aligned_origin, &aligned_destination)?;

        let mut working = aligned_origin.clone();
        for component in working.components_mut() {
            component.mark_curved();
        }
        working.set_closed_loop(
            aligned_origin.is_closed_loop() && aligned_destination.is_closed_loop(),
        );

        if let Some(observer) = self.observer.get_mut() {
            observer.on_prepared(&aligned_origin.merge(), &aligned_destination.merge());
        }

        tracing::debug!(
            components = aligned_origin.number_of_components(),
            points = aligned_origin.size(),
            "prepared point morph"
        );
        self.prepared = Some(Prepared {
            destination: destination.clone(),
            aligned_origin,
            aligned_destination,
            working,
            correspondences,
        });
        self.state = MorphState::Prepared;
        Ok(())
    }

    /// Interpolates the aligned paths at `t` and returns the merged result.
    ///
    /// # Errors
    ///
    /// - `MorphError::InvalidState` unless the morpher is `Prepared` or `Evaluating`
    /// - `GeometryError::ParameterOutOfRange` for `t` outside `[0, 1]` (unless clamping)
    pub fn evaluate(&mut self, t: f64) -> Result<Path> {
        self.state.check_evaluate()?;
        let t = self.parameter_policy.resolve(t)?;
        let prepared = self.prepared_mut("evaluate")?;

        prepared.interpolate(t);
        let path = prepared.working.merge();

        if let Some(observer) = self.observer.get_mut() {
            observer.on_evaluated(t, &path);
        }
        self.state = MorphState::Evaluating;
        Ok(path)
    }

    /// Completes the morph and returns the destination path.
    ///
    /// The result equals `destination.without_interpolation_points()`: anchors
    /// come from the evaluation at `t = 1`, flags and handles from the
    /// destination snapshot.
    ///
    /// # Errors
    ///
    /// - `MorphError::InvalidState` unless the morpher is `Prepared` or `Evaluating`
    /// - `TopologyError::PointCountMismatch` if the merged result does not line
    ///   up with the destination
    pub fn finish(&mut self) -> Result<Path> {
        self.state.check_finish()?;
        let prepared = self.prepared_mut("finish")?;

        prepared.interpolate(1.0);
        for (point, target) in prepared
            .working
            .points_mut()
            .zip(prepared.aligned_destination.points())
        {
            point.copy_flags_from(target);
        }
        prepared
            .working
            .set_closed_loop(prepared.aligned_destination.is_closed_loop());

        let mut path = prepared.working.merge().without_interpolation_points();
        let expected = prepared.destination.without_interpolation_points();
        if path.len() != expected.len() {
            return Err(TopologyError::PointCountMismatch {
                component: 0,
                origin: path.len(),
                destination: expected.len(),
            }
            .into());
        }
        for (point, target) in path.points_mut().iter_mut().zip(expected.iter()) {
            point.copy_flags_from(target);
            point.handle_in = target.handle_in;
            point.handle_out = target.handle_out;
        }

        if let Some(observer) = self.observer.get_mut() {
            observer.on_finished(&path);
        }
        self.state = MorphState::Finished;
        Ok(path)
    }

    fn prepared_mut(&mut self, operation: &'static str) -> Result<&mut Prepared> {
        let state = self.state;
        self.prepared
            .as_mut()
            .ok_or_else(|| MorphError::InvalidState { operation, state }.into())
    }
}

impl Prepared {
    fn interpolate(&mut self, t: f64) {
        for (point, (a, b)) in self.working.points_mut().zip(
            self.aligned_origin
                .points()
                .zip(self.aligned_destination.points()),
        ) {
            point.set_lerp(a, b, t);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use approx::assert_relative_eq;

    use super::*;
    use crate::error::{GeometryError, PathmorphError};
    use crate::math::{lerp_point, Point3};

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    fn square(size: f64) -> Path {
        Path::from_polygon(&[p(0.0, 0.0), p(size, 0.0), p(size, size), p(0.0, size)])
    }

    fn prepared(origin: &Path, destination: &Path) -> PointMorpher {
        let mut morpher = PointMorpher::default();
        morpher.prepare(origin, destination).unwrap();
        morpher
    }

    #[test]
    fn lifecycle() {
        let mut morpher = PointMorpher::default();
        assert_eq!(morpher.state(), MorphState::Unprepared);
        assert!(morpher.evaluate(0.5).is_err());
        assert!(morpher.finish().is_err());

        morpher.prepare(&square(1.0), &square(2.0)).unwrap();
        assert_eq!(morpher.state(), MorphState::Prepared);
        assert!(morpher.prepare(&square(1.0), &square(2.0)).is_err());

        morpher.evaluate(0.5).unwrap();
        assert_eq!(morpher.state(), MorphState::Evaluating);

        morpher.finish().unwrap();
        assert_eq!(morpher.state(), MorphState::Finished);
        assert!(matches!(
            morpher.finish(),
            Err(PathmorphError::Morph(MorphError::InvalidState {
                operation: "finish",
                ..
            }))
        ));
        assert!(morpher.evaluate(0.5).is_err());
    }

    #[test]
    fn failed_prepare_leaves_nothing_to_evaluate() {
        let mut morpher = PointMorpher::default();
        assert!(matches!(
            morpher.prepare(&Path::default(), &square(1.0)),
            Err(PathmorphError::Geometry(GeometryError::EmptyPath))
        ));
        assert_eq!(morpher.state(), MorphState::Unprepared);
        assert!(morpher.working().is_none());
        assert!(morpher.evaluate(0.0).is_err());
    }

    #[test]
    fn scaled_square_interpolates_linearly() {
        let mut morpher = prepared(&square(1.0), &square(3.0));
        let mid = morpher.evaluate(0.5).unwrap();
        assert_eq!(mid.len(), 4);
        assert!(mid.is_closed_loop());
        for (point, expected) in mid.iter().zip(square(2.0).iter()) {
            assert_relative_eq!(point.anchor, expected.anchor, epsilon = 1e-12);
        }
    }

    #[test]
    fn evaluate_marks_segments_curved() {
        let mut morpher = prepared(&square(1.0), &Path::circle(p(0.5, 0.5), 1.0));
        let path = morpher.evaluate(0.25).unwrap();
        assert!(path.iter().all(|pt| pt.curved));
    }

    #[test]
    fn finish_restores_destination_exactly() {
        let destination = Path::circle(p(5.0, 5.0), 2.0);
        let mut morpher = prepared(&square(1.0), &destination);
        morpher.evaluate(0.4).unwrap();
        assert_eq!(morpher.finish().unwrap(), destination);
    }

    #[test]
    fn finish_from_prepared() {
        let destination = Path::regular_polygon(p(0.0, 0.0), 2.0, 5);
        let mut morpher = prepared(&square(1.0), &destination);
        assert_eq!(morpher.finish().unwrap(), destination);
    }

    #[test]
    fn finish_restores_straight_destination_from_curved_origin() {
        let destination = square(4.0);
        let mut morpher = prepared(&Path::circle(p(0.0, 0.0), 1.0), &destination);
        let result = morpher.finish().unwrap();
        assert_eq!(result, destination);
        assert!(result.iter().all(|pt| !pt.curved));
    }

    #[test]
    fn evaluate_zero_starts_at_origin_anchors() {
        let origin = square(1.0);
        let mut morpher = prepared(&origin, &Path::regular_polygon(p(0.5, 0.5), 1.0, 6));
        let start = morpher.evaluate(0.0).unwrap();
        let (aligned_origin, _) = morpher.aligned().unwrap();
        assert_eq!(start.len(), aligned_origin.merge().len());
        for point in start.iter().filter(|pt| !pt.is_interpolation()) {
            assert!(origin
                .iter()
                .any(|o| (o.anchor - point.anchor).norm() < 1e-12));
        }
    }

    #[test]
    fn evaluate_recomputes_from_snapshots() {
        let mut morpher = prepared(&square(1.0), &Path::circle(p(0.0, 0.0), 2.0));
        let first = morpher.evaluate(0.3).unwrap();
        morpher.evaluate(0.7).unwrap();
        let again = morpher.evaluate(0.3).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn evaluate_interpolates_handles() {
        let origin = Path::circle(p(0.0, 0.0), 1.0);
        let destination = Path::circle(p(0.0, 0.0), 3.0);
        let mut morpher = prepared(&origin, &destination);
        let mid = morpher.evaluate(0.5).unwrap();
        for ((m, a), b) in mid.iter().zip(origin.iter()).zip(destination.iter()) {
            let handle_in = lerp_point(&a.handle_in, &b.handle_in, 0.5);
            let handle_out = lerp_point(&a.handle_out, &b.handle_out, 0.5);
            assert_relative_eq!(m.handle_in, handle_in, epsilon = 1e-12);
            assert_relative_eq!(m.handle_out, handle_out, epsilon = 1e-12);
        }
    }

    #[test]
    fn out_of_range_parameter() {
        let mut morpher = prepared(&square(1.0), &square(2.0));
        assert!(matches!(
            morpher.evaluate(1.5),
            Err(PathmorphError::Geometry(GeometryError::ParameterOutOfRange { .. }))
        ));
        // A rejected parameter does not advance the state.
        assert_eq!(morpher.state(), MorphState::Prepared);

        let mut clamped = PointMorpher::default().with_parameter_policy(ParameterPolicy::Clamp);
        clamped.prepare(&square(1.0), &square(2.0)).unwrap();
        let end = clamped.evaluate(7.0).unwrap();
        assert_relative_eq!(end[2].anchor, p(2.0, 2.0));
    }

    #[test]
    fn prepare_reorients_origin() {
        let origin = Path::from_polygon(&[p(1.0, 1.0), p(0.0, 1.0), p(0.0, 0.0), p(1.0, 0.0)]);
        let morpher = prepared(&origin, &square(1.0));
        let chosen = morpher.correspondences();
        assert_eq!(chosen.len(), 1);
        assert_eq!(chosen[0].offset, 2);
        assert_relative_eq!(chosen[0].cost, 0.0, epsilon = 1e-12);
    }

    #[derive(Default)]
    struct Recorder {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl MorphObserver for Recorder {
        fn on_prepared(&mut self, origin: &Path, destination: &Path) {
            self.events
                .lock()
                .unwrap()
                .push(format!("prepared {} {}", origin.len(), destination.len()));
        }

        fn on_evaluated(&mut self, t: f64, _path: &Path) {
            self.events.lock().unwrap().push(format!("evaluated {t}"));
        }

        fn on_finished(&mut self, path: &Path) {
            self.events
                .lock()
                .unwrap()
                .push(format!("finished {}", path.len()));
        }
    }

    #[test]
    fn observer_is_notified() {
        let recorder = Recorder::default();
        let events = Arc::clone(&recorder.events);
        let mut morpher = PointMorpher::default().with_observer(Box::new(recorder));
        morpher
            .prepare(&square(1.0), &Path::regular_polygon(p(0.0, 0.0), 1.0, 6))
            .unwrap();
        morpher.evaluate(0.5).unwrap();
        morpher.finish().unwrap();
        assert_eq!(
            *events.lock().unwrap(),
            vec!["prepared 6 6", "evaluated 0.5", "finished 6"]
        );
    }
}
