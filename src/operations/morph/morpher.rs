use super::{AffineMorpher, MorphObserver, MorphOptions, MorphState, MorphStrategy, PointMorpher};
use crate::error::Result;
use crate::geometry::Path;
use crate::topology::CanonicalPath;

/// A morph driven by one of the available strategies.
///
/// Drive it with `prepare` once, `evaluate(t)` once per frame, and `finish`
/// once at the end. An instance owns all of its snapshots and buffers; run
/// independent morphs on separate instances.
#[derive(Debug)]
pub enum Morpher {
    Point(PointMorpher),
    Affine(AffineMorpher),
}

impl Morpher {
    /// Creates an unprepared morpher for the strategy selected by `options`.
    #[must_use]
    pub fn new(options: MorphOptions) -> Self {
        match options.strategy {
            MorphStrategy::Point => Self::Point(
                PointMorpher::new(options.cost).with_parameter_policy(options.parameter_policy),
            ),
            MorphStrategy::Affine => Self::Affine(
                AffineMorpher::new(options.affine, options.landmarks)
                    .with_parameter_policy(options.parameter_policy),
            ),
        }
    }

    /// Creates and prepares a morpher in one step.
    ///
    /// # Errors
    ///
    /// Returns whatever `prepare` of the selected strategy returns.
    pub fn prepared(origin: &Path, destination: &Path, options: MorphOptions) -> Result<Self> {
        let mut morpher = Self::new(options);
        morpher.prepare(origin, destination)?;
        Ok(morpher)
    }

    /// Attaches an observer notified on prepare, every evaluate, and finish.
    #[must_use]
    pub fn with_observer(self, observer: impl MorphObserver + Send + 'static) -> Self {
        let observer: Box<dyn MorphObserver + Send> = Box::new(observer);
        match self {
            Self::Point(m) => Self::Point(m.with_observer(observer)),
            Self::Affine(m) => Self::Affine(m.with_observer(observer)),
        }
    }

    /// # Errors
    ///
    /// See [`PointMorpher::prepare`] and [`AffineMorpher::prepare`].
    pub fn prepare(&mut self, origin: &Path, destination: &Path) -> Result<()> {
        match self {
            Self::Point(m) => m.prepare(origin, destination),
            Self::Affine(m) => m.prepare(origin, destination),
        }
    }

    /// # Errors
    ///
    /// See [`PointMorpher::evaluate`] and [`AffineMorpher::evaluate`].
    pub fn evaluate(&mut self, t: f64) -> Result<Path> {
        match self {
            Self::Point(m) => m.evaluate(t),
            Self::Affine(m) => m.evaluate(t),
        }
    }

    /// # Errors
    ///
    /// See [`PointMorpher::finish`] and [`AffineMorpher::finish`].
    pub fn finish(&mut self) -> Result<Path> {
        match self {
            Self::Point(m) => m.finish(),
            Self::Affine(m) => m.finish(),
        }
    }

    #[must_use]
    pub fn state(&self) -> MorphState {
        match self {
            Self::Point(m) => m.state(),
            Self::Affine(m) => m.state(),
        }
    }

    /// The working canonical path of a prepared point morph.
    #[must_use]
    pub fn working(&self) -> Option<&CanonicalPath> {
        match self {
            Self::Point(m) => m.working(),
            Self::Affine(_) => None,
        }
    }

    /// The aligned `(origin, destination)` pair of a prepared point morph.
    #[must_use]
    pub fn aligned(&self) -> Option<(&CanonicalPath, &CanonicalPath)> {
        match self {
            Self::Point(m) => m.aligned(),
            Self::Affine(_) => None,
        }
    }
}

impl Default for Morpher {
    fn default() -> Self {
        Self::new(MorphOptions::default())
    }
}
