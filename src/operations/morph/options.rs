use crate::error::{GeometryError, Result};
use crate::operations::correspond::CostFunction;

/// Which morphing strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MorphStrategy {
    /// Align both paths and interpolate every point independently.
    #[default]
    Point,
    /// Interpolate a single affine map solved from landmark pairs.
    Affine,
}

/// The family of maps solved by the affine strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AffineMode {
    /// General affine map from three landmark pairs.
    #[default]
    Affine,
    /// Rotation, uniform scale and translation from two landmark pairs.
    Similarity,
}

impl AffineMode {
    /// Number of landmark pairs the mode needs.
    #[must_use]
    pub fn landmark_count(self) -> usize {
        match self {
            Self::Affine => 3,
            Self::Similarity => 2,
        }
    }
}

/// Indices of the corresponding points used as affine landmarks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Landmarks {
    /// Evenly spaced indices: `0, n/3, 2n/3` or `0, n/2`.
    #[default]
    Auto,
    Explicit(Vec<usize>),
}

/// What `evaluate` does with a parameter outside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterPolicy {
    #[default]
    Reject,
    Clamp,
}

impl ParameterPolicy {
    /// Validates (or clamps) a morph parameter. `NaN` is always rejected.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ParameterOutOfRange` for `NaN`, and for values
    /// outside `[0, 1]` under [`ParameterPolicy::Reject`].
    pub fn resolve(self, t: f64) -> Result<f64> {
        let in_range = (0.0..=1.0).contains(&t);
        match self {
            _ if in_range => Ok(t),
            Self::Clamp if !t.is_nan() => Ok(t.clamp(0.0, 1.0)),
            _ => Err(GeometryError::ParameterOutOfRange {
                parameter: "t",
                value: t,
                min: 0.0,
                max: 1.0,
            }
            .into()),
        }
    }
}

/// Configuration of a [`Morpher`](super::Morpher).
#[derive(Debug, Clone, Default)]
pub struct MorphOptions {
    pub strategy: MorphStrategy,
    /// Cost minimised when choosing point correspondences (point strategy).
    pub cost: CostFunction,
    pub affine: AffineMode,
    pub landmarks: Landmarks,
    pub parameter_policy: ParameterPolicy,
}
