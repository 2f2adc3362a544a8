use thiserror::Error;

use crate::operations::morph::MorphState;

/// Top-level error type for the path morphing engine.
#[derive(Debug, Error)]
pub enum PathmorphError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Morph(#[from] MorphError),
}

/// Errors related to path geometry and numeric parameters.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("path has no points")]
    EmptyPath,

    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors raised while reconciling the component structure of two paths.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("degenerate topology: {0}")]
    Degenerate(String),

    #[error("component count mismatch: origin has {origin}, destination has {destination}")]
    ComponentCountMismatch { origin: usize, destination: usize },

    #[error(
        "point count mismatch in component {component}: origin has {origin}, destination has {destination}"
    )]
    PointCountMismatch {
        component: usize,
        origin: usize,
        destination: usize,
    },
}

/// Errors related to driving a morph.
#[derive(Debug, Error)]
pub enum MorphError {
    #[error("cannot {operation} while the morph is {state:?}")]
    InvalidState {
        operation: &'static str,
        state: MorphState,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`PathmorphError`].
pub type Result<T> = std::result::Result<T, PathmorphError>;
