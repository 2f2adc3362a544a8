pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod topology;

pub use error::{PathmorphError, Result};
pub use geometry::{Path, PathPoint, PointKind};
pub use operations::morph::{MorphOptions, MorphState, Morpher};
pub use topology::CanonicalPath;
