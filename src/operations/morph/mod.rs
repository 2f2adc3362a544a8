mod affine;
mod morpher;
mod observer;
mod options;
mod point;
mod state;

pub use affine::AffineMorpher;
pub use morpher::Morpher;
pub use observer::MorphObserver;
pub use options::{AffineMode, Landmarks, MorphOptions, MorphStrategy, ParameterPolicy};
pub use point::PointMorpher;
pub use state::MorphState;
