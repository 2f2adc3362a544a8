pub mod path;
pub mod point;

pub use path::{lerp_paths, Path};
pub use point::{PathPoint, PointKind};
