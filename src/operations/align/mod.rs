mod subdivide;
mod topology_aligner;

pub use subdivide::{insert_interpolation_points, subdivide_component};
pub use topology_aligner::TopologyAligner;
