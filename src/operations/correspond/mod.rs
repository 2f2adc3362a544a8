mod cost;
mod optimizer;

pub use cost::CostFunction;
pub use optimizer::{Correspondence, CorrespondenceOptimizer, Direction};
