mod canonical_path;

pub use canonical_path::CanonicalPath;
