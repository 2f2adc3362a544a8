pub mod align;
pub mod correspond;
pub mod morph;
