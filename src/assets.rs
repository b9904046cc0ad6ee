pub mod resource;
pub mod sequence;
