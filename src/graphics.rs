pub mod bitmap;
pub mod context;
pub mod text;
