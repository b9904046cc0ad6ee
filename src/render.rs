pub mod compositor;
pub mod export;
pub mod mask;
