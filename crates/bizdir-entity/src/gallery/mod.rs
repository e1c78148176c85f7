//! Gallery entity.

pub mod model;

pub use model::Gallery;
