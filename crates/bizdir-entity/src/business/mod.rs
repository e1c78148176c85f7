//! Business entity.

pub mod model;

pub use model::Business;
