//! Business type entity.

pub mod model;

pub use model::BusinessType;
