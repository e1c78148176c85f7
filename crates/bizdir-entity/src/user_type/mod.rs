//! User type entity.

pub mod model;

pub use model::UserType;
