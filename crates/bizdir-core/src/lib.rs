//! # bizdir-core
//!
//! Core crate for BizDir. Contains configuration schemas, the actor
//! context, query-parameter types (pagination, sorting, field maps),
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other BizDir crates.

pub mod config;
pub mod context;
pub mod error;
pub mod result;
pub mod types;

pub use context::ActorContext;
pub use error::AppError;
pub use result::AppResult;
