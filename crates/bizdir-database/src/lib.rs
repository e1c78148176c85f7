//! # bizdir-database
//!
//! PostgreSQL connection management, the generic soft-deleting
//! repository engine, and concrete repository implementations for all
//! BizDir entities.

pub mod connection;
pub mod migration;
pub mod repository;
pub mod repositories;
pub mod scope;

pub use connection::DatabasePool;
pub use repository::BaseRepository;
pub use scope::QueryScope;
