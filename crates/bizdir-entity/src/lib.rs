//! # bizdir-entity
//!
//! Domain entity models for BizDir: the shared audit envelope, the
//! [`Entity`]/[`Audited`] traits consumed by the repository layer, and
//! the concrete user/user-type/business-directory records.

pub mod audit;
pub mod business;
pub mod business_type;
pub mod entity;
pub mod gallery;
pub mod user;
pub mod user_type;

pub use audit::{AuditFields, Audited};
pub use business::Business;
pub use business_type::BusinessType;
pub use entity::{Entity, RelationDef};
pub use gallery::Gallery;
pub use user::User;
pub use user_type::UserType;
