//! Concrete repositories, one per entity.

pub mod business;
pub mod business_type;
pub mod user;
pub mod user_type;

pub use business::{BusinessListFilter, BusinessRepository};
pub use business_type::{BusinessTypeListFilter, BusinessTypeRepository};
pub use user::{UserListFilter, UserRepository};
pub use user_type::{UserTypeListFilter, UserTypeRepository};
