//! Shared query-parameter and envelope types.

pub mod field;
pub mod pagination;
pub mod sorting;

pub use field::{FieldMap, FieldValue};
pub use pagination::{ListParams, PageMeta, Paginated};
pub use sorting::SortDirection;
