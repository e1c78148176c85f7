//! User type entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use async_trait::async_trait;
use bizdir_core::types::field::FieldValue;

use crate::audit::{AuditFields, Audited};
use crate::entity::Entity;

/// A role-like grouping of users (e.g. admin, panel user).
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct UserType {
    /// Audit envelope.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: AuditFields,
    /// Unique type name.
    pub name: String,
}

impl UserType {
    /// Create a new, unpersisted user type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            audit: AuditFields::default(),
            name: name.into(),
        }
    }
}

impl Audited for UserType {
    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditFields {
        &mut self.audit
    }
}

#[async_trait]
impl Entity for UserType {
    const TABLE: &'static str = "user_types";
    const COLUMNS: &'static [&'static str] = &["name"];

    fn values(&self) -> Vec<FieldValue> {
        vec![FieldValue::from(self.name.clone())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_align_with_columns() {
        let user_type = UserType::new("admin");
        assert_eq!(user_type.values().len(), UserType::COLUMNS.len());
        assert!(user_type.audit.is_active);
    }
}
