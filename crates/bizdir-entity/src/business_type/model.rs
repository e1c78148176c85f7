//! Business type entity model.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use bizdir_core::types::field::FieldValue;

use crate::audit::{AuditFields, Audited};
use crate::entity::Entity;

/// A directory category a business belongs to (e.g. restaurant, salon).
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct BusinessType {
    /// Audit envelope.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: AuditFields,
    /// Unique type name.
    pub name: String,
    /// Icon identifier shown in listings.
    pub icon: String,
}

impl BusinessType {
    /// Create a new, unpersisted business type.
    pub fn new(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            audit: AuditFields::default(),
            name: name.into(),
            icon: icon.into(),
        }
    }
}

impl Audited for BusinessType {
    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditFields {
        &mut self.audit
    }
}

#[async_trait]
impl Entity for BusinessType {
    const TABLE: &'static str = "business_types";
    const COLUMNS: &'static [&'static str] = &["name", "icon"];

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::from(self.name.clone()),
            FieldValue::from(self.icon.clone()),
        ]
    }
}
