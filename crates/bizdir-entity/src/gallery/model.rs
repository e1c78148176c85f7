//! Gallery entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::audit::{AuditFields, Audited};

/// A media asset owned by a business (logo, banner, gallery image).
///
/// Galleries have no standalone repository: they are written through
/// `Business::save_relations` and soft-deleted by the cascade that
/// follows their owning business.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct Gallery {
    /// Audit envelope.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: AuditFields,
    /// Owning business id.
    pub business_id: i64,
    /// Stored image path.
    pub image: String,
    /// Asset kind: `logo`, `banner`, or `gallery`.
    pub kind: String,
}

impl Gallery {
    /// Create a new, unpersisted gallery entry.
    pub fn new(business_id: i64, image: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            audit: AuditFields::default(),
            business_id,
            image: image.into(),
            kind: kind.into(),
        }
    }
}

impl Audited for Gallery {
    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditFields {
        &mut self.audit
    }
}
