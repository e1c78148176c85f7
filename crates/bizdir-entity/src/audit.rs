//! The audit envelope embedded in every entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Common audit columns carried by every table.
///
/// `deleted_at` is the soft-delete marker: a set value means the record
/// is logically removed and excluded from default reads. `deleted_by`
/// is always stamped before `deleted_at`. Actor ids of 0 mean the write
/// happened without an authenticated actor in context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AuditFields {
    /// Primary key (BIGSERIAL; 0 until persisted).
    pub id: i64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last-update time.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Id of the actor that created the record (0 = unset).
    pub created_by: i64,
    /// Id of the actor that last updated the record (0 = unset).
    pub updated_by: i64,
    /// Id of the actor that soft-deleted the record.
    pub deleted_by: Option<i64>,
    /// Active flag, defaults to true.
    pub is_active: bool,
}

impl Default for AuditFields {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            created_by: 0,
            updated_by: 0,
            deleted_by: None,
            is_active: true,
        }
    }
}

impl AuditFields {
    /// Whether the record carries the soft-delete marker.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Explicit audit-field access implemented by every entity.
///
/// The repository layer stamps actor ids through these methods instead
/// of looking fields up by name at runtime.
pub trait Audited {
    /// The embedded audit envelope.
    fn audit(&self) -> &AuditFields;
    /// Mutable access to the embedded audit envelope.
    fn audit_mut(&mut self) -> &mut AuditFields;

    /// The primary key (0 until persisted).
    fn id(&self) -> i64 {
        self.audit().id
    }

    /// Stamp the creating actor.
    fn set_created_by(&mut self, actor_id: i64) {
        self.audit_mut().created_by = actor_id;
    }

    /// Stamp the last-updating actor.
    fn set_updated_by(&mut self, actor_id: i64) {
        self.audit_mut().updated_by = actor_id;
    }

    /// Stamp the deleting actor.
    fn set_deleted_by(&mut self, actor_id: i64) {
        self.audit_mut().deleted_by = Some(actor_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let audit = AuditFields::default();
        assert_eq!(audit.id, 0);
        assert!(audit.is_active);
        assert!(!audit.is_deleted());
        assert_eq!(audit.created_by, 0);
        assert_eq!(audit.deleted_by, None);
    }

    struct Probe {
        audit: AuditFields,
    }

    impl Audited for Probe {
        fn audit(&self) -> &AuditFields {
            &self.audit
        }
        fn audit_mut(&mut self) -> &mut AuditFields {
            &mut self.audit
        }
    }

    #[test]
    fn test_actor_stamping() {
        let mut probe = Probe {
            audit: AuditFields::default(),
        };
        probe.set_created_by(3);
        probe.set_updated_by(4);
        probe.set_deleted_by(5);
        assert_eq!(probe.audit.created_by, 3);
        assert_eq!(probe.audit.updated_by, 4);
        assert_eq!(probe.audit.deleted_by, Some(5));
    }
}
