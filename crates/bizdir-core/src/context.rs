//! Actor context: the identity of the principal on whose behalf the
//! current operation executes.
//!
//! The context is populated once per request after authentication (or
//! guest resolution) succeeds and is read-only afterwards. Rather than
//! smuggling it through an ambient task-local, it is passed explicitly
//! to every mutating repository call. The repository layer uses it to
//! stamp the audit columns (`created_by`, `updated_by`, `deleted_by`).

use serde::{Deserialize, Serialize};

/// The acting principal for the current operation.
///
/// A `user_id` of 0 means anonymous/unauthenticated. The audit-stamping
/// rules tolerate anonymity everywhere except the delete family, which
/// hard-requires a nonzero actor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorContext {
    /// The acting user's id (0 = anonymous).
    pub user_id: i64,
    /// The acting user's email, if authenticated.
    pub email: String,
    /// The acting user's type id (0 = none).
    pub user_type_id: i64,
}

impl ActorContext {
    /// Context for an authenticated principal.
    pub fn authenticated(user_id: i64, email: impl Into<String>, user_type_id: i64) -> Self {
        Self {
            user_id,
            email: email.into(),
            user_type_id,
        }
    }

    /// The zero-value context used for unauthenticated requests.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Whether there is no authenticated actor behind this context.
    pub fn is_anonymous(&self) -> bool {
        self.user_id == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_is_zero_value() {
        let ctx = ActorContext::anonymous();
        assert_eq!(ctx.user_id, 0);
        assert!(ctx.email.is_empty());
        assert!(ctx.is_anonymous());
    }

    #[test]
    fn test_authenticated_actor() {
        let ctx = ActorContext::authenticated(3, "admin@example.com", 1);
        assert!(!ctx.is_anonymous());
        assert_eq!(ctx.user_id, 3);
        assert_eq!(ctx.user_type_id, 1);
    }
}
