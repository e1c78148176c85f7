//! User entity model.

use std::collections::HashMap;

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use bizdir_core::error::{AppError, ErrorKind};
use bizdir_core::result::AppResult;
use bizdir_core::types::field::FieldValue;

use crate::audit::{AuditFields, Audited};
use crate::entity::Entity;
use crate::user_type::UserType;

/// A registered user account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Audit envelope.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: AuditFields,
    /// Display name.
    pub name: String,
    /// Unique email address.
    pub email: String,
    /// Argon2id password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Assigned user type, if any.
    pub user_type_id: Option<i64>,
    /// Password-reset token, set while a reset is pending.
    pub reset_token: Option<String>,
    /// Whether the email address has been verified.
    pub email_verified: bool,
    /// Email-verification token, set until verification completes.
    pub verification_token: Option<String>,
    /// OAuth provider name (e.g. `google`), if externally authenticated.
    pub provider: Option<String>,
    /// OAuth provider's subject id.
    pub provider_id: Option<String>,

    /// Preloaded user type relation.
    #[sqlx(skip)]
    pub user_type: Option<UserType>,
}

impl User {
    /// Create a new, unpersisted user.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// Hash the given plaintext with Argon2id and store it on the user.
    pub fn set_password(&mut self, password: &str) -> AppResult<()> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;
        self.password_hash = hash.to_string();
        Ok(())
    }

    /// Verify a plaintext password against the stored hash.
    ///
    /// Returns `Ok(true)` if the password matches, `Ok(false)` if not.
    pub fn verify_password(&self, password: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(&self.password_hash)
            .map_err(|e| AppError::authentication(format!("Invalid password hash format: {e}")))?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::authentication(format!(
                "Password verification failed: {e}"
            ))),
        }
    }
}

impl Audited for User {
    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditFields {
        &mut self.audit
    }
}

#[async_trait]
impl Entity for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "email",
        "password_hash",
        "user_type_id",
        "reset_token",
        "email_verified",
        "verification_token",
        "provider",
        "provider_id",
    ];

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::from(self.name.clone()),
            FieldValue::from(self.email.clone()),
            FieldValue::from(self.password_hash.clone()),
            FieldValue::from(self.user_type_id),
            FieldValue::from(self.reset_token.clone()),
            FieldValue::from(self.email_verified),
            FieldValue::from(self.verification_token.clone()),
            FieldValue::from(self.provider.clone()),
            FieldValue::from(self.provider_id.clone()),
        ]
    }

    async fn load_relations(&mut self, pool: &PgPool) -> AppResult<()> {
        if let Some(type_id) = self.user_type_id {
            self.user_type = sqlx::query_as::<_, UserType>(
                "SELECT * FROM user_types WHERE id = $1 AND deleted_at IS NULL",
            )
            .bind(type_id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load user type", e)
            })?;
        }
        Ok(())
    }

    async fn load_relations_many(rows: &mut [Self], pool: &PgPool) -> AppResult<()>
    where
        Self: Sized,
    {
        let type_ids: Vec<i64> = rows.iter().filter_map(|user| user.user_type_id).collect();
        if type_ids.is_empty() {
            return Ok(());
        }

        let types: Vec<UserType> =
            sqlx::query_as("SELECT * FROM user_types WHERE id = ANY($1) AND deleted_at IS NULL")
                .bind(&type_ids)
                .fetch_all(pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to load user types", e)
                })?;
        let by_id: HashMap<i64, UserType> = types
            .into_iter()
            .map(|user_type| (user_type.audit.id, user_type))
            .collect();

        for user in rows.iter_mut() {
            user.user_type = user.user_type_id.and_then(|id| by_id.get(&id).cloned());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_align_with_columns() {
        let user = User::new("Ada", "ada@example.com");
        assert_eq!(user.values().len(), User::COLUMNS.len());
    }

    #[test]
    fn test_password_round_trip() {
        let mut user = User::new("Ada", "ada@example.com");
        user.set_password("correct horse").unwrap();
        assert_ne!(user.password_hash, "correct horse");
        assert!(user.verify_password("correct horse").unwrap());
        assert!(!user.verify_password("wrong battery").unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        let user = User::new("Ada", "ada@example.com");
        assert!(user.verify_password("anything").is_err());
    }
}
