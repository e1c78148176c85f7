//! User repository.

use sqlx::PgPool;

use bizdir_core::context::ActorContext;
use bizdir_core::error::{AppError, ErrorKind};
use bizdir_core::result::AppResult;
use bizdir_core::types::field::FieldMap;
use bizdir_core::types::pagination::{ListParams, Paginated};
use bizdir_entity::User;

use crate::repository::BaseRepository;
use crate::scope::{self, QueryScope};

/// Sort columns accepted when listing users.
const SORT_COLUMNS: &[&str] = &["id", "name", "email", "created_at"];

/// Optional filters for the user listing.
#[derive(Debug, Clone, Default)]
pub struct UserListFilter {
    /// Substring match against the display name.
    pub name: Option<String>,
    /// Substring match against the email address.
    pub email: Option<String>,
    /// Exact match on the active flag.
    pub is_active: Option<bool>,
    /// Exact match on the assigned user type.
    pub user_type_id: Option<i64>,
}

impl UserListFilter {
    fn scopes(&self) -> Vec<QueryScope> {
        let mut scopes = Vec::new();
        if let Some(name) = &self.name {
            scopes.push(scope::ilike("name", name));
        }
        if let Some(email) = &self.email {
            scopes.push(scope::ilike("email", email));
        }
        if let Some(is_active) = self.is_active {
            scopes.push(scope::eq("is_active", is_active));
        }
        if let Some(user_type_id) = self.user_type_id {
            scopes.push(scope::eq("user_type_id", user_type_id));
        }
        scopes
    }
}

/// Repository for [`User`] records.
///
/// Reads preload the assigned user type into `user.user_type`.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
    base: BaseRepository<User>,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseRepository::new(pool.clone())
                .with_sort_columns(SORT_COLUMNS)
                .with_preloads(),
            pool,
        }
    }

    /// List users as a paginated envelope.
    pub async fn list(
        &self,
        mut params: ListParams,
        filter: &UserListFilter,
    ) -> AppResult<Paginated<User>> {
        params.apply_defaults();
        let (items, total) = self.base.get_all(&params, &filter.scopes()).await?;
        Ok(Paginated::new(items, total, params.page, params.per_page))
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<User> {
        self.base.get_by_id(id).await
    }

    /// Look a user up by exact email. Used by the login path.
    pub async fn find_by_email(&self, email: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email = $1 AND deleted_at IS NULL",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to fetch user by email", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("user with email {email} not found")))
    }

    pub async fn create(&self, actor: &ActorContext, user: &mut User) -> AppResult<()> {
        self.base.create(actor, user).await
    }

    pub async fn update(
        &self,
        actor: &ActorContext,
        id: i64,
        changes: FieldMap,
    ) -> AppResult<()> {
        self.base.update(actor, id, changes).await
    }

    pub async fn delete(&self, actor: &ActorContext, id: i64) -> AppResult<()> {
        self.base.delete(actor, id).await
    }

    /// Soft-delete every user matching the condition.
    pub async fn bulk_delete(&self, actor: &ActorContext, condition: &FieldMap) -> AppResult<()> {
        self.base.bulk_delete(actor, condition).await
    }

    pub async fn count(&self) -> AppResult<i64> {
        self.base.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::{Postgres, QueryBuilder};

    fn rendered(filter: &UserListFilter) -> String {
        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT * FROM users WHERE deleted_at IS NULL");
        for scope in &filter.scopes() {
            scope(&mut qb);
        }
        qb.sql().to_string()
    }

    #[test]
    fn test_full_filter_appends_all_scopes() {
        let filter = UserListFilter {
            name: Some("ada".to_string()),
            email: Some("@example.com".to_string()),
            is_active: Some(true),
            user_type_id: Some(2),
        };
        assert_eq!(
            rendered(&filter),
            "SELECT * FROM users WHERE deleted_at IS NULL \
             AND name ILIKE $1 AND email ILIKE $2 AND is_active = $3 AND user_type_id = $4"
        );
    }

    #[test]
    fn test_partial_filter_skips_unset_fields() {
        let filter = UserListFilter {
            email: Some("ada@".to_string()),
            ..Default::default()
        };
        assert_eq!(
            rendered(&filter),
            "SELECT * FROM users WHERE deleted_at IS NULL AND email ILIKE $1"
        );
    }
}
