//! User-type repository.

use sqlx::PgPool;

use bizdir_core::context::ActorContext;
use bizdir_core::result::AppResult;
use bizdir_core::types::field::FieldMap;
use bizdir_core::types::pagination::{ListParams, Paginated};
use bizdir_entity::UserType;

use crate::repository::BaseRepository;
use crate::scope::{self, QueryScope};

/// Sort columns accepted when listing user types.
const SORT_COLUMNS: &[&str] = &["id", "name"];

/// Optional filters for the user-type listing.
#[derive(Debug, Clone, Default)]
pub struct UserTypeListFilter {
    /// Substring match against the type name.
    pub name: Option<String>,
    /// Exact match on the active flag.
    pub is_active: Option<bool>,
}

impl UserTypeListFilter {
    fn scopes(&self) -> Vec<QueryScope> {
        let mut scopes = Vec::new();
        if let Some(name) = &self.name {
            scopes.push(scope::ilike("name", name));
        }
        if let Some(is_active) = self.is_active {
            scopes.push(scope::eq("is_active", is_active));
        }
        scopes
    }
}

/// Repository for [`UserType`] records.
#[derive(Debug, Clone)]
pub struct UserTypeRepository {
    base: BaseRepository<UserType>,
}

impl UserTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseRepository::new(pool).with_sort_columns(SORT_COLUMNS),
        }
    }

    /// List user types as a paginated envelope.
    pub async fn list(
        &self,
        mut params: ListParams,
        filter: &UserTypeListFilter,
    ) -> AppResult<Paginated<UserType>> {
        params.apply_defaults();
        let (items, total) = self.base.get_all(&params, &filter.scopes()).await?;
        Ok(Paginated::new(items, total, params.page, params.per_page))
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<UserType> {
        self.base.get_by_id(id).await
    }

    pub async fn create(&self, actor: &ActorContext, user_type: &mut UserType) -> AppResult<()> {
        self.base.create(actor, user_type).await
    }

    /// Seed or import several types at once. Not transactional.
    pub async fn bulk_create(
        &self,
        actor: &ActorContext,
        user_types: &mut [UserType],
    ) -> AppResult<()> {
        self.base.bulk_create(actor, user_types).await
    }

    pub async fn update(
        &self,
        actor: &ActorContext,
        id: i64,
        changes: FieldMap,
    ) -> AppResult<()> {
        self.base.update(actor, id, changes).await
    }

    /// Apply the same change set to every type matching the condition.
    pub async fn bulk_update(
        &self,
        actor: &ActorContext,
        condition: &FieldMap,
        changes: FieldMap,
    ) -> AppResult<()> {
        self.base.bulk_update(actor, condition, changes).await
    }

    pub async fn delete(&self, actor: &ActorContext, id: i64) -> AppResult<()> {
        self.base.delete(actor, id).await
    }

    pub async fn count(&self) -> AppResult<i64> {
        self.base.count().await
    }

    pub async fn count_by_condition(&self, condition: &FieldMap) -> AppResult<i64> {
        self.base.count_by_condition(condition).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::{Postgres, QueryBuilder};

    #[test]
    fn test_empty_filter_builds_no_scopes() {
        assert!(UserTypeListFilter::default().scopes().is_empty());
    }

    #[test]
    fn test_name_filter_appends_ilike() {
        let filter = UserTypeListFilter {
            name: Some("adm".to_string()),
            ..Default::default()
        };
        let scopes = filter.scopes();
        assert_eq!(scopes.len(), 1);

        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM user_types WHERE deleted_at IS NULL");
        for scope in &scopes {
            scope(&mut qb);
        }
        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM user_types WHERE deleted_at IS NULL AND name ILIKE $1"
        );
    }
}
