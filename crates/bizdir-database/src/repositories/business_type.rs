//! Business-type repository.

use sqlx::PgPool;

use bizdir_core::context::ActorContext;
use bizdir_core::result::AppResult;
use bizdir_core::types::field::FieldMap;
use bizdir_core::types::pagination::{ListParams, Paginated};
use bizdir_entity::BusinessType;

use crate::repository::BaseRepository;
use crate::scope::{self, QueryScope};

/// Sort columns accepted when listing business types.
const SORT_COLUMNS: &[&str] = &["id", "name"];

/// Optional filters for the business-type listing.
#[derive(Debug, Clone, Default)]
pub struct BusinessTypeListFilter {
    /// Substring match against the type name.
    pub name: Option<String>,
    /// Exact match on the active flag.
    pub is_active: Option<bool>,
}

impl BusinessTypeListFilter {
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

/// Repository for [`BusinessType`] records.
#[derive(Debug, Clone)]
pub struct BusinessTypeRepository {
    base: BaseRepository<BusinessType>,
}

impl BusinessTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseRepository::new(pool).with_sort_columns(SORT_COLUMNS),
        }
    }

    /// List business types as a paginated envelope.
    pub async fn list(
        &self,
        mut params: ListParams,
        filter: &BusinessTypeListFilter,
    ) -> AppResult<Paginated<BusinessType>> {
        params.apply_defaults();
        let (items, total) = self.base.get_all(&params, &filter.scopes()).await?;
        Ok(Paginated::new(items, total, params.page, params.per_page))
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<BusinessType> {
        self.base.get_by_id(id).await
    }

    pub async fn create(
        &self,
        actor: &ActorContext,
        business_type: &mut BusinessType,
    ) -> AppResult<()> {
        self.base.create(actor, business_type).await
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

    pub async fn count(&self) -> AppResult<i64> {
        self.base.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::{Postgres, QueryBuilder};

    #[test]
    fn test_filter_appends_scopes_in_order() {
        let filter = BusinessTypeListFilter {
            name: Some("resta".to_string()),
            is_active: Some(true),
        };
        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM business_types WHERE deleted_at IS NULL");
        for scope in &filter.scopes() {
            scope(&mut qb);
        }
        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM business_types WHERE deleted_at IS NULL \
             AND name ILIKE $1 AND is_active = $2"
        );
    }
}
