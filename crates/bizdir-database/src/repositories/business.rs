//! Business repository.
//!
//! Businesses own their gallery entries, so this repository exposes the
//! `*_with_relations` family: creates and full saves cascade to the
//! gallery rows, deletes soft-delete them alongside the parent.

use sqlx::PgPool;

use bizdir_core::context::ActorContext;
use bizdir_core::error::{AppError, ErrorKind};
use bizdir_core::result::AppResult;
use bizdir_core::types::field::FieldMap;
use bizdir_core::types::pagination::{ListParams, Paginated};
use bizdir_entity::{Business, Entity};

use crate::repository::BaseRepository;
use crate::scope::{self, QueryScope};

/// Sort columns accepted when listing businesses.
const SORT_COLUMNS: &[&str] = &["id", "title", "slug", "created_at"];

/// Optional filters for the business listing.
#[derive(Debug, Clone, Default)]
pub struct BusinessListFilter {
    /// Substring match against the title.
    pub title: Option<String>,
    /// Exact match on the URL slug.
    pub slug: Option<String>,
    /// Exact match on the directory category.
    pub business_type_id: Option<i64>,
    /// Exact match on the owning user.
    pub user_id: Option<i64>,
    /// Exact match on the active flag.
    pub is_active: Option<bool>,
}

impl BusinessListFilter {
    fn scopes(&self) -> Vec<QueryScope> {
        let mut scopes = Vec::new();
        if let Some(title) = &self.title {
            scopes.push(scope::ilike("title", title));
        }
        if let Some(slug) = &self.slug {
            scopes.push(scope::eq("slug", slug.clone()));
        }
        if let Some(business_type_id) = self.business_type_id {
            scopes.push(scope::eq("business_type_id", business_type_id));
        }
        if let Some(user_id) = self.user_id {
            scopes.push(scope::eq("user_id", user_id));
        }
        if let Some(is_active) = self.is_active {
            scopes.push(scope::eq("is_active", is_active));
        }
        scopes
    }
}

/// Repository for [`Business`] records.
///
/// Reads preload the business type and gallery entries.
#[derive(Debug, Clone)]
pub struct BusinessRepository {
    pool: PgPool,
    base: BaseRepository<Business>,
}

impl BusinessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseRepository::new(pool.clone())
                .with_sort_columns(SORT_COLUMNS)
                .with_preloads(),
            pool,
        }
    }

    /// List businesses as a paginated envelope.
    pub async fn list(
        &self,
        mut params: ListParams,
        filter: &BusinessListFilter,
    ) -> AppResult<Paginated<Business>> {
        params.apply_defaults();
        let (items, total) = self.base.get_all(&params, &filter.scopes()).await?;
        Ok(Paginated::new(items, total, params.page, params.per_page))
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Business> {
        self.base.get_by_id(id).await
    }

    /// Look a business up by its URL slug, relations included.
    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Business> {
        let mut business = sqlx::query_as::<_, Business>(
            "SELECT * FROM businesses WHERE slug = $1 AND deleted_at IS NULL",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to fetch business by slug", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("business with slug {slug} not found")))?;
        business.load_relations(&self.pool).await?;
        Ok(business)
    }

    /// Insert a business and its gallery entries.
    pub async fn create(&self, actor: &ActorContext, business: &mut Business) -> AppResult<()> {
        self.base.create_with_relations(actor, business).await
    }

    /// Insert several businesses with their galleries. Not transactional.
    pub async fn bulk_create(
        &self,
        actor: &ActorContext,
        businesses: &mut [Business],
    ) -> AppResult<()> {
        self.base.bulk_create_with_relations(actor, businesses).await
    }

    /// Keyed partial update of the business row only.
    pub async fn update(
        &self,
        actor: &ActorContext,
        id: i64,
        changes: FieldMap,
    ) -> AppResult<()> {
        self.base.update(actor, id, changes).await
    }

    /// Full save: replace every column and upsert the gallery entries.
    pub async fn save(&self, actor: &ActorContext, business: &mut Business) -> AppResult<()> {
        self.base.update_with_relations(actor, business).await
    }

    /// Full-save each business in turn.
    pub async fn bulk_save(
        &self,
        actor: &ActorContext,
        businesses: &mut [Business],
    ) -> AppResult<()> {
        self.base.bulk_update_with_relations(actor, businesses).await
    }

    /// Soft-delete a business and its gallery entries.
    pub async fn delete(&self, actor: &ActorContext, id: i64) -> AppResult<()> {
        self.base.delete_with_relations(actor, id).await
    }

    /// Soft-delete the given businesses and their gallery entries.
    pub async fn bulk_delete(&self, actor: &ActorContext, ids: &[i64]) -> AppResult<()> {
        self.base.bulk_delete_with_relations(actor, ids).await
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
    fn test_filter_scope_order_is_stable() {
        let filter = BusinessListFilter {
            title: Some("cafe".to_string()),
            business_type_id: Some(4),
            is_active: Some(true),
            ..Default::default()
        };
        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM businesses WHERE deleted_at IS NULL");
        for scope in &filter.scopes() {
            scope(&mut qb);
        }
        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM businesses WHERE deleted_at IS NULL \
             AND title ILIKE $1 AND business_type_id = $2 AND is_active = $3"
        );
    }
}
