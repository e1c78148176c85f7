//! The generic soft-deleting repository engine.
//!
//! [`BaseRepository<T>`] provides the uniform data-access contract shared
//! by every entity: paginated listing with allow-listed sorting, CRUD,
//! bulk operations, audit stamping from the actor context, and soft
//! deletes (stamp `deleted_by`, then set `deleted_at`). Hard physical
//! deletion is never exposed.
//!
//! Actor rules: create/update stamp the actor when one is present and
//! proceed silently when not; the delete family hard-requires a nonzero
//! actor and fails with `MissingActor` before touching the store. Bulk
//! operations never open an implicit transaction — callers needing
//! atomicity must supply their own transactional scope.

use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use bizdir_core::context::ActorContext;
use bizdir_core::error::{AppError, ErrorKind};
use bizdir_core::result::AppResult;
use bizdir_core::types::field::{FieldMap, FieldValue};
use bizdir_core::types::pagination::{DEFAULT_SORT_BY, ListParams};
use bizdir_core::types::sorting::SortDirection;
use bizdir_entity::Entity;

use crate::scope::QueryScope;

/// Sort columns every repository accepts unless overridden.
const DEFAULT_SORT_COLUMNS: &[&str] = &["id", "created_at"];

/// Generic repository over a single entity's table.
#[derive(Debug, Clone)]
pub struct BaseRepository<T: Entity> {
    pool: PgPool,
    allowed_sort_columns: &'static [&'static str],
    preload: bool,
    _entity: PhantomData<T>,
}

impl<T: Entity> BaseRepository<T> {
    /// Create a repository bound to the given pool with default settings.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            allowed_sort_columns: DEFAULT_SORT_COLUMNS,
            preload: false,
            _entity: PhantomData,
        }
    }

    /// Replace the sort-column allow-list.
    pub fn with_sort_columns(mut self, columns: &'static [&'static str]) -> Self {
        self.allowed_sort_columns = columns;
        self
    }

    /// Eagerly load declared relations on every read.
    pub fn with_preloads(mut self) -> Self {
        self.preload = true;
        self
    }

    /// List entities matching the given scopes, sorted and paginated.
    ///
    /// Issues a count query first and short-circuits to an empty page
    /// when nothing matches; the fetch query is never run in that case.
    /// A `sort_by` outside the allow-list falls back to the default sort
    /// column, and an `order_by` that is not `asc`/`desc` falls back to
    /// ascending.
    pub async fn get_all(
        &self,
        params: &ListParams,
        scopes: &[QueryScope],
    ) -> AppResult<(Vec<T>, i64)> {
        let mut count_qb = QueryBuilder::new(format!(
            "SELECT COUNT(*) FROM {} WHERE deleted_at IS NULL",
            T::TABLE
        ));
        for scope in scopes {
            scope(&mut count_qb);
        }
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to count {}", T::TABLE),
                    e,
                )
            })?;

        if total == 0 {
            return Ok((Vec::new(), 0));
        }

        let sort_column = self.resolve_sort_column(&params.sort_by);
        let direction = SortDirection::parse(&params.order_by);

        let mut qb = QueryBuilder::new(format!(
            "SELECT * FROM {} WHERE deleted_at IS NULL",
            T::TABLE
        ));
        for scope in scopes {
            scope(&mut qb);
        }
        qb.push(format!(" ORDER BY {sort_column} {}", direction.as_sql()));
        qb.push(" LIMIT ");
        qb.push_bind(params.per_page);
        qb.push(" OFFSET ");
        qb.push_bind(params.offset());

        let mut rows: Vec<T> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to list {}", T::TABLE),
                    e,
                )
            })?;

        if self.preload {
            T::load_relations_many(&mut rows, &self.pool).await?;
        }

        Ok((rows, total))
    }

    /// Fetch a single entity by primary key.
    pub async fn get_by_id(&self, id: i64) -> AppResult<T> {
        let mut entity = self.fetch_by_id(id).await?;
        if self.preload {
            entity.load_relations(&self.pool).await?;
        }
        Ok(entity)
    }

    /// Insert a new entity, stamping audit fields from the context.
    ///
    /// With an anonymous context the actor columns stay at zero; the
    /// insert still proceeds.
    pub async fn create(&self, actor: &ActorContext, entity: &mut T) -> AppResult<()> {
        stamp_for_create(entity, actor, Utc::now());
        self.insert(entity).await
    }

    /// Insert a new entity together with its owned relations.
    pub async fn create_with_relations(
        &self,
        actor: &ActorContext,
        entity: &mut T,
    ) -> AppResult<()> {
        self.create(actor, entity).await?;
        entity.save_relations(&self.pool, actor).await
    }

    /// Insert a batch of entities. The first error aborts; rows already
    /// inserted are not rolled back.
    pub async fn bulk_create(&self, actor: &ActorContext, entities: &mut [T]) -> AppResult<()> {
        for entity in entities.iter_mut() {
            self.create(actor, entity).await?;
        }
        Ok(())
    }

    /// Batch variant of [`Self::create_with_relations`].
    pub async fn bulk_create_with_relations(
        &self,
        actor: &ActorContext,
        entities: &mut [T],
    ) -> AppResult<()> {
        for entity in entities.iter_mut() {
            self.create_with_relations(actor, entity).await?;
        }
        Ok(())
    }

    /// Apply a keyed partial update.
    ///
    /// Injects `updated_by` into the change set when an actor is
    /// present. Fails with `NotFound` when no live row matched.
    pub async fn update(
        &self,
        actor: &ActorContext,
        id: i64,
        mut changes: FieldMap,
    ) -> AppResult<()> {
        if !actor.is_anonymous() {
            changes.insert("updated_by", actor.user_id);
        }

        let mut qb = partial_update_builder::<T>(Utc::now(), &changes);
        qb.push(" WHERE deleted_at IS NULL AND id = ");
        qb.push_bind(id);

        let result = qb.build().execute(&self.pool).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to update {}", T::TABLE),
                e,
            )
        })?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "{} {id} not found",
                T::TABLE
            )));
        }
        debug!(table = T::TABLE, id, "applied partial update");
        Ok(())
    }

    /// Full save: replace every domain column and cascade to owned
    /// relations (replace semantics, not merge).
    pub async fn update_with_relations(
        &self,
        actor: &ActorContext,
        entity: &mut T,
    ) -> AppResult<()> {
        self.full_save(actor, entity).await?;
        entity.save_relations(&self.pool, actor).await
    }

    /// Apply a partial update across all rows matching the condition.
    /// Fails with `NotFound` when no live row matched.
    pub async fn bulk_update(
        &self,
        actor: &ActorContext,
        condition: &FieldMap,
        mut changes: FieldMap,
    ) -> AppResult<()> {
        if !actor.is_anonymous() {
            changes.insert("updated_by", actor.user_id);
        }

        let mut qb = partial_update_builder::<T>(Utc::now(), &changes);
        qb.push(" WHERE deleted_at IS NULL");
        push_condition(&mut qb, condition);

        let result = qb.build().execute(&self.pool).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to bulk-update {}", T::TABLE),
                e,
            )
        })?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "no {} rows matched the condition",
                T::TABLE
            )));
        }
        Ok(())
    }

    /// Full-save each entity in turn; the first failure aborts and is
    /// returned immediately.
    pub async fn bulk_update_with_relations(
        &self,
        actor: &ActorContext,
        entities: &mut [T],
    ) -> AppResult<()> {
        for entity in entities.iter_mut() {
            self.update_with_relations(actor, entity).await?;
        }
        Ok(())
    }

    /// Soft-delete a single entity.
    ///
    /// Requires a nonzero actor: losing "who deleted this" is treated as
    /// unacceptable, unlike the best-effort stamping on create/update.
    /// Stamps `deleted_by` strictly before setting the soft-delete
    /// marker.
    pub async fn delete(&self, actor: &ActorContext, id: i64) -> AppResult<()> {
        let actor_id = self.require_actor(actor)?;
        self.fetch_by_id(id).await?;
        self.stamp_deleted_by(id, actor_id).await?;
        self.mark_deleted(&[id], Utc::now()).await?;
        debug!(table = T::TABLE, id, actor_id, "soft-deleted record");
        Ok(())
    }

    /// Soft-delete an entity and cascade to its owned relations.
    pub async fn delete_with_relations(&self, actor: &ActorContext, id: i64) -> AppResult<()> {
        let actor_id = self.require_actor(actor)?;
        let mut entity = self.fetch_by_id(id).await?;
        entity.load_relations(&self.pool).await?;

        let now = Utc::now();
        self.stamp_deleted_by(id, actor_id).await?;
        self.mark_deleted(&[id], now).await?;
        self.cascade_soft_delete(&[id], actor_id, now).await?;
        debug!(table = T::TABLE, id, actor_id, "soft-deleted record with relations");
        Ok(())
    }

    /// Soft-delete every row matching the condition, one row at a time.
    ///
    /// Each row's delete is independent: a failure partway leaves
    /// earlier rows deleted and later rows untouched.
    pub async fn bulk_delete(&self, actor: &ActorContext, condition: &FieldMap) -> AppResult<()> {
        let actor_id = self.require_actor(actor)?;

        let mut qb = QueryBuilder::new(format!(
            "SELECT * FROM {} WHERE deleted_at IS NULL",
            T::TABLE
        ));
        push_condition(&mut qb, condition);
        let rows: Vec<T> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to load {} for bulk delete", T::TABLE),
                    e,
                )
            })?;
        if rows.is_empty() {
            return Err(AppError::not_found(format!(
                "no {} rows matched the condition",
                T::TABLE
            )));
        }

        for row in &rows {
            self.stamp_deleted_by(row.id(), actor_id).await?;
            self.mark_deleted(&[row.id()], Utc::now()).await?;
        }
        debug!(table = T::TABLE, rows = rows.len(), actor_id, "bulk soft delete");
        Ok(())
    }

    /// Soft-delete the given id set and cascade to owned relations.
    ///
    /// Stamps each row individually, then issues one batched update for
    /// the soft-delete marker and one per owned child table.
    pub async fn bulk_delete_with_relations(
        &self,
        actor: &ActorContext,
        ids: &[i64],
    ) -> AppResult<()> {
        let actor_id = self.require_actor(actor)?;

        let mut qb = QueryBuilder::new(format!(
            "SELECT * FROM {} WHERE deleted_at IS NULL AND id = ANY(",
            T::TABLE
        ));
        qb.push_bind(ids.to_vec());
        qb.push(")");
        let rows: Vec<T> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to load {} for bulk delete", T::TABLE),
                    e,
                )
            })?;
        if rows.is_empty() {
            return Err(AppError::not_found(format!(
                "no {} rows matched the given ids",
                T::TABLE
            )));
        }

        let found: Vec<i64> = rows.iter().map(|row| row.id()).collect();
        for id in &found {
            self.stamp_deleted_by(*id, actor_id).await?;
        }
        let now = Utc::now();
        self.mark_deleted(&found, now).await?;
        self.cascade_soft_delete(&found, actor_id, now).await?;
        debug!(table = T::TABLE, rows = found.len(), actor_id, "bulk soft delete with relations");
        Ok(())
    }

    /// Count all live rows.
    pub async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM {} WHERE deleted_at IS NULL",
            T::TABLE
        ))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to count {}", T::TABLE),
                e,
            )
        })
    }

    /// Count live rows matching the condition.
    pub async fn count_by_condition(&self, condition: &FieldMap) -> AppResult<i64> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT COUNT(*) FROM {} WHERE deleted_at IS NULL",
            T::TABLE
        ));
        push_condition(&mut qb, condition);
        qb.build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to count {}", T::TABLE),
                    e,
                )
            })
    }

    fn resolve_sort_column(&self, requested: &str) -> String {
        if self.allowed_sort_columns.contains(&requested) {
            requested.to_string()
        } else {
            DEFAULT_SORT_BY.to_string()
        }
    }

    fn require_actor(&self, actor: &ActorContext) -> AppResult<i64> {
        if actor.is_anonymous() {
            return Err(AppError::missing_actor(format!(
                "delete on {} requires an authenticated actor",
                T::TABLE
            )));
        }
        Ok(actor.user_id)
    }

    async fn fetch_by_id(&self, id: i64) -> AppResult<T> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT * FROM {} WHERE deleted_at IS NULL AND id = ",
            T::TABLE
        ));
        qb.push_bind(id);
        qb.build_query_as()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to fetch {} by id", T::TABLE),
                    e,
                )
            })?
            .ok_or_else(|| AppError::not_found(format!("{} {id} not found", T::TABLE)))
    }

    async fn insert(&self, entity: &mut T) -> AppResult<()> {
        let mut qb = insert_builder(entity);
        let id: i64 = qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to create {}", T::TABLE),
                    e,
                )
            })?;
        entity.audit_mut().id = id;
        debug!(table = T::TABLE, id, "created record");
        Ok(())
    }

    async fn full_save(&self, actor: &ActorContext, entity: &mut T) -> AppResult<()> {
        entity.audit_mut().updated_at = Utc::now();
        if !actor.is_anonymous() {
            entity.set_updated_by(actor.user_id);
        }

        let mut qb = full_save_builder(entity);
        let result = qb.build().execute(&self.pool).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to save {}", T::TABLE),
                e,
            )
        })?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "{} {} not found",
                T::TABLE,
                entity.id()
            )));
        }
        Ok(())
    }

    async fn stamp_deleted_by(&self, id: i64, actor_id: i64) -> AppResult<()> {
        sqlx::query(&format!(
            "UPDATE {} SET deleted_by = $1, updated_by = $1 WHERE id = $2 AND deleted_at IS NULL",
            T::TABLE
        ))
        .bind(actor_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to stamp deleted_by on {}", T::TABLE),
                e,
            )
        })?;
        Ok(())
    }

    async fn mark_deleted(&self, ids: &[i64], now: DateTime<Utc>) -> AppResult<()> {
        sqlx::query(&format!(
            "UPDATE {} SET deleted_at = $1, updated_at = $1 WHERE id = ANY($2) AND deleted_at IS NULL",
            T::TABLE
        ))
        .bind(now)
        .bind(ids.to_vec())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to soft-delete {}", T::TABLE),
                e,
            )
        })?;
        Ok(())
    }

    async fn cascade_soft_delete(
        &self,
        parent_ids: &[i64],
        actor_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        for relation in T::owned_relations() {
            sqlx::query(&format!(
                "UPDATE {} SET deleted_by = $1, updated_by = $1, deleted_at = $2, updated_at = $2 \
                 WHERE {} = ANY($3) AND deleted_at IS NULL",
                relation.table, relation.foreign_key
            ))
            .bind(actor_id)
            .bind(now)
            .bind(parent_ids.to_vec())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to cascade soft delete to {}", relation.table),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

/// Stamp creation-time audit fields; actor columns only when present.
fn stamp_for_create<T: Entity>(entity: &mut T, actor: &ActorContext, now: DateTime<Utc>) {
    let audit = entity.audit_mut();
    audit.created_at = now;
    audit.updated_at = now;
    if !actor.is_anonymous() {
        entity.set_created_by(actor.user_id);
        entity.set_updated_by(actor.user_id);
    }
}

/// Bind a dynamic value into the builder (`NULL` is pushed literally).
fn push_value(qb: &mut QueryBuilder<'static, Postgres>, value: &FieldValue) {
    match value {
        FieldValue::String(s) => {
            qb.push_bind(s.clone());
        }
        FieldValue::Integer(i) => {
            qb.push_bind(*i);
        }
        FieldValue::Float(f) => {
            qb.push_bind(*f);
        }
        FieldValue::Boolean(b) => {
            qb.push_bind(*b);
        }
        FieldValue::Null => {
            qb.push("NULL");
        }
    }
}

/// Append `AND column = value` fragments for an equality condition map.
fn push_condition(qb: &mut QueryBuilder<'static, Postgres>, condition: &FieldMap) {
    for (column, value) in condition.iter() {
        match value {
            FieldValue::Null => {
                qb.push(format!(" AND {column} IS NULL"));
            }
            _ => {
                qb.push(format!(" AND {column} = "));
                push_value(qb, value);
            }
        }
    }
}

/// Build the audited `INSERT ... RETURNING id` statement for an entity.
fn insert_builder<T: Entity>(entity: &T) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "INSERT INTO {} (created_at, updated_at, created_by, updated_by, is_active",
        T::TABLE
    ));
    for column in T::COLUMNS {
        qb.push(format!(", {column}"));
    }
    qb.push(") VALUES (");

    let audit = entity.audit();
    let values = entity.values();
    {
        let mut row = qb.separated(", ");
        row.push_bind(audit.created_at);
        row.push_bind(audit.updated_at);
        row.push_bind(audit.created_by);
        row.push_bind(audit.updated_by);
        row.push_bind(audit.is_active);
        for value in values {
            match value {
                FieldValue::String(s) => {
                    row.push_bind(s);
                }
                FieldValue::Integer(i) => {
                    row.push_bind(i);
                }
                FieldValue::Float(f) => {
                    row.push_bind(f);
                }
                FieldValue::Boolean(b) => {
                    row.push_bind(b);
                }
                FieldValue::Null => {
                    row.push("NULL");
                }
            }
        }
    }
    qb.push(") RETURNING id");
    qb
}

/// Build the `UPDATE ... SET updated_at = .., <changes>` prefix shared by
/// the partial-update paths; the caller appends the `WHERE` clause.
fn partial_update_builder<T: Entity>(
    now: DateTime<Utc>,
    changes: &FieldMap,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("UPDATE {} SET updated_at = ", T::TABLE));
    qb.push_bind(now);
    for (column, value) in changes.iter() {
        qb.push(format!(", {column} = "));
        push_value(&mut qb, value);
    }
    qb
}

/// Build the full-save `UPDATE` replacing every domain column.
fn full_save_builder<T: Entity>(entity: &T) -> QueryBuilder<'static, Postgres> {
    let audit = entity.audit();
    let mut qb = QueryBuilder::new(format!("UPDATE {} SET updated_at = ", T::TABLE));
    qb.push_bind(audit.updated_at);
    qb.push(", updated_by = ");
    qb.push_bind(audit.updated_by);
    qb.push(", is_active = ");
    qb.push_bind(audit.is_active);
    for (column, value) in T::COLUMNS.iter().zip(entity.values()) {
        qb.push(format!(", {column} = "));
        push_value(&mut qb, &value);
    }
    qb.push(" WHERE deleted_at IS NULL AND id = ");
    qb.push_bind(audit.id);
    qb
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizdir_entity::{Business, UserType};
    use sqlx::postgres::PgPoolOptions;

    fn lazy_pool() -> PgPool {
        // Never connects; guard tests must fail before any I/O.
        PgPoolOptions::new()
            .connect_lazy("postgres://bizdir@localhost:5432/bizdir_test")
            .expect("valid connection url")
    }

    fn repo() -> BaseRepository<UserType> {
        BaseRepository::new(lazy_pool()).with_sort_columns(&["id", "name"])
    }

    #[tokio::test]
    async fn test_resolve_sort_column_allows_listed() {
        assert_eq!(repo().resolve_sort_column("name"), "name");
        assert_eq!(repo().resolve_sort_column("id"), "id");
    }

    #[tokio::test]
    async fn test_resolve_sort_column_falls_back() {
        assert_eq!(repo().resolve_sort_column("password_hash"), "id");
        assert_eq!(repo().resolve_sort_column("name; DROP TABLE users"), "id");
        assert_eq!(repo().resolve_sort_column(""), "id");
    }

    #[test]
    fn test_insert_builder_sql() {
        let user_type = UserType::new("admin");
        let qb = insert_builder(&user_type);
        assert_eq!(
            qb.sql(),
            "INSERT INTO user_types (created_at, updated_at, created_by, updated_by, is_active, name) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id"
        );
    }

    #[test]
    fn test_partial_update_builder_sql() {
        let changes = FieldMap::new()
            .set("title", "Ada Cafe")
            .set("description", FieldValue::Null);
        let qb = partial_update_builder::<Business>(Utc::now(), &changes);
        assert_eq!(
            qb.sql(),
            "UPDATE businesses SET updated_at = $1, title = $2, description = NULL"
        );
    }

    #[test]
    fn test_full_save_builder_sql() {
        let mut user_type = UserType::new("admin");
        user_type.audit.id = 9;
        let qb = full_save_builder(&user_type);
        assert_eq!(
            qb.sql(),
            "UPDATE user_types SET updated_at = $1, updated_by = $2, is_active = $3, name = $4 \
             WHERE deleted_at IS NULL AND id = $5"
        );
    }

    #[test]
    fn test_push_condition_sql() {
        let condition = FieldMap::new()
            .set("is_active", false)
            .set("user_type_id", FieldValue::Null);
        let mut qb: QueryBuilder<'static, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM users WHERE deleted_at IS NULL");
        push_condition(&mut qb, &condition);
        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM users WHERE deleted_at IS NULL AND is_active = $1 AND user_type_id IS NULL"
        );
    }

    #[test]
    fn test_stamp_for_create_with_actor() {
        let mut user_type = UserType::new("admin");
        let actor = ActorContext::authenticated(3, "admin@example.com", 1);
        stamp_for_create(&mut user_type, &actor, Utc::now());
        assert_eq!(user_type.audit.created_by, 3);
        assert_eq!(user_type.audit.updated_by, 3);
    }

    #[test]
    fn test_stamp_for_create_anonymous_leaves_zero() {
        let mut user_type = UserType::new("admin");
        stamp_for_create(&mut user_type, &ActorContext::anonymous(), Utc::now());
        assert_eq!(user_type.audit.created_by, 0);
        assert_eq!(user_type.audit.updated_by, 0);
    }

    #[tokio::test]
    async fn test_delete_requires_actor() {
        let err = repo().delete(&ActorContext::anonymous(), 1).await.unwrap_err();
        assert!(err.is_kind(ErrorKind::MissingActor));
    }

    #[tokio::test]
    async fn test_delete_with_relations_requires_actor() {
        let err = repo()
            .delete_with_relations(&ActorContext::anonymous(), 1)
            .await
            .unwrap_err();
        assert!(err.is_kind(ErrorKind::MissingActor));
    }

    #[tokio::test]
    async fn test_bulk_delete_requires_actor() {
        let condition = FieldMap::new().set("is_active", false);
        let err = repo()
            .bulk_delete(&ActorContext::anonymous(), &condition)
            .await
            .unwrap_err();
        assert!(err.is_kind(ErrorKind::MissingActor));
    }

    #[tokio::test]
    async fn test_bulk_delete_with_relations_requires_actor() {
        let err = repo()
            .bulk_delete_with_relations(&ActorContext::anonymous(), &[1, 2])
            .await
            .unwrap_err();
        assert!(err.is_kind(ErrorKind::MissingActor));
    }
}
