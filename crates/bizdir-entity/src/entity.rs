//! The `Entity` trait wiring entity models into the generic repository.

use async_trait::async_trait;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

use bizdir_core::context::ActorContext;
use bizdir_core::result::AppResult;
use bizdir_core::types::field::FieldValue;

use crate::audit::Audited;

/// Describes a child table owned by an entity.
///
/// Owned relations receive the cascading soft delete: rows whose
/// `foreign_key` points at a deleted parent are marked deleted with it.
/// Owning (belongs-to) relations are never cascaded; they only take part
/// in preloading.
#[derive(Debug, Clone, Copy)]
pub struct RelationDef {
    /// The child table name.
    pub table: &'static str,
    /// The child column referencing the parent's id.
    pub foreign_key: &'static str,
}

/// A persistable record combining the audit envelope with domain columns.
///
/// `COLUMNS` and `values()` must stay aligned: they drive the generated
/// `INSERT` column list and the full-save `SET` clause. Audit columns are
/// handled by the repository and must not appear in `COLUMNS`.
#[async_trait]
pub trait Entity:
    Audited + for<'r> FromRow<'r, PgRow> + Serialize + Unpin + Send + Sync + 'static
{
    /// The backing table name.
    const TABLE: &'static str;

    /// Domain columns written on insert and full save.
    const COLUMNS: &'static [&'static str];

    /// Current values, aligned index-for-index with [`Self::COLUMNS`].
    fn values(&self) -> Vec<FieldValue>;

    /// Child tables that follow this entity through a cascading soft delete.
    fn owned_relations() -> &'static [RelationDef] {
        &[]
    }

    /// Eagerly load declared relations into the entity's skipped fields.
    async fn load_relations(&mut self, _pool: &PgPool) -> AppResult<()> {
        Ok(())
    }

    /// Batch-load declared relations for a page of rows.
    ///
    /// The default delegates to [`Self::load_relations`] per row; entities
    /// with relations override it with keyed batch queries so a listing
    /// costs a fixed number of queries regardless of page size.
    async fn load_relations_many(rows: &mut [Self], pool: &PgPool) -> AppResult<()>
    where
        Self: Sized,
    {
        for row in rows.iter_mut() {
            row.load_relations(pool).await?;
        }
        Ok(())
    }

    /// Persist owned relations after a full save of the parent.
    async fn save_relations(&mut self, _pool: &PgPool, _actor: &ActorContext) -> AppResult<()> {
        Ok(())
    }
}
