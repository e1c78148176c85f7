//! Business entity model.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use bizdir_core::context::ActorContext;
use bizdir_core::error::{AppError, ErrorKind};
use bizdir_core::result::AppResult;
use bizdir_core::types::field::FieldValue;

use crate::audit::{AuditFields, Audited};
use crate::business_type::BusinessType;
use crate::entity::{Entity, RelationDef};
use crate::gallery::Gallery;

/// Child tables that follow a business through a cascading soft delete.
const OWNED_RELATIONS: &[RelationDef] = &[RelationDef {
    table: "galleries",
    foreign_key: "business_id",
}];

/// A directory listing for a single business.
///
/// Owns its gallery entries (1:N, cascaded) and belongs to a
/// [`BusinessType`] (preloaded, never cascaded).
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct Business {
    /// Audit envelope.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: AuditFields,
    /// Owning user's id.
    pub user_id: i64,
    /// Directory category id.
    pub business_type_id: i64,
    /// Unique URL slug.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Long-form description.
    pub description: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact telephone number.
    pub telephone: Option<String>,
    /// Public website URL.
    pub website: Option<String>,

    /// Preloaded business type relation.
    #[sqlx(skip)]
    pub business_type: Option<BusinessType>,
    /// Owned gallery entries.
    #[sqlx(skip)]
    pub galleries: Vec<Gallery>,
}

impl Business {
    /// Create a new, unpersisted business listing.
    pub fn new(
        user_id: i64,
        business_type_id: i64,
        slug: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            business_type_id,
            slug: slug.into(),
            title: title.into(),
            ..Self::default()
        }
    }
}

impl Audited for Business {
    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditFields {
        &mut self.audit
    }
}

#[async_trait]
impl Entity for Business {
    const TABLE: &'static str = "businesses";
    const COLUMNS: &'static [&'static str] = &[
        "user_id",
        "business_type_id",
        "slug",
        "title",
        "description",
        "email",
        "telephone",
        "website",
    ];

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::from(self.user_id),
            FieldValue::from(self.business_type_id),
            FieldValue::from(self.slug.clone()),
            FieldValue::from(self.title.clone()),
            FieldValue::from(self.description.clone()),
            FieldValue::from(self.email.clone()),
            FieldValue::from(self.telephone.clone()),
            FieldValue::from(self.website.clone()),
        ]
    }

    fn owned_relations() -> &'static [RelationDef] {
        OWNED_RELATIONS
    }

    async fn load_relations(&mut self, pool: &PgPool) -> AppResult<()> {
        self.business_type = sqlx::query_as::<_, BusinessType>(
            "SELECT * FROM business_types WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(self.business_type_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load business type", e)
        })?;

        self.galleries = sqlx::query_as::<_, Gallery>(
            "SELECT * FROM galleries WHERE business_id = $1 AND deleted_at IS NULL ORDER BY id",
        )
        .bind(self.audit.id)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load galleries", e))?;

        Ok(())
    }

    async fn load_relations_many(rows: &mut [Self], pool: &PgPool) -> AppResult<()>
    where
        Self: Sized,
    {
        if rows.is_empty() {
            return Ok(());
        }

        let type_ids: Vec<i64> = rows.iter().map(|business| business.business_type_id).collect();
        let types: Vec<BusinessType> = sqlx::query_as(
            "SELECT * FROM business_types WHERE id = ANY($1) AND deleted_at IS NULL",
        )
        .bind(&type_ids)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load business types", e)
        })?;
        let types_by_id: HashMap<i64, BusinessType> = types
            .into_iter()
            .map(|business_type| (business_type.audit.id, business_type))
            .collect();

        let ids: Vec<i64> = rows.iter().map(|business| business.audit.id).collect();
        let galleries: Vec<Gallery> = sqlx::query_as(
            "SELECT * FROM galleries \
             WHERE business_id = ANY($1) AND deleted_at IS NULL ORDER BY business_id, id",
        )
        .bind(&ids)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load galleries", e))?;
        let mut galleries_by_business: HashMap<i64, Vec<Gallery>> = HashMap::new();
        for gallery in galleries {
            galleries_by_business
                .entry(gallery.business_id)
                .or_default()
                .push(gallery);
        }

        for business in rows.iter_mut() {
            business.business_type = types_by_id.get(&business.business_type_id).cloned();
            business.galleries = galleries_by_business
                .remove(&business.audit.id)
                .unwrap_or_default();
        }
        Ok(())
    }

    async fn save_relations(&mut self, pool: &PgPool, actor: &ActorContext) -> AppResult<()> {
        let now = Utc::now();
        let business_id = self.audit.id;

        for gallery in &mut self.galleries {
            gallery.business_id = business_id;
            gallery.audit.updated_at = now;
            if !actor.is_anonymous() {
                gallery.set_updated_by(actor.user_id);
            }

            if gallery.audit.id == 0 {
                gallery.audit.created_at = now;
                if !actor.is_anonymous() {
                    gallery.set_created_by(actor.user_id);
                }
                let id: i64 = sqlx::query_scalar(
                    "INSERT INTO galleries \
                     (created_at, updated_at, created_by, updated_by, is_active, business_id, image, kind) \
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING id",
                )
                .bind(gallery.audit.created_at)
                .bind(gallery.audit.updated_at)
                .bind(gallery.audit.created_by)
                .bind(gallery.audit.updated_by)
                .bind(gallery.audit.is_active)
                .bind(gallery.business_id)
                .bind(&gallery.image)
                .bind(&gallery.kind)
                .fetch_one(pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to create gallery", e)
                })?;
                gallery.audit.id = id;
            } else {
                sqlx::query(
                    "UPDATE galleries SET updated_at = $1, updated_by = $2, is_active = $3, \
                     business_id = $4, image = $5, kind = $6 \
                     WHERE id = $7 AND deleted_at IS NULL",
                )
                .bind(gallery.audit.updated_at)
                .bind(gallery.audit.updated_by)
                .bind(gallery.audit.is_active)
                .bind(gallery.business_id)
                .bind(&gallery.image)
                .bind(&gallery.kind)
                .bind(gallery.audit.id)
                .execute(pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to save gallery", e)
                })?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_align_with_columns() {
        let business = Business::new(1, 2, "ada-cafe", "Ada Cafe");
        assert_eq!(business.values().len(), Business::COLUMNS.len());
    }

    #[test]
    fn test_owned_relations_declare_galleries() {
        let relations = Business::owned_relations();
        assert_eq!(relations.len(), 1);
        assert_eq!(relations[0].table, "galleries");
        assert_eq!(relations[0].foreign_key, "business_id");
    }
}
