//! PostgreSQL implementation of the content collaborators.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{ContentEntity, EntityType};
use crate::domain::repositories::{EntityRepository, PathAliasRepository};
use crate::error::{AppError, map_sqlx_error};

/// Reads entities, translations and path aliases from the CMS tables.
pub struct PgContentRepository {
    pool: Arc<PgPool>,
}

impl PgContentRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityRepository for PgContentRepository {
    async fn load(
        &self,
        entity_type: EntityType,
        id: &str,
    ) -> Result<Option<ContentEntity>, AppError> {
        // Path segments like "edit" can never be entity ids.
        let Ok(numeric_id) = id.parse::<i64>() else {
            return Ok(None);
        };

        let label: Option<String> = sqlx::query_scalar(
            r#"
            SELECT label
            FROM content_entities
            WHERE entity_type = $1 AND id = $2
            "#,
        )
        .bind(entity_type.as_str())
        .bind(numeric_id)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        let Some(label) = label else {
            return Ok(None);
        };

        let translations: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT langcode
            FROM content_translations
            WHERE entity_type = $1 AND entity_id = $2
            ORDER BY langcode
            "#,
        )
        .bind(entity_type.as_str())
        .bind(numeric_id)
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(Some(ContentEntity {
            entity_type,
            id: numeric_id.to_string(),
            label,
            translations: translations.into_iter().collect(),
        }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}

#[async_trait]
impl PathAliasRepository for PgContentRepository {
    async fn resolve(&self, alias: &str) -> Result<String, AppError> {
        let path: Option<String> = sqlx::query_scalar(
            r#"
            SELECT path
            FROM path_aliases
            WHERE alias = $1
            "#,
        )
        .bind(alias)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(path.unwrap_or_else(|| alias.to_string()))
    }
}
