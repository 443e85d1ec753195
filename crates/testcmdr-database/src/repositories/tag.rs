//! Tag repository implementation.

use sqlx::PgPool;

use testcmdr_core::error::{AppError, ErrorKind};
use testcmdr_core::result::AppResult;
use testcmdr_core::types::{OrganizationId, TagId};
use testcmdr_entity::tag::{Tag, UpsertTag};

/// Repository for organization-scoped tags.
#[derive(Debug, Clone)]
pub struct TagRepository {
    pool: PgPool,
}

impl TagRepository {
    /// Create a new tag repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List an organization's tags. `include_deleted` also returns
    /// soft-deleted entries.
    pub async fn find_by_org(
        &self,
        organization_id: OrganizationId,
        include_deleted: bool,
    ) -> AppResult<Vec<Tag>> {
        sqlx::query_as::<_, Tag>(
            "SELECT * FROM tags \
             WHERE organization_id = $1 AND (is_deleted = FALSE OR $2) \
             ORDER BY name ASC",
        )
        .bind(organization_id)
        .bind(include_deleted)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tags", e))
    }

    /// Find a tag by ID.
    pub async fn find_by_id(&self, id: TagId) -> AppResult<Option<Tag>> {
        sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find tag", e))
    }

    /// Create a tag, or update name/color when `data.id` is set.
    pub async fn upsert(&self, data: &UpsertTag) -> AppResult<Tag> {
        match data.id {
            Some(id) => sqlx::query_as::<_, Tag>(
                "UPDATE tags SET name = $2, color = $3 WHERE id = $1 RETURNING *",
            )
            .bind(id)
            .bind(&data.name)
            .bind(&data.color)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update tag", e))?
            .ok_or_else(|| AppError::not_found(format!("Tag {id} not found"))),
            None => sqlx::query_as::<_, Tag>(
                "INSERT INTO tags (organization_id, name, color) VALUES ($1, $2, $3) RETURNING *",
            )
            .bind(data.organization_id)
            .bind(&data.name)
            .bind(&data.color)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err)
                    if db_err.constraint() == Some("tags_org_name_key") =>
                {
                    AppError::conflict(format!("Tag '{}' already exists", data.name))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to create tag", e),
            }),
        }
    }

    /// Soft-delete a tag. Existing test-case references keep rendering
    /// from their snapshots.
    pub async fn soft_delete(&self, id: TagId) -> AppResult<bool> {
        let result = sqlx::query("UPDATE tags SET is_deleted = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete tag", e))?;
        Ok(result.rows_affected() > 0)
    }
}
