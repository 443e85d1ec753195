//! Folder repository implementation.

use sqlx::PgPool;

use testcmdr_core::error::{AppError, ErrorKind};
use testcmdr_core::result::AppResult;
use testcmdr_core::types::{FolderId, ProjectId};
use testcmdr_entity::folder::{CreateFolder, Folder};

/// Repository for folder CRUD and tree queries.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a folder by ID.
    pub async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    /// List the immediate child folders of a parent (None = root level).
    pub async fn find_children(
        &self,
        project_id: ProjectId,
        parent_id: Option<FolderId>,
    ) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders \
             WHERE project_id = $1 AND parent_folder_id IS NOT DISTINCT FROM $2 \
             ORDER BY name ASC",
        )
        .bind(project_id)
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list child folders", e))
    }

    /// IDs of every ancestor of a folder, nearest first (exclusive of self).
    pub async fn ancestor_ids(&self, folder_id: FolderId) -> AppResult<Vec<FolderId>> {
        sqlx::query_scalar::<_, FolderId>(
            "WITH RECURSIVE ancestors AS ( \
                SELECT id, parent_folder_id, 0 AS hops FROM folders WHERE id = $1 \
                UNION ALL \
                SELECT f.id, f.parent_folder_id, a.hops + 1 \
                FROM folders f INNER JOIN ancestors a ON f.id = a.parent_folder_id \
             ) SELECT id FROM ancestors WHERE id != $1 ORDER BY hops ASC",
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find ancestors", e))
    }

    /// IDs of every descendant of a folder (exclusive of self).
    pub async fn descendant_ids(&self, folder_id: FolderId) -> AppResult<Vec<FolderId>> {
        sqlx::query_scalar::<_, FolderId>(
            "WITH RECURSIVE tree AS ( \
                SELECT id FROM folders WHERE id = $1 \
                UNION ALL \
                SELECT f.id FROM folders f INNER JOIN tree t ON f.parent_folder_id = t.id \
             ) SELECT id FROM tree WHERE id != $1",
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list descendants", e))
    }

    /// Create a new folder.
    pub async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (name, description, parent_folder_id, organization_id, project_id, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.parent_folder_id)
        .bind(data.organization_id)
        .bind(data.project_id)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create folder", e))
    }

    /// Rename a folder in place.
    pub async fn rename(&self, folder_id: FolderId, new_name: &str) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>("UPDATE folders SET name = $2 WHERE id = $1 RETURNING *")
            .bind(folder_id)
            .bind(new_name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename folder", e))?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }

    /// Reassign a folder's parent (None moves it to the project root).
    pub async fn move_folder(
        &self,
        folder_id: FolderId,
        new_parent_id: Option<FolderId>,
    ) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET parent_folder_id = $2 WHERE id = $1 RETURNING *",
        )
        .bind(folder_id)
        .bind(new_parent_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to move folder", e))?
        .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }

    /// Delete a folder (cascades to descendants and contained test cases).
    pub async fn delete(&self, folder_id: FolderId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(folder_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
