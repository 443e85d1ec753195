//! Project repository implementation.

use sqlx::PgPool;

use testcmdr_core::error::{AppError, ErrorKind};
use testcmdr_core::result::AppResult;
use testcmdr_core::types::{OrganizationId, ProjectId};
use testcmdr_entity::project::{CreateProject, Project};

/// Repository for projects.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// Create a new project repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a project by ID.
    pub async fn find_by_id(&self, id: ProjectId) -> AppResult<Option<Project>> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find project", e))
    }

    /// List an organization's projects.
    pub async fn find_by_org(&self, organization_id: OrganizationId) -> AppResult<Vec<Project>> {
        sqlx::query_as::<_, Project>(
            "SELECT * FROM projects WHERE organization_id = $1 ORDER BY name ASC",
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list projects", e))
    }

    /// Create a new project.
    pub async fn create(&self, data: &CreateProject) -> AppResult<Project> {
        sqlx::query_as::<_, Project>(
            "INSERT INTO projects (organization_id, name, description, created_by) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.organization_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create project", e))
    }
}
