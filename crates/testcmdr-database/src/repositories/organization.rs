//! Organization repository implementation.

use sqlx::PgPool;

use testcmdr_core::error::{AppError, ErrorKind};
use testcmdr_core::result::AppResult;
use testcmdr_core::types::OrganizationId;
use testcmdr_entity::organization::{CreateOrganization, Organization};

/// Repository for organizations.
#[derive(Debug, Clone)]
pub struct OrganizationRepository {
    pool: PgPool,
}

impl OrganizationRepository {
    /// Create a new organization repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an organization by ID.
    pub async fn find_by_id(&self, id: OrganizationId) -> AppResult<Option<Organization>> {
        sqlx::query_as::<_, Organization>("SELECT * FROM organizations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find organization", e)
            })
    }

    /// List all organizations.
    pub async fn find_all(&self) -> AppResult<Vec<Organization>> {
        sqlx::query_as::<_, Organization>("SELECT * FROM organizations ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list organizations", e)
            })
    }

    /// Create a new organization.
    pub async fn create(&self, data: &CreateOrganization) -> AppResult<Organization> {
        sqlx::query_as::<_, Organization>(
            "INSERT INTO organizations (name, description, created_by) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create organization", e))
    }
}
