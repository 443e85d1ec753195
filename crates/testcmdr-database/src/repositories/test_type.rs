//! Test-type catalog repository implementation.

use sqlx::PgPool;

use testcmdr_core::error::{AppError, ErrorKind};
use testcmdr_core::result::AppResult;
use testcmdr_core::types::OrganizationId;
use testcmdr_entity::testtype::{GlobalTestType, OrgTestType};

/// Repository for the global test-type catalog and per-organization overlays.
#[derive(Debug, Clone)]
pub struct TestTypeRepository {
    pool: PgPool,
}

impl TestTypeRepository {
    /// Create a new test-type repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List the global catalog.
    pub async fn find_globals(&self) -> AppResult<Vec<GlobalTestType>> {
        sqlx::query_as::<_, GlobalTestType>("SELECT * FROM global_test_types ORDER BY code ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list global test types", e)
            })
    }

    /// List an organization's enablement/override entries.
    pub async fn find_org_entries(
        &self,
        organization_id: OrganizationId,
    ) -> AppResult<Vec<OrgTestType>> {
        sqlx::query_as::<_, OrgTestType>(
            "SELECT * FROM org_test_types WHERE organization_id = $1 ORDER BY code ASC",
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list org test types", e)
        })
    }

    /// Insert or replace an organization's entry for a code.
    pub async fn upsert_org_entry(&self, entry: &OrgTestType) -> AppResult<OrgTestType> {
        sqlx::query_as::<_, OrgTestType>(
            "INSERT INTO org_test_types \
             (organization_id, code, enabled, name_override, description_override, icon_override) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (organization_id, code) DO UPDATE SET \
             enabled = EXCLUDED.enabled, name_override = EXCLUDED.name_override, \
             description_override = EXCLUDED.description_override, \
             icon_override = EXCLUDED.icon_override \
             RETURNING *",
        )
        .bind(entry.organization_id)
        .bind(&entry.code)
        .bind(entry.enabled)
        .bind(&entry.name_override)
        .bind(&entry.description_override)
        .bind(&entry.icon_override)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("org_test_types_code_fkey") =>
            {
                AppError::not_found(format!("Unknown test type code '{}'", entry.code))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to upsert org test type", e),
        })
    }

    /// Rename a global catalog entry (maintenance-script path).
    pub async fn rename_global(&self, code: &str, new_name: &str) -> AppResult<GlobalTestType> {
        sqlx::query_as::<_, GlobalTestType>(
            "UPDATE global_test_types SET name = $2 WHERE code = $1 RETURNING *",
        )
        .bind(code)
        .bind(new_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename test type", e))?
        .ok_or_else(|| AppError::not_found(format!("Unknown test type code '{code}'")))
    }
}
