//! Test case repository implementation.

use sqlx::PgPool;
use sqlx::types::Json;

use testcmdr_core::error::{AppError, ErrorKind};
use testcmdr_core::result::AppResult;
use testcmdr_core::types::{FolderId, ProjectId, TestCaseId};
use testcmdr_entity::testcase::{CreateTestCase, TestCase};

/// Repository for test case CRUD.
#[derive(Debug, Clone)]
pub struct TestCaseRepository {
    pool: PgPool,
}

impl TestCaseRepository {
    /// Create a new test case repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a test case by ID.
    pub async fn find_by_id(&self, id: TestCaseId) -> AppResult<Option<TestCase>> {
        sqlx::query_as::<_, TestCase>("SELECT * FROM test_cases WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find test case", e))
    }

    /// Find a test case by its user-visible display ID within a project.
    pub async fn find_by_tcid(
        &self,
        project_id: ProjectId,
        tcid: &str,
    ) -> AppResult<Option<TestCase>> {
        sqlx::query_as::<_, TestCase>(
            "SELECT * FROM test_cases WHERE project_id = $1 AND tcid = $2",
        )
        .bind(project_id)
        .bind(tcid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find test case", e))
    }

    /// List test cases in a folder. `None` explicitly queries the unfiled
    /// (root-level) cases, which the tree never surfaces by default.
    pub async fn find_by_folder(
        &self,
        project_id: ProjectId,
        folder_id: Option<FolderId>,
    ) -> AppResult<Vec<TestCase>> {
        sqlx::query_as::<_, TestCase>(
            "SELECT * FROM test_cases \
             WHERE project_id = $1 AND folder_id IS NOT DISTINCT FROM $2 \
             ORDER BY tcid ASC",
        )
        .bind(project_id)
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list test cases", e))
    }

    /// Create a new test case. The unique (project, tcid) index backs the
    /// server-side uniqueness guarantee under concurrent writers.
    pub async fn create(&self, data: &CreateTestCase) -> AppResult<TestCase> {
        sqlx::query_as::<_, TestCase>(
            "INSERT INTO test_cases \
             (tcid, name, description, author, test_type, test_type_code, priority, \
              prerequisites, tags, tags_snapshot, steps, folder_id, organization_id, \
              project_id, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING *",
        )
        .bind(&data.tcid)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.author)
        .bind(&data.test_type)
        .bind(&data.test_type_code)
        .bind(data.priority)
        .bind(&data.prerequisites)
        .bind(&data.tags)
        .bind(Json(&data.tags_snapshot))
        .bind(Json(&data.steps))
        .bind(data.folder_id)
        .bind(data.organization_id)
        .bind(data.project_id)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("test_cases_project_tcid_key") =>
            {
                AppError::conflict(format!("Test case id '{}' already exists", data.tcid))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create test case", e),
        })
    }

    /// Update a test case in place.
    pub async fn update(&self, case: &TestCase) -> AppResult<TestCase> {
        sqlx::query_as::<_, TestCase>(
            "UPDATE test_cases SET \
             name = $2, description = $3, author = $4, test_type = $5, test_type_code = $6, \
             priority = $7, overall_result = $8, prerequisites = $9, tags = $10, \
             tags_snapshot = $11, steps = $12, tcid = $13, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(case.id)
        .bind(&case.name)
        .bind(&case.description)
        .bind(&case.author)
        .bind(&case.test_type)
        .bind(&case.test_type_code)
        .bind(case.priority)
        .bind(case.overall_result)
        .bind(&case.prerequisites)
        .bind(&case.tags)
        .bind(Json(&case.tags_snapshot))
        .bind(Json(&case.steps))
        .bind(&case.tcid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update test case", e))?
        .ok_or_else(|| AppError::not_found(format!("Test case {} not found", case.id)))
    }

    /// Reassign a test case's folder.
    pub async fn move_case(&self, id: TestCaseId, folder_id: Option<FolderId>) -> AppResult<TestCase> {
        sqlx::query_as::<_, TestCase>(
            "UPDATE test_cases SET folder_id = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(folder_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to move test case", e))?
        .ok_or_else(|| AppError::not_found(format!("Test case {id} not found")))
    }

    /// Delete a test case.
    pub async fn delete(&self, id: TestCaseId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM test_cases WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete test case", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
