//! Test case CRUD with server-side tcid uniqueness and tag snapshots.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use testcmdr_auth::{Permission, RbacEnforcer};
use testcmdr_core::AppResult;
use testcmdr_core::error::AppError;
use testcmdr_core::types::{FolderId, OrganizationId, ProjectId, TagId, TestCaseId};
use testcmdr_database::repositories::folder::FolderRepository;
use testcmdr_database::repositories::project::ProjectRepository;
use testcmdr_database::repositories::tag::TagRepository;
use testcmdr_database::repositories::test_case::TestCaseRepository;
use testcmdr_entity::tag::TagSnapshot;
use testcmdr_entity::testcase::{CreateTestCase, TestCase};
use testcmdr_tree::strip_html;

use crate::context::RequestContext;
use crate::scope;

/// Manages test case CRUD operations.
pub struct TestCaseService {
    case_repo: Arc<TestCaseRepository>,
    tag_repo: Arc<TagRepository>,
    project_repo: Arc<ProjectRepository>,
    folder_repo: Arc<FolderRepository>,
    enforcer: Arc<RbacEnforcer>,
}

impl TestCaseService {
    /// Creates a new test case service.
    pub fn new(
        case_repo: Arc<TestCaseRepository>,
        tag_repo: Arc<TagRepository>,
        project_repo: Arc<ProjectRepository>,
        folder_repo: Arc<FolderRepository>,
        enforcer: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            case_repo,
            tag_repo,
            project_repo,
            folder_repo,
            enforcer,
        }
    }

    /// Gets a test case by ID.
    pub async fn get_case(&self, ctx: &RequestContext, id: TestCaseId) -> AppResult<TestCase> {
        let case = self
            .case_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Test case not found"))?;
        self.enforcer
            .require_permission(&ctx.roles, Permission::TestCaseView)?;
        self.enforcer
            .require_org_access(&ctx.roles, ctx.organization_id, case.organization_id)?;
        Ok(case)
    }

    /// Lists the test cases in a folder. `None` explicitly queries the
    /// unfiled cases, which the tree itself never shows.
    pub async fn list_by_folder(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        folder_id: Option<FolderId>,
    ) -> AppResult<Vec<TestCase>> {
        let project = self
            .project_repo
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))?;
        scope::authorize_project(&self.enforcer, ctx, &project, Permission::TestCaseView)?;
        self.case_repo.find_by_folder(project_id, folder_id).await
    }

    /// Creates a test case. Enforces tcid uniqueness within the project
    /// server-side and captures a tag snapshot for render resilience.
    /// The body's organization and folder must agree with the project.
    pub async fn create_case(
        &self,
        ctx: &RequestContext,
        mut data: CreateTestCase,
    ) -> AppResult<TestCase> {
        let project = self
            .project_repo
            .find_by_id(data.project_id)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))?;
        scope::ensure_org_owns_project(&project, data.organization_id)?;
        scope::authorize_project(&self.enforcer, ctx, &project, Permission::TestCaseManage)?;
        if let Some(folder_id) = data.folder_id {
            let folder = self
                .folder_repo
                .find_by_id(folder_id)
                .await?
                .ok_or_else(|| AppError::not_found("Folder not found"))?;
            scope::ensure_folder_in_project(&folder, data.project_id)?;
        }
        validate_case_fields(&data.tcid, &data.name, &data.description, &data.author)?;

        if self
            .case_repo
            .find_by_tcid(data.project_id, data.tcid.trim())
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "Test case id '{}' already exists in this project",
                data.tcid.trim()
            )));
        }

        data.tcid = data.tcid.trim().to_string();
        data.tags_snapshot = self.snapshot(data.organization_id, &data.tags).await?;
        renumber(&mut data.steps);

        // The unique (project, tcid) index is the real guarantee under
        // concurrent writers; the lookup above just gives a cleaner error.
        let case = self.case_repo.create(&data).await?;
        info!(
            case_id = %case.id,
            tcid = %case.tcid,
            user_id = %ctx.user_id,
            "Created test case"
        );
        Ok(case)
    }

    /// Updates a test case in place, refreshing the tag snapshot and
    /// renumbering steps.
    pub async fn update_case(
        &self,
        ctx: &RequestContext,
        mut case: TestCase,
    ) -> AppResult<TestCase> {
        let existing = self.get_case(ctx, case.id).await?;
        self.enforcer
            .require_permission(&ctx.roles, Permission::TestCaseManage)?;
        validate_case_fields(&case.tcid, &case.name, &case.description, &case.author)?;

        // Ownership is not editable through this path; moves go through
        // move_case, which validates the target folder.
        case.project_id = existing.project_id;
        case.organization_id = existing.organization_id;
        case.folder_id = existing.folder_id;

        if case.tcid != existing.tcid
            && self
                .case_repo
                .find_by_tcid(case.project_id, &case.tcid)
                .await?
                .is_some()
        {
            return Err(AppError::conflict(format!(
                "Test case id '{}' already exists in this project",
                case.tcid
            )));
        }

        case.tags_snapshot = self.snapshot(case.organization_id, &case.tags).await?;
        case.renumber_steps();

        let updated = self.case_repo.update(&case).await?;
        info!(case_id = %updated.id, user_id = %ctx.user_id, "Updated test case");
        Ok(updated)
    }

    /// Deletes a test case.
    pub async fn delete_case(&self, ctx: &RequestContext, id: TestCaseId) -> AppResult<()> {
        self.get_case(ctx, id).await?;
        self.enforcer
            .require_permission(&ctx.roles, Permission::TestCaseManage)?;

        let deleted = self.case_repo.delete(id).await?;
        if !deleted {
            return Err(AppError::not_found("Test case not found"));
        }
        info!(case_id = %id, user_id = %ctx.user_id, "Deleted test case");
        Ok(())
    }

    /// Moves a test case into a folder of the same project.
    pub async fn move_case(
        &self,
        ctx: &RequestContext,
        id: TestCaseId,
        folder_id: FolderId,
    ) -> AppResult<TestCase> {
        let case = self.get_case(ctx, id).await?;
        self.enforcer
            .require_permission(&ctx.roles, Permission::TestCaseManage)?;
        let folder = self
            .folder_repo
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;
        scope::ensure_folder_in_project(&folder, case.project_id)?;
        let moved = self.case_repo.move_case(id, Some(folder_id)).await?;
        info!(case_id = %id, folder_id = %folder_id, "Moved test case");
        Ok(moved)
    }

    async fn snapshot(
        &self,
        organization_id: OrganizationId,
        tags: &[TagId],
    ) -> AppResult<HashMap<TagId, TagSnapshot>> {
        if tags.is_empty() {
            return Ok(HashMap::new());
        }
        let live = self.tag_repo.find_by_org(organization_id, true).await?;
        Ok(live
            .iter()
            .filter(|t| tags.contains(&t.id))
            .map(|t| (t.id, TagSnapshot::from(t)))
            .collect())
    }
}

fn validate_case_fields(tcid: &str, name: &str, description: &str, author: &str) -> AppResult<()> {
    if tcid.trim().is_empty() {
        return Err(AppError::validation("Test case id cannot be empty"));
    }
    if name.trim().is_empty() {
        return Err(AppError::validation("Test case name cannot be empty"));
    }
    if strip_html(description).is_empty() {
        return Err(AppError::validation("Description cannot be empty"));
    }
    if author.trim().is_empty() {
        return Err(AppError::validation("Author cannot be empty"));
    }
    Ok(())
}

fn renumber(steps: &mut [testcmdr_entity::testcase::TestStep]) {
    for (idx, step) in steps.iter_mut().enumerate() {
        step.step_number = idx as u32 + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_only_description_is_rejected() {
        let err =
            validate_case_fields("TC-1", "Login", "<p>&nbsp;</p>", "Morgan").unwrap_err();
        assert_eq!(err.kind, testcmdr_core::error::ErrorKind::Validation);

        assert!(validate_case_fields("TC-1", "Login", "<p>checks</p>", "Morgan").is_ok());
    }

    #[test]
    fn test_blank_required_fields_are_rejected() {
        assert!(validate_case_fields("  ", "n", "d", "a").is_err());
        assert!(validate_case_fields("t", "", "d", "a").is_err());
        assert!(validate_case_fields("t", "n", "d", " ").is_err());
    }
}
