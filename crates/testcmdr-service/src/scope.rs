//! Cross-entity ownership checks shared by the services.
//!
//! Path parameters and body fields name rows independently, so every
//! project-scoped operation re-anchors on the project row and verifies
//! that each referenced folder or test case actually belongs to it
//! before reading or writing anything.

use testcmdr_auth::{Permission, RbacEnforcer};
use testcmdr_core::AppResult;
use testcmdr_core::error::AppError;
use testcmdr_core::types::{OrganizationId, ProjectId};
use testcmdr_entity::folder::Folder;
use testcmdr_entity::project::Project;
use testcmdr_entity::testcase::TestCase;

use crate::context::RequestContext;

/// Role and organization gate for one project-scoped operation.
pub(crate) fn authorize_project(
    enforcer: &RbacEnforcer,
    ctx: &RequestContext,
    project: &Project,
    permission: Permission,
) -> AppResult<()> {
    enforcer.require_permission(&ctx.roles, permission)?;
    enforcer.require_org_access(&ctx.roles, ctx.organization_id, project.organization_id)?;
    Ok(())
}

/// Rejects a body-supplied organization that does not own the project.
pub(crate) fn ensure_org_owns_project(
    project: &Project,
    organization_id: OrganizationId,
) -> AppResult<()> {
    if project.organization_id != organization_id {
        return Err(AppError::validation(
            "Organization does not own this project",
        ));
    }
    Ok(())
}

/// A folder referenced by a project-scoped operation must belong to it.
/// Reported as not-found so foreign ids do not leak existence.
pub(crate) fn ensure_folder_in_project(folder: &Folder, project_id: ProjectId) -> AppResult<()> {
    if folder.project_id != project_id {
        return Err(AppError::not_found("Folder not found in this project"));
    }
    Ok(())
}

/// A test case referenced by a project-scoped operation must belong to it.
pub(crate) fn ensure_case_in_project(case: &TestCase, project_id: ProjectId) -> AppResult<()> {
    if case.project_id != project_id {
        return Err(AppError::not_found("Test case not found in this project"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use testcmdr_core::error::ErrorKind;
    use testcmdr_core::types::{FolderId, UserId};
    use testcmdr_entity::user::RoleTag;

    fn project_in(org: OrganizationId) -> Project {
        Project {
            id: ProjectId::new(),
            organization_id: org,
            name: "Payments".to_string(),
            description: None,
            created_by: None,
            created_at: Utc::now(),
        }
    }

    fn folder_in(project_id: ProjectId, org: OrganizationId) -> Folder {
        Folder {
            id: FolderId::new(),
            name: "Regression".to_string(),
            description: None,
            parent_folder_id: None,
            organization_id: org,
            project_id,
            created_by: None,
            created_at: Utc::now(),
        }
    }

    fn ctx_in(org: OrganizationId, roles: Vec<RoleTag>) -> RequestContext {
        RequestContext::new(UserId::new(), Some(org), roles, "Morgan".to_string())
    }

    #[test]
    fn test_viewing_another_orgs_project_is_denied() {
        let enforcer = RbacEnforcer::new();
        let org_a = OrganizationId::new();
        let org_b = OrganizationId::new();
        let project = project_in(org_a);
        let ctx = ctx_in(org_b, vec![RoleTag::TestEngineer]);

        let err = authorize_project(&enforcer, &ctx, &project, Permission::TestCaseView)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[test]
    fn test_app_admin_crosses_organizations() {
        let enforcer = RbacEnforcer::new();
        let project = project_in(OrganizationId::new());
        let ctx = ctx_in(OrganizationId::new(), vec![RoleTag::AppAdmin]);

        assert!(
            authorize_project(&enforcer, &ctx, &project, Permission::TestCaseView).is_ok()
        );
    }

    #[test]
    fn test_body_org_must_own_the_project() {
        let project = project_in(OrganizationId::new());

        assert!(ensure_org_owns_project(&project, project.organization_id).is_ok());

        let err = ensure_org_owns_project(&project, OrganizationId::new()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_foreign_project_folder_reads_as_missing() {
        let org = OrganizationId::new();
        let project_id = ProjectId::new();
        let folder = folder_in(project_id, org);

        assert!(ensure_folder_in_project(&folder, project_id).is_ok());

        let err = ensure_folder_in_project(&folder, ProjectId::new()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
