//! Project administration.

use std::sync::Arc;

use tracing::info;

use testcmdr_auth::{Permission, RbacEnforcer};
use testcmdr_core::AppResult;
use testcmdr_core::error::AppError;
use testcmdr_core::types::{OrganizationId, ProjectId};
use testcmdr_database::repositories::project::ProjectRepository;
use testcmdr_entity::project::{CreateProject, Project};

use crate::context::RequestContext;

/// Manages projects within an organization.
pub struct ProjectService {
    project_repo: Arc<ProjectRepository>,
    enforcer: Arc<RbacEnforcer>,
}

impl ProjectService {
    /// Creates a new project service.
    pub fn new(project_repo: Arc<ProjectRepository>, enforcer: Arc<RbacEnforcer>) -> Self {
        Self {
            project_repo,
            enforcer,
        }
    }

    /// Gets a project by ID.
    pub async fn get_project(&self, ctx: &RequestContext, id: ProjectId) -> AppResult<Project> {
        self.enforcer
            .require_permission(&ctx.roles, Permission::ProjectView)?;
        let project = self
            .project_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))?;
        self.enforcer
            .require_org_access(&ctx.roles, ctx.organization_id, project.organization_id)?;
        Ok(project)
    }

    /// Lists an organization's projects.
    pub async fn list_by_org(
        &self,
        ctx: &RequestContext,
        organization_id: OrganizationId,
    ) -> AppResult<Vec<Project>> {
        self.enforcer
            .require_permission(&ctx.roles, Permission::ProjectView)?;
        self.enforcer
            .require_org_access(&ctx.roles, ctx.organization_id, organization_id)?;
        self.project_repo.find_by_org(organization_id).await
    }

    /// Creates a project.
    pub async fn create_project(
        &self,
        ctx: &RequestContext,
        data: CreateProject,
    ) -> AppResult<Project> {
        self.enforcer
            .require_permission(&ctx.roles, Permission::ProjectCreate)?;
        self.enforcer
            .require_org_access(&ctx.roles, ctx.organization_id, data.organization_id)?;
        if data.name.trim().is_empty() {
            return Err(AppError::validation("Project name cannot be empty"));
        }

        let project = self
            .project_repo
            .create(&CreateProject {
                organization_id: data.organization_id,
                name: data.name.trim().to_string(),
                description: data.description,
                created_by: Some(ctx.user_id),
            })
            .await?;
        info!(
            project_id = %project.id,
            organization_id = %project.organization_id,
            user_id = %ctx.user_id,
            "Created project"
        );
        Ok(project)
    }
}
