//! Organization administration.

use std::sync::Arc;

use tracing::info;

use testcmdr_auth::{Permission, RbacEnforcer};
use testcmdr_core::AppResult;
use testcmdr_core::error::AppError;
use testcmdr_core::types::OrganizationId;
use testcmdr_database::repositories::organization::OrganizationRepository;
use testcmdr_entity::organization::{CreateOrganization, Organization};

use crate::context::RequestContext;

/// Manages tenant organizations.
pub struct OrganizationService {
    org_repo: Arc<OrganizationRepository>,
    enforcer: Arc<RbacEnforcer>,
}

impl OrganizationService {
    /// Creates a new organization service.
    pub fn new(org_repo: Arc<OrganizationRepository>, enforcer: Arc<RbacEnforcer>) -> Self {
        Self { org_repo, enforcer }
    }

    /// Gets an organization by ID.
    pub async fn get_organization(
        &self,
        ctx: &RequestContext,
        id: OrganizationId,
    ) -> AppResult<Organization> {
        self.enforcer
            .require_permission(&ctx.roles, Permission::OrganizationView)?;
        self.enforcer
            .require_org_access(&ctx.roles, ctx.organization_id, id)?;
        self.org_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Organization not found"))
    }

    /// Lists every organization. Application administrators only.
    pub async fn list_organizations(&self, ctx: &RequestContext) -> AppResult<Vec<Organization>> {
        self.enforcer
            .require_permission(&ctx.roles, Permission::OrganizationCreate)?;
        self.org_repo.find_all().await
    }

    /// Creates an organization. Application administrators only.
    pub async fn create_organization(
        &self,
        ctx: &RequestContext,
        data: CreateOrganization,
    ) -> AppResult<Organization> {
        self.enforcer
            .require_permission(&ctx.roles, Permission::OrganizationCreate)?;
        if data.name.trim().is_empty() {
            return Err(AppError::validation("Organization name cannot be empty"));
        }

        let org = self
            .org_repo
            .create(&CreateOrganization {
                name: data.name.trim().to_string(),
                description: data.description,
                created_by: Some(ctx.user_id),
            })
            .await?;
        info!(organization_id = %org.id, name = %org.name, user_id = %ctx.user_id, "Created organization");
        Ok(org)
    }
}
