//! Organization tag management.

use std::sync::Arc;

use tracing::info;

use testcmdr_auth::{Permission, RbacEnforcer};
use testcmdr_core::AppResult;
use testcmdr_core::error::AppError;
use testcmdr_core::types::{OrganizationId, TagId};
use testcmdr_database::repositories::tag::TagRepository;
use testcmdr_entity::tag::{Tag, UpsertTag};

use crate::context::RequestContext;

/// Manages organization-scoped tags. Deletion is always soft; test cases
/// keep rendering deleted tags from their snapshots.
pub struct TagService {
    tag_repo: Arc<TagRepository>,
    enforcer: Arc<RbacEnforcer>,
}

impl TagService {
    /// Creates a new tag service.
    pub fn new(tag_repo: Arc<TagRepository>, enforcer: Arc<RbacEnforcer>) -> Self {
        Self { tag_repo, enforcer }
    }

    /// Lists an organization's tags.
    pub async fn list_tags(
        &self,
        ctx: &RequestContext,
        organization_id: OrganizationId,
        include_deleted: bool,
    ) -> AppResult<Vec<Tag>> {
        self.enforcer
            .require_permission(&ctx.roles, Permission::TestCaseView)?;
        self.enforcer
            .require_org_access(&ctx.roles, ctx.organization_id, organization_id)?;
        self.tag_repo
            .find_by_org(organization_id, include_deleted)
            .await
    }

    /// Creates or updates a tag.
    pub async fn upsert_tag(&self, ctx: &RequestContext, data: UpsertTag) -> AppResult<Tag> {
        self.enforcer
            .require_permission(&ctx.roles, Permission::TagManage)?;
        self.enforcer
            .require_org_access(&ctx.roles, ctx.organization_id, data.organization_id)?;

        if data.name.trim().is_empty() {
            return Err(AppError::validation("Tag name cannot be empty"));
        }
        if data.color.trim().is_empty() {
            return Err(AppError::validation("Tag color cannot be empty"));
        }

        let tag = self.tag_repo.upsert(&data).await?;
        info!(tag_id = %tag.id, name = %tag.name, user_id = %ctx.user_id, "Upserted tag");
        Ok(tag)
    }

    /// Soft-deletes a tag. Existing references stay valid through the
    /// per-case snapshots.
    pub async fn delete_tag(&self, ctx: &RequestContext, id: TagId) -> AppResult<()> {
        let tag = self
            .tag_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Tag not found"))?;
        self.enforcer
            .require_permission(&ctx.roles, Permission::TagManage)?;
        self.enforcer
            .require_org_access(&ctx.roles, ctx.organization_id, tag.organization_id)?;

        if !self.tag_repo.soft_delete(id).await? {
            return Err(AppError::not_found("Tag not found"));
        }
        info!(tag_id = %id, user_id = %ctx.user_id, "Soft-deleted tag");
        Ok(())
    }
}
