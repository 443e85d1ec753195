//! Folder CRUD with role and organization checks.

use std::sync::Arc;

use tracing::info;

use testcmdr_auth::{Permission, RbacEnforcer};
use testcmdr_core::AppResult;
use testcmdr_core::error::AppError;
use testcmdr_core::types::{FolderId, ProjectId};
use testcmdr_database::repositories::folder::FolderRepository;
use testcmdr_database::repositories::project::ProjectRepository;
use testcmdr_entity::folder::{CreateFolder, Folder};
use testcmdr_tree::{MoveOutcome, MoveRejection};

use crate::context::RequestContext;
use crate::scope;

/// Manages folder CRUD operations.
pub struct FolderService {
    folder_repo: Arc<FolderRepository>,
    project_repo: Arc<ProjectRepository>,
    enforcer: Arc<RbacEnforcer>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folder_repo: Arc<FolderRepository>,
        project_repo: Arc<ProjectRepository>,
        enforcer: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            folder_repo,
            project_repo,
            enforcer,
        }
    }

    /// Gets a folder by ID.
    pub async fn get_folder(&self, ctx: &RequestContext, folder_id: FolderId) -> AppResult<Folder> {
        let folder = self
            .folder_repo
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;
        self.enforcer
            .require_permission(&ctx.roles, Permission::TestCaseView)?;
        self.enforcer
            .require_org_access(&ctx.roles, ctx.organization_id, folder.organization_id)?;
        Ok(folder)
    }

    /// Lists the immediate child folders of a parent (`None` = root level).
    pub async fn list_children(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        parent_id: Option<FolderId>,
    ) -> AppResult<Vec<Folder>> {
        let project = self
            .project_repo
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))?;
        scope::authorize_project(&self.enforcer, ctx, &project, Permission::TestCaseView)?;
        self.folder_repo.find_children(project_id, parent_id).await
    }

    /// Creates a folder. The name must be non-empty and the parent, if
    /// given, must live in the same project.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        data: CreateFolder,
    ) -> AppResult<Folder> {
        let project = self
            .project_repo
            .find_by_id(data.project_id)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))?;
        scope::ensure_org_owns_project(&project, data.organization_id)?;
        scope::authorize_project(&self.enforcer, ctx, &project, Permission::FolderManage)?;

        if data.name.trim().is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }
        if let Some(parent) = data.parent_folder_id {
            let parent = self
                .folder_repo
                .find_by_id(parent)
                .await?
                .ok_or_else(|| AppError::not_found("Parent folder not found"))?;
            scope::ensure_folder_in_project(&parent, data.project_id)?;
        }

        let folder = self.folder_repo.create(&data).await?;
        info!(
            folder_id = %folder.id,
            project_id = %folder.project_id,
            user_id = %ctx.user_id,
            "Created folder"
        );
        Ok(folder)
    }

    /// Renames a folder in place.
    pub async fn rename_folder(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
        new_name: &str,
    ) -> AppResult<Folder> {
        let existing = self.get_folder(ctx, folder_id).await?;
        self.enforcer
            .require_permission(&ctx.roles, Permission::FolderManage)?;
        if new_name.trim().is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }

        let folder = self.folder_repo.rename(folder_id, new_name.trim()).await?;
        info!(folder_id = %folder.id, from = %existing.name, to = %folder.name, "Renamed folder");
        Ok(folder)
    }

    /// Re-parents a folder. Moving a folder under itself or its own
    /// descendant is reported as a rejection without touching the store,
    /// and the new parent must belong to the same project.
    pub async fn move_folder(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
        new_parent: Option<FolderId>,
    ) -> AppResult<MoveOutcome> {
        let folder = self.get_folder(ctx, folder_id).await?;
        self.enforcer
            .require_permission(&ctx.roles, Permission::FolderManage)?;

        if folder.parent_folder_id == new_parent {
            return Ok(MoveOutcome::Noop);
        }
        if let Some(target) = new_parent {
            if target == folder_id {
                return Ok(MoveOutcome::Rejected {
                    reason: MoveRejection::IntoSelf,
                });
            }
            let target_folder = self
                .folder_repo
                .find_by_id(target)
                .await?
                .ok_or_else(|| AppError::not_found("Target folder not found"))?;
            scope::ensure_folder_in_project(&target_folder, folder.project_id)?;
            let target_ancestors = self.folder_repo.ancestor_ids(target).await?;
            if target_ancestors.contains(&folder_id) {
                return Ok(MoveOutcome::Rejected {
                    reason: MoveRejection::IntoOwnDescendant,
                });
            }
        }

        self.folder_repo.move_folder(folder_id, new_parent).await?;
        info!(folder_id = %folder_id, new_parent = ?new_parent, user_id = %ctx.user_id, "Moved folder");
        Ok(MoveOutcome::Moved)
    }

    /// Deletes a folder and, through cascading, everything below it.
    pub async fn delete_folder(&self, ctx: &RequestContext, folder_id: FolderId) -> AppResult<()> {
        self.get_folder(ctx, folder_id).await?;
        self.enforcer
            .require_permission(&ctx.roles, Permission::FolderManage)?;

        let deleted = self.folder_repo.delete(folder_id).await?;
        if !deleted {
            return Err(AppError::not_found("Folder not found"));
        }
        info!(folder_id = %folder_id, user_id = %ctx.user_id, "Deleted folder");
        Ok(())
    }
}
