//! Repository-backed child source for one project's tree.

use std::sync::Arc;

use async_trait::async_trait;

use testcmdr_core::AppResult;
use testcmdr_core::error::AppError;
use testcmdr_core::types::{FolderId, ProjectId, TestCaseId};
use testcmdr_database::repositories::folder::FolderRepository;
use testcmdr_database::repositories::test_case::TestCaseRepository;
use testcmdr_entity::folder::Folder;
use testcmdr_entity::testcase::TestCase;
use testcmdr_tree::ChildSource;

use crate::scope;

/// [`ChildSource`] implementation over the Postgres repositories, scoped
/// to a single project. Drag payloads carry raw ids, so every write
/// re-checks that the named rows belong to this project.
pub struct ProjectTreeSource {
    project_id: ProjectId,
    folder_repo: Arc<FolderRepository>,
    case_repo: Arc<TestCaseRepository>,
}

impl ProjectTreeSource {
    /// Creates a source scoped to `project_id`.
    pub fn new(
        project_id: ProjectId,
        folder_repo: Arc<FolderRepository>,
        case_repo: Arc<TestCaseRepository>,
    ) -> Self {
        Self {
            project_id,
            folder_repo,
            case_repo,
        }
    }
}

#[async_trait]
impl ChildSource for ProjectTreeSource {
    async fn load_folders(&self, parent: Option<FolderId>) -> AppResult<Vec<Folder>> {
        self.folder_repo.find_children(self.project_id, parent).await
    }

    async fn load_cases(&self, folder: FolderId) -> AppResult<Vec<TestCase>> {
        self.case_repo
            .find_by_folder(self.project_id, Some(folder))
            .await
    }

    async fn parent_of(&self, folder: FolderId) -> AppResult<Option<FolderId>> {
        Ok(self
            .folder_repo
            .find_by_id(folder)
            .await?
            .and_then(|f| f.parent_folder_id))
    }

    async fn move_folder(&self, folder: FolderId, new_parent: Option<FolderId>) -> AppResult<()> {
        let moving = self
            .folder_repo
            .find_by_id(folder)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;
        scope::ensure_folder_in_project(&moving, self.project_id)?;
        if let Some(parent) = new_parent {
            let target = self
                .folder_repo
                .find_by_id(parent)
                .await?
                .ok_or_else(|| AppError::not_found("Target folder not found"))?;
            scope::ensure_folder_in_project(&target, self.project_id)?;
        }
        self.folder_repo.move_folder(folder, new_parent).await?;
        Ok(())
    }

    async fn move_case(&self, case: TestCaseId, folder: FolderId) -> AppResult<()> {
        let moving = self
            .case_repo
            .find_by_id(case)
            .await?
            .ok_or_else(|| AppError::not_found("Test case not found"))?;
        scope::ensure_case_in_project(&moving, self.project_id)?;
        let target = self
            .folder_repo
            .find_by_id(folder)
            .await?
            .ok_or_else(|| AppError::not_found("Target folder not found"))?;
        scope::ensure_folder_in_project(&target, self.project_id)?;
        self.case_repo.move_case(case, Some(folder)).await?;
        Ok(())
    }
}
