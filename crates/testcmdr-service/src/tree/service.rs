//! Project tree use cases.

use std::sync::Arc;

use tracing::info;

use testcmdr_auth::{Permission, RbacEnforcer};
use testcmdr_core::AppResult;
use testcmdr_core::error::AppError;
use testcmdr_core::types::{FolderId, ProjectId};
use testcmdr_database::repositories::folder::FolderRepository;
use testcmdr_database::repositories::project::ProjectRepository;
use testcmdr_database::repositories::test_case::TestCaseRepository;
use testcmdr_entity::project::Project;
use testcmdr_tree::{
    DragPayload, DropTarget, ExpansionController, FilterCriteria, MoveOutcome, TreeMaterializer,
    TreeNode, VisibleNode, handle_drop,
};

use crate::context::RequestContext;
use crate::scope;
use crate::test_type::TestTypeService;
use crate::tree::source::ProjectTreeSource;

/// Serves the folder/test-case tree: lazy child lists, whole-tree renders
/// with filters applied, and drag-drop moves.
///
/// The server keeps no tree state between requests; a fresh materializer
/// is built per call and its cache lives only for that call.
pub struct TreeService {
    folder_repo: Arc<FolderRepository>,
    case_repo: Arc<TestCaseRepository>,
    project_repo: Arc<ProjectRepository>,
    test_types: Arc<TestTypeService>,
    enforcer: Arc<RbacEnforcer>,
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(
        folder_repo: Arc<FolderRepository>,
        case_repo: Arc<TestCaseRepository>,
        project_repo: Arc<ProjectRepository>,
        test_types: Arc<TestTypeService>,
        enforcer: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            folder_repo,
            case_repo,
            project_repo,
            test_types,
            enforcer,
        }
    }

    /// The immediate children of a parent node (`None` = project root).
    pub async fn children(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        parent: Option<FolderId>,
    ) -> AppResult<Vec<TreeNode>> {
        self.authorize(ctx, project_id, Permission::TestCaseView)
            .await?;
        let mut tree = self.materializer(project_id);
        tree.children(parent).await
    }

    /// The fully expanded tree with the given criteria applied to leaves.
    pub async fn full_tree(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        criteria: &FilterCriteria,
    ) -> AppResult<Vec<VisibleNode>> {
        let project = self
            .authorize(ctx, project_id, Permission::TestCaseView)
            .await?;
        let catalog = self
            .test_types
            .resolved_catalog(project.organization_id)
            .await?;

        let mut tree = self.materializer(project_id);
        let mut expansion = ExpansionController::new();
        expansion.expand_all(&mut tree).await?;
        Ok(expansion.visible_nodes(&tree, criteria, &catalog))
    }

    /// The subtree rooted at `folder`, fully loaded ("expand into target").
    pub async fn subtree(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        folder: FolderId,
    ) -> AppResult<Vec<VisibleNode>> {
        self.authorize(ctx, project_id, Permission::TestCaseView)
            .await?;
        let root = self
            .folder_repo
            .find_by_id(folder)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;
        scope::ensure_folder_in_project(&root, project_id)?;

        let mut tree = self.materializer(project_id);
        let mut expansion = ExpansionController::new();
        expansion.expand_subtree(&mut tree, folder).await?;

        let mut out = Vec::new();
        collect_loaded(&tree, Some(folder), 0, &mut out);
        Ok(out)
    }

    /// Applies a drag-drop move and reports the outcome. Illegal moves are
    /// reported explicitly, never silently dropped.
    pub async fn move_node(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        payload: DragPayload,
        target: DropTarget,
    ) -> AppResult<MoveOutcome> {
        let permission = match payload {
            DragPayload::Folder { .. } => Permission::FolderManage,
            DragPayload::Case { .. } => Permission::TestCaseManage,
        };
        self.authorize(ctx, project_id, permission).await?;

        let mut tree = self.materializer(project_id);
        let outcome = handle_drop(&mut tree, payload, target).await?;
        info!(
            user_id = %ctx.user_id,
            project_id = %project_id,
            outcome = ?outcome,
            "Handled tree move"
        );
        Ok(outcome)
    }

    fn materializer(&self, project_id: ProjectId) -> TreeMaterializer {
        TreeMaterializer::new(Arc::new(ProjectTreeSource::new(
            project_id,
            Arc::clone(&self.folder_repo),
            Arc::clone(&self.case_repo),
        )))
    }

    async fn authorize(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        permission: Permission,
    ) -> AppResult<Project> {
        let project = self
            .project_repo
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))?;
        scope::authorize_project(&self.enforcer, ctx, &project, permission)?;
        Ok(project)
    }
}

/// Depth-first walk over already-loaded cache entries below `parent`.
fn collect_loaded(
    tree: &TreeMaterializer,
    parent: Option<FolderId>,
    depth: usize,
    out: &mut Vec<VisibleNode>,
) {
    let Some(children) = tree.cached(parent) else {
        return;
    };
    for node in children {
        out.push(VisibleNode {
            depth,
            node: node.clone(),
        });
        if let Some(id) = node.folder_id() {
            collect_loaded(tree, Some(id), depth + 1, out);
        }
    }
}
