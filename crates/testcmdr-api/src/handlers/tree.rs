//! Tree handlers: lazy children, filtered whole-tree, subtree expansion,
//! and drag-drop moves.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::Response;

use testcmdr_core::types::{FolderId, ProjectId};
use testcmdr_tree::DropTarget;

use crate::dto::request::{ChildrenQuery, MoveNodeRequest, TreeFilterQuery};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::handlers::folder::outcome_response;
use crate::state::AppState;

/// GET /api/projects/{id}/tree/children?parent_id=...
pub async fn children(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<ProjectId>,
    Query(query): Query<ChildrenQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let nodes = state
        .tree_service
        .children(&auth, project_id, query.parent_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": nodes })))
}

/// GET /api/projects/{id}/tree?search=...&status=...&priority=...&test_type=...&tags=...
pub async fn full_tree(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<ProjectId>,
    Query(query): Query<TreeFilterQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let criteria = query.into_criteria()?;
    let nodes = state
        .tree_service
        .full_tree(&auth, project_id, &criteria)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": nodes })))
}

/// GET /api/projects/{id}/tree/subtree/{folder_id} — "expand into target".
pub async fn subtree(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, folder_id)): Path<(ProjectId, FolderId)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let nodes = state
        .tree_service
        .subtree(&auth, project_id, folder_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": nodes })))
}

/// POST /api/projects/{id}/tree/move — illegal moves come back as 422.
pub async fn move_node(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<ProjectId>,
    Json(req): Json<MoveNodeRequest>,
) -> Result<Response, ApiError> {
    let target = match req.target_folder_id {
        Some(folder) => DropTarget::Folder(folder),
        None => DropTarget::Root,
    };
    let outcome = state
        .tree_service
        .move_node(&auth, project_id, req.payload, target)
        .await?;
    Ok(outcome_response(outcome))
}
