//! Folder CRUD handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::Response;

use testcmdr_core::types::{FolderId, ProjectId};
use testcmdr_entity::folder::CreateFolder;
use testcmdr_tree::MoveOutcome;

use crate::dto::request::{
    ChildrenQuery, CreateFolderRequest, MoveFolderRequest, RenameFolderRequest, validate,
};
use crate::error::{ApiError, move_rejected_response};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/projects/{id}/folders?parent_id=...
pub async fn list_children(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<ProjectId>,
    Query(query): Query<ChildrenQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let folders = state
        .folder_service
        .list_children(&auth, project_id, query.parent_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": folders })))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FolderId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let folder = state.folder_service.get_folder(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": folder })))
}

/// POST /api/projects/{id}/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<ProjectId>,
    Json(req): Json<CreateFolderRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    validate(&req)?;
    let project = project_of(&state, &auth, project_id).await?;
    let folder = state
        .folder_service
        .create_folder(
            &auth,
            CreateFolder {
                name: req.name,
                description: req.description,
                parent_folder_id: req.parent_folder_id,
                organization_id: project.organization_id,
                project_id,
                created_by: Some(auth.user_id),
            },
        )
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": folder })))
}

/// PUT /api/folders/{id}
pub async fn rename_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FolderId>,
    Json(req): Json<RenameFolderRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    validate(&req)?;
    let folder = state.folder_service.rename_folder(&auth, id, &req.name).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": folder })))
}

/// PUT /api/folders/{id}/move — illegal moves come back as 422.
pub async fn move_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FolderId>,
    Json(req): Json<MoveFolderRequest>,
) -> Result<Response, ApiError> {
    let outcome = state
        .folder_service
        .move_folder(&auth, id, req.new_parent_id)
        .await?;
    Ok(outcome_response(outcome))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FolderId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.folder_service.delete_folder(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

pub(crate) fn outcome_response(outcome: MoveOutcome) -> Response {
    use axum::response::IntoResponse;
    match outcome {
        MoveOutcome::Rejected { reason } => move_rejected_response(reason),
        other => Json(serde_json::json!({ "success": true, "data": other })).into_response(),
    }
}

pub(crate) async fn project_of(
    state: &AppState,
    auth: &AuthUser,
    project_id: ProjectId,
) -> Result<testcmdr_entity::project::Project, ApiError> {
    Ok(state.project_service.get_project(auth, project_id).await?)
}
