//! Project handlers.

use axum::Json;
use axum::extract::{Path, State};

use testcmdr_core::types::{OrganizationId, ProjectId};
use testcmdr_entity::project::CreateProject;

use crate::dto::request::{CreateProjectRequest, validate};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/organizations/{id}/projects
pub async fn list_projects(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(organization_id): Path<OrganizationId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let projects = state
        .project_service
        .list_by_org(&auth, organization_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": projects })))
}

/// GET /api/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ProjectId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let project = state.project_service.get_project(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": project })))
}

/// POST /api/projects
pub async fn create_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateProjectRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    validate(&req)?;
    let project = state
        .project_service
        .create_project(
            &auth,
            CreateProject {
                organization_id: req.organization_id,
                name: req.name,
                description: req.description,
                created_by: Some(auth.user_id),
            },
        )
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": project })))
}
