//! Organization handlers.

use axum::Json;
use axum::extract::{Path, State};

use testcmdr_core::types::OrganizationId;
use testcmdr_entity::organization::CreateOrganization;

use crate::dto::request::{CreateOrganizationRequest, validate};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/organizations
pub async fn list_organizations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let orgs = state.organization_service.list_organizations(&auth).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": orgs })))
}

/// GET /api/organizations/{id}
pub async fn get_organization(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<OrganizationId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let org = state.organization_service.get_organization(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": org })))
}

/// POST /api/organizations
pub async fn create_organization(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateOrganizationRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    validate(&req)?;
    let org = state
        .organization_service
        .create_organization(
            &auth,
            CreateOrganization {
                name: req.name,
                description: req.description,
                created_by: Some(auth.user_id),
            },
        )
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": org })))
}
