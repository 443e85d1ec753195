//! User handlers.

use axum::Json;
use axum::extract::{Path, State};

use testcmdr_core::types::{OrganizationId, UserId};
use testcmdr_entity::user::CreateUser;

use crate::dto::request::{InviteUserRequest, validate};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/organizations/{id}/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(organization_id): Path<OrganizationId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let users = state.user_service.list_by_org(&auth, organization_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": users })))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<UserId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = state.user_service.get_user(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": user })))
}

/// GET /api/users/assignable-roles
pub async fn assignable_roles(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let roles = state.user_service.assignable_roles(&auth);
    Ok(Json(serde_json::json!({ "success": true, "data": roles })))
}

/// POST /api/users — invite a user. The caller's role and organization
/// claims are re-validated server-side before anything is written.
pub async fn invite_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<InviteUserRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    validate(&req)?;
    let user = state
        .user_service
        .invite_user(
            &auth,
            CreateUser {
                email: req.email,
                display_name: req.display_name,
                organization_id: req.organization_id,
                roles: req.roles,
                created_by: Some(auth.user_id),
            },
        )
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": user })))
}
