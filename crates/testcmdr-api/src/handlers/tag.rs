//! Tag handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use testcmdr_core::types::{OrganizationId, TagId};
use testcmdr_entity::tag::UpsertTag;

use crate::dto::request::TagListQuery;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/organizations/{id}/tags?include_deleted=...
pub async fn list_tags(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(organization_id): Path<OrganizationId>,
    Query(query): Query<TagListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let tags = state
        .tag_service
        .list_tags(&auth, organization_id, query.include_deleted)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": tags })))
}

/// POST /api/organizations/{id}/tags
pub async fn upsert_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(organization_id): Path<OrganizationId>,
    Json(mut data): Json<UpsertTag>,
) -> Result<Json<serde_json::Value>, ApiError> {
    data.organization_id = organization_id;
    let tag = state.tag_service.upsert_tag(&auth, data).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": tag })))
}

/// DELETE /api/tags/{id} — soft delete; snapshots keep old references
/// rendering.
pub async fn delete_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TagId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.tag_service.delete_tag(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
