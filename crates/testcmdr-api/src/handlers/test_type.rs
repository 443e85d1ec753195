//! Test-type catalog handlers.

use axum::Json;
use axum::extract::{Path, State};

use testcmdr_core::types::OrganizationId;
use testcmdr_entity::testtype::OrgTestType;

use crate::dto::request::{SetOrgTestTypeRequest, validate};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/test-types — the global catalog.
pub async fn list_globals(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let globals = state.test_type_service.list_globals().await?;
    Ok(Json(serde_json::json!({ "success": true, "data": globals })))
}

/// GET /api/organizations/{id}/test-types — the resolved catalog.
pub async fn resolved_catalog(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(organization_id): Path<OrganizationId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .enforcer
        .require_org_access(&auth.roles, auth.organization_id, organization_id)?;
    let catalog = state
        .test_type_service
        .resolved_catalog(organization_id)
        .await?;
    let entries: Vec<_> = catalog.entries().collect();
    Ok(Json(serde_json::json!({ "success": true, "data": entries })))
}

/// PUT /api/organizations/{id}/test-types — enable/disable/override.
pub async fn set_org_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(organization_id): Path<OrganizationId>,
    Json(req): Json<SetOrgTestTypeRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    validate(&req)?;
    let entry = state
        .test_type_service
        .set_org_entry(
            &auth,
            OrgTestType {
                organization_id,
                code: req.code,
                enabled: req.enabled,
                name_override: req.name_override,
                description_override: req.description_override,
                icon_override: req.icon_override,
            },
        )
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": entry })))
}
