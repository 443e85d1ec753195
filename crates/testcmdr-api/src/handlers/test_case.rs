//! Test case CRUD handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use testcmdr_core::error::AppError;
use testcmdr_core::types::{ProjectId, TestCaseId};
use testcmdr_entity::testcase::{CreateTestCase, TestCase};

use crate::dto::request::{CaseListQuery, MoveTestCaseRequest};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/projects/{id}/test-cases?folder_id=...
///
/// An absent `folder_id` explicitly queries the unfiled cases, the only
/// way they are reachable; the tree never shows them.
pub async fn list_by_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<ProjectId>,
    Query(query): Query<CaseListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let cases = state
        .test_case_service
        .list_by_folder(&auth, project_id, query.folder_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": cases })))
}

/// GET /api/test-cases/{id}
pub async fn get_case(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TestCaseId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let case = state.test_case_service.get_case(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": case })))
}

/// POST /api/projects/{id}/test-cases
pub async fn create_case(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<ProjectId>,
    Json(mut data): Json<CreateTestCase>,
) -> Result<Json<serde_json::Value>, ApiError> {
    data.project_id = project_id;
    let case = state.test_case_service.create_case(&auth, data).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": case })))
}

/// PUT /api/test-cases/{id}
pub async fn update_case(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TestCaseId>,
    Json(case): Json<TestCase>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if case.id != id {
        return Err(AppError::validation("Body id does not match the path id").into());
    }
    let updated = state.test_case_service.update_case(&auth, case).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": updated })))
}

/// PUT /api/test-cases/{id}/move
pub async fn move_case(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TestCaseId>,
    Json(req): Json<MoveTestCaseRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let moved = state
        .test_case_service
        .move_case(&auth, id, req.folder_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": moved })))
}

/// DELETE /api/test-cases/{id}
pub async fn delete_case(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TestCaseId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.test_case_service.delete_case(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
