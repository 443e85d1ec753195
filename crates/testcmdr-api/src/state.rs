//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use testcmdr_auth::jwt::JwtDecoder;
use testcmdr_auth::rbac::RbacEnforcer;
use testcmdr_core::config::AppConfig;
use testcmdr_service::{
    FolderService, OrganizationService, ProjectService, TagService, TestCaseService,
    TestTypeService, TreeService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool, used directly by the health check.
    pub db_pool: PgPool,
    /// JWT validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// RBAC enforcer.
    pub enforcer: Arc<RbacEnforcer>,

    /// Organization administration.
    pub organization_service: Arc<OrganizationService>,
    /// Project administration.
    pub project_service: Arc<ProjectService>,
    /// User listing and invitation.
    pub user_service: Arc<UserService>,
    /// Folder CRUD.
    pub folder_service: Arc<FolderService>,
    /// Test case CRUD.
    pub test_case_service: Arc<TestCaseService>,
    /// Tag management.
    pub tag_service: Arc<TagService>,
    /// Test-type catalog.
    pub test_type_service: Arc<TestTypeService>,
    /// Tree materialization, filtering, and moves.
    pub tree_service: Arc<TreeService>,
}
