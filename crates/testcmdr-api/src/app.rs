//! Application builder — wires repositories, services, and the router
//! into a runnable Axum app.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::PgPool;

use testcmdr_auth::jwt::JwtDecoder;
use testcmdr_auth::rbac::RbacEnforcer;
use testcmdr_core::config::AppConfig;
use testcmdr_core::error::AppError;
use testcmdr_database::repositories::{
    folder::FolderRepository, organization::OrganizationRepository, project::ProjectRepository,
    tag::TagRepository, test_case::TestCaseRepository, test_type::TestTypeRepository,
    user::UserRepository,
};
use testcmdr_service::{
    FolderService, OrganizationService, ProjectService, TagService, TestCaseService,
    TestTypeService, TreeService, UserService,
};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the full application state from configuration and a pool.
pub fn build_state(config: AppConfig, db_pool: PgPool) -> AppState {
    let org_repo = Arc::new(OrganizationRepository::new(db_pool.clone()));
    let project_repo = Arc::new(ProjectRepository::new(db_pool.clone()));
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let folder_repo = Arc::new(FolderRepository::new(db_pool.clone()));
    let case_repo = Arc::new(TestCaseRepository::new(db_pool.clone()));
    let tag_repo = Arc::new(TagRepository::new(db_pool.clone()));
    let type_repo = Arc::new(TestTypeRepository::new(db_pool.clone()));

    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
    let enforcer = Arc::new(RbacEnforcer::new());

    let test_type_service = Arc::new(TestTypeService::new(
        Arc::clone(&type_repo),
        Arc::clone(&enforcer),
    ));

    AppState {
        organization_service: Arc::new(OrganizationService::new(
            Arc::clone(&org_repo),
            Arc::clone(&enforcer),
        )),
        project_service: Arc::new(ProjectService::new(
            Arc::clone(&project_repo),
            Arc::clone(&enforcer),
        )),
        user_service: Arc::new(UserService::new(
            Arc::clone(&user_repo),
            Arc::clone(&enforcer),
        )),
        folder_service: Arc::new(FolderService::new(
            Arc::clone(&folder_repo),
            Arc::clone(&project_repo),
            Arc::clone(&enforcer),
        )),
        test_case_service: Arc::new(TestCaseService::new(
            Arc::clone(&case_repo),
            Arc::clone(&tag_repo),
            Arc::clone(&project_repo),
            Arc::clone(&folder_repo),
            Arc::clone(&enforcer),
        )),
        tag_service: Arc::new(TagService::new(
            Arc::clone(&tag_repo),
            Arc::clone(&enforcer),
        )),
        tree_service: Arc::new(TreeService::new(
            Arc::clone(&folder_repo),
            Arc::clone(&case_repo),
            Arc::clone(&project_repo),
            Arc::clone(&test_type_service),
            Arc::clone(&enforcer),
        )),
        test_type_service,
        jwt_decoder,
        enforcer,
        config: Arc::new(config),
        db_pool,
    }
}

/// Builds the Axum application for the given state.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the HTTP server until interrupted, then drains in-flight
/// requests within the configured grace period.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = build_state(config, db_pool);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!(addr = %addr, "Test Commander listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(grace))
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}

async fn shutdown_signal(grace: Duration) {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!(grace_seconds = grace.as_secs(), "Shutdown signal received, draining");
}
