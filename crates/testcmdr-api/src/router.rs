//! Route definitions for the Test Commander HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The
//! router receives `AppState` and passes it to handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use testcmdr_core::config::server::CorsConfig;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    let api_routes = Router::new()
        .merge(organization_routes())
        .merge(project_routes())
        .merge(user_routes())
        .merge(folder_routes())
        .merge(test_case_routes())
        .merge(tag_routes())
        .merge(test_type_routes())
        .merge(tree_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allowed_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }
    let origins: Vec<axum::http::HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

fn organization_routes() -> Router<AppState> {
    Router::new()
        .route("/organizations", get(handlers::organization::list_organizations))
        .route("/organizations", post(handlers::organization::create_organization))
        .route("/organizations/{id}", get(handlers::organization::get_organization))
}

fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/organizations/{id}/projects", get(handlers::project::list_projects))
        .route("/projects", post(handlers::project::create_project))
        .route("/projects/{id}", get(handlers::project::get_project))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/organizations/{id}/users", get(handlers::user::list_users))
        .route("/users", post(handlers::user::invite_user))
        .route("/users/assignable-roles", get(handlers::user::assignable_roles))
        .route("/users/{id}", get(handlers::user::get_user))
}

fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/projects/{id}/folders", get(handlers::folder::list_children))
        .route("/projects/{id}/folders", post(handlers::folder::create_folder))
        .route("/folders/{id}", get(handlers::folder::get_folder))
        .route("/folders/{id}", put(handlers::folder::rename_folder))
        .route("/folders/{id}", delete(handlers::folder::delete_folder))
        .route("/folders/{id}/move", put(handlers::folder::move_folder))
}

fn test_case_routes() -> Router<AppState> {
    Router::new()
        .route("/projects/{id}/test-cases", get(handlers::test_case::list_by_folder))
        .route("/projects/{id}/test-cases", post(handlers::test_case::create_case))
        .route("/test-cases/{id}", get(handlers::test_case::get_case))
        .route("/test-cases/{id}", put(handlers::test_case::update_case))
        .route("/test-cases/{id}", delete(handlers::test_case::delete_case))
        .route("/test-cases/{id}/move", put(handlers::test_case::move_case))
}

fn tag_routes() -> Router<AppState> {
    Router::new()
        .route("/organizations/{id}/tags", get(handlers::tag::list_tags))
        .route("/organizations/{id}/tags", post(handlers::tag::upsert_tag))
        .route("/tags/{id}", delete(handlers::tag::delete_tag))
}

fn test_type_routes() -> Router<AppState> {
    Router::new()
        .route("/test-types", get(handlers::test_type::list_globals))
        .route(
            "/organizations/{id}/test-types",
            get(handlers::test_type::resolved_catalog),
        )
        .route(
            "/organizations/{id}/test-types",
            put(handlers::test_type::set_org_entry),
        )
}

fn tree_routes() -> Router<AppState> {
    Router::new()
        .route("/projects/{id}/tree", get(handlers::tree::full_tree))
        .route("/projects/{id}/tree/children", get(handlers::tree::children))
        .route(
            "/projects/{id}/tree/subtree/{folder_id}",
            get(handlers::tree::subtree),
        )
        .route("/projects/{id}/tree/move", post(handlers::tree::move_node))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
