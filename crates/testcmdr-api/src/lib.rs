//! # testcmdr-api
//!
//! HTTP API layer for Test Commander built on Axum. Routes are mounted
//! under `/api`; handlers authenticate through the [`extractors::AuthUser`]
//! extractor and delegate to the service layer.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use error::ApiError;
pub use state::AppState;
