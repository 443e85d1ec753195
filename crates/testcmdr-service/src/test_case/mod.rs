//! Test case CRUD operations.

pub mod service;

pub use service::TestCaseService;
