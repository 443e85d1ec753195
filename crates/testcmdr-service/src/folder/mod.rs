//! Folder CRUD operations.

pub mod service;

pub use service::FolderService;
