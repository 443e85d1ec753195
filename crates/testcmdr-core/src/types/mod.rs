//! Shared value types: typed identifiers.

pub mod id;

pub use id::{FolderId, OrganizationId, ProjectId, TagId, TestCaseId, UserId};
