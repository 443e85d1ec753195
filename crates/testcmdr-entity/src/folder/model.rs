//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use testcmdr_core::types::{FolderId, OrganizationId, ProjectId, UserId};

/// A hierarchical grouping node for test cases within a project.
///
/// Invariant: a folder's ancestor chain (following `parent_folder_id`)
/// never contains the folder itself.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Parent folder ID (None for root-level folders).
    pub parent_folder_id: Option<FolderId>,
    /// The owning organization.
    pub organization_id: OrganizationId,
    /// The owning project.
    pub project_id: ProjectId,
    /// The user who created the folder.
    pub created_by: Option<UserId>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a root-level folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_folder_id.is_none()
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Parent folder (None for root-level).
    pub parent_folder_id: Option<FolderId>,
    /// The owning organization.
    pub organization_id: OrganizationId,
    /// The owning project.
    pub project_id: ProjectId,
    /// The creating user's ID.
    pub created_by: Option<UserId>,
}
