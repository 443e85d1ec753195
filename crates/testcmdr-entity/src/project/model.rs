//! Project entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use testcmdr_core::types::{OrganizationId, ProjectId, UserId};

/// A unit of work within an organization. Owns folders and test cases.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    /// Unique project identifier.
    pub id: ProjectId,
    /// The owning organization.
    pub organization_id: OrganizationId,
    /// Project name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// The user who created the project.
    pub created_by: Option<UserId>,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    /// The owning organization.
    pub organization_id: OrganizationId,
    /// Project name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// The creating user's ID.
    pub created_by: Option<UserId>,
}
