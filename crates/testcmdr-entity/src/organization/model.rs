//! Organization entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use testcmdr_core::types::{OrganizationId, UserId};

/// A top-level tenant. Owns projects, users, tags, and test-type overrides.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Organization {
    /// Unique organization identifier.
    pub id: OrganizationId,
    /// Organization name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// The user who created the organization.
    pub created_by: Option<UserId>,
    /// When the organization was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganization {
    /// Organization name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// The creating user's ID.
    pub created_by: Option<UserId>,
}
