//! User profile entity model.
//!
//! Credentials live with the external identity provider; this profile
//! carries the role tags and organization claim the application needs
//! for permission checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use testcmdr_core::types::{OrganizationId, UserId};

use super::role::RoleTag;

/// A user profile in the Test Commander system.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Email address (unique; also the identity-provider login).
    pub email: String,
    /// Human-readable display name.
    pub display_name: String,
    /// The organization this user belongs to. App admins may be unscoped.
    pub organization_id: Option<OrganizationId>,
    /// The user's role tags.
    pub roles: Vec<RoleTag>,
    /// Whether the account is active.
    pub is_active: bool,
    /// The admin who invited this user.
    pub created_by: Option<UserId>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check if this user carries the given role tag.
    pub fn has_role(&self, role: RoleTag) -> bool {
        self.roles.contains(&role)
    }

    /// Check if this user is an application-wide administrator.
    pub fn is_app_admin(&self) -> bool {
        self.has_role(RoleTag::AppAdmin)
    }
}

/// Data required to create a new user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Target organization.
    pub organization_id: Option<OrganizationId>,
    /// Assigned role tags.
    pub roles: Vec<RoleTag>,
    /// The inviting admin's user ID.
    pub created_by: Option<UserId>,
}
