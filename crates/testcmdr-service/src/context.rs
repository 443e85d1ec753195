//! Request context carrying the authenticated user's identity and claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use testcmdr_auth::jwt::Claims;
use testcmdr_core::types::{OrganizationId, UserId};
use testcmdr_entity::user::RoleTag;

/// Context for the current authenticated request.
///
/// Extracted from the verified JWT by middleware and passed into service
/// methods so that every operation knows *who* is acting and under which
/// organization. Never looked up from ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The user's organization; absent for cross-organization admins.
    pub organization_id: Option<OrganizationId>,
    /// Role tags held at token issuance.
    pub roles: Vec<RoleTag>,
    /// Display name (convenience field from JWT claims).
    pub display_name: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        user_id: UserId,
        organization_id: Option<OrganizationId>,
        roles: Vec<RoleTag>,
        display_name: String,
    ) -> Self {
        Self {
            user_id,
            organization_id,
            roles,
            display_name,
            request_time: Utc::now(),
        }
    }

    /// Builds a context from verified token claims.
    pub fn from_claims(claims: &Claims) -> Self {
        Self::new(
            claims.sub,
            claims.org,
            claims.roles.clone(),
            claims.name.clone(),
        )
    }

    /// Whether the user holds a given role.
    pub fn has_role(&self, role: RoleTag) -> bool {
        self.roles.contains(&role)
    }

    /// Whether the user is an application-wide administrator.
    pub fn is_app_admin(&self) -> bool {
        self.has_role(RoleTag::AppAdmin)
    }
}
