//! JWT claims structure carried by access tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use testcmdr_core::types::{OrganizationId, UserId};
use testcmdr_entity::user::RoleTag;

/// Claims payload embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user ID.
    pub sub: UserId,
    /// Organization the user belongs to. Absent for APP_ADMIN accounts
    /// that operate across organizations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<OrganizationId>,
    /// Roles held at the time of token issuance.
    pub roles: Vec<RoleTag>,
    /// Display name for convenience.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Issuer, present when the deployment configures one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> UserId {
        self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Checks whether the token carries a given role.
    pub fn has_role(&self, role: RoleTag) -> bool {
        self.roles.contains(&role)
    }
}
