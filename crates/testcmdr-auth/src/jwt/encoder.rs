//! JWT token issuance.
//!
//! Used by the CLI to mint bootstrap tokens and by tests; the normal
//! login flow lives behind an external identity provider.

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

use testcmdr_core::config::AuthConfig;
use testcmdr_core::error::AppError;
use testcmdr_core::types::{OrganizationId, UserId};
use testcmdr_entity::user::RoleTag;

use super::claims::Claims;

/// Signs access tokens with the configured HMAC secret.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    issuer: Option<String>,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: if config.issuer.is_empty() {
                None
            } else {
                Some(config.issuer.clone())
            },
        }
    }

    /// Issues a signed access token valid for `ttl_seconds`.
    pub fn encode(
        &self,
        user_id: UserId,
        org: Option<OrganizationId>,
        roles: Vec<RoleTag>,
        name: &str,
        email: &str,
        ttl_seconds: i64,
    ) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            org,
            roles,
            name: name.to_string(),
            email: email.to_string(),
            iat: now,
            exp: now + ttl_seconds,
            iss: self.issuer.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }
}
