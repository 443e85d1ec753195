//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use testcmdr_core::config::AuthConfig;
use testcmdr_core::error::AppError;

use super::claims::Claims;

/// Validates access token signatures and standard claims.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;
        if !config.issuer.is_empty() {
            validation.set_issuer(&[&config.issuer]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthorized("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::unauthorized("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthorized("Invalid token signature")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                        AppError::unauthorized("Invalid token issuer")
                    }
                    _ => AppError::unauthorized(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use testcmdr_core::types::{OrganizationId, UserId};
    use testcmdr_entity::user::RoleTag;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret-at-least-32-bytes-long!!".to_string(),
            issuer: String::new(),
            leeway_seconds: 5,
        }
    }

    #[test]
    fn test_roundtrip_preserves_claims() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);

        let user_id = UserId::new();
        let org = OrganizationId::new();
        let token = encoder
            .encode(
                user_id,
                Some(org),
                vec![RoleTag::OrgAdmin, RoleTag::TestEngineer],
                "Dana",
                "dana@example.com",
                3600,
            )
            .unwrap();

        let claims = decoder.decode(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.org, Some(org));
        assert!(claims.has_role(RoleTag::OrgAdmin));
        assert!(!claims.has_role(RoleTag::AppAdmin));
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let encoder = JwtEncoder::new(&test_config());
        let token = encoder
            .encode(UserId::new(), None, vec![RoleTag::AppAdmin], "A", "a@b.c", 3600)
            .unwrap();

        let mut other = test_config();
        other.jwt_secret = "a-completely-different-secret-value!".to_string();
        let decoder = JwtDecoder::new(&other);
        assert!(decoder.decode(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let decoder = JwtDecoder::new(&test_config());
        let err = decoder.decode("not.a.token").unwrap_err();
        assert_eq!(err.kind, testcmdr_core::error::ErrorKind::Unauthorized);
    }
}
