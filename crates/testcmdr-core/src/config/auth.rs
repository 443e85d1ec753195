//! Authentication configuration.
//!
//! Test Commander does not manage credentials itself; it verifies bearer
//! tokens issued by the external identity provider and reads the role/org
//! claims out of them.

use serde::{Deserialize, Serialize};

/// Token verification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for verifying provider-issued JWTs (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Expected `iss` claim; empty disables issuer validation.
    #[serde(default)]
    pub issuer: String,
    /// Allowed clock skew in seconds when validating `exp`.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            issuer: String::new(),
            leeway_seconds: default_leeway(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_leeway() -> u64 {
    30
}
