//! Bearer token validation.
//!
//! Wishlink validates HS256 tokens issued by the identity service; it
//! never issues tokens itself.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use wishlink_core::config::auth::AuthConfig;
use wishlink_core::error::AppError;
use wishlink_core::result::AppResult;

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: Uuid,
    /// Username, for log context.
    pub username: String,
    /// Expiry as a Unix timestamp.
    pub exp: u64,
}

/// Decodes and validates access tokens.
#[derive(Clone)]
pub struct TokenDecoder {
    key: DecodingKey,
    validation: Validation,
}

impl TokenDecoder {
    /// Creates a new token decoder from configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_seconds;
        Self {
            key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decode a token, returning its claims if valid and unexpired.
    pub fn decode(&self, token: &str) -> AppResult<Claims> {
        jsonwebtoken::decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::authentication(format!("Invalid access token: {e}")))
    }
}
