//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// JWT validation configuration.
///
/// Wishlink does not issue tokens itself — login lives in the identity
/// service — it only validates bearer tokens on owner-scoped endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret shared with the identity service.
    pub jwt_secret: String,
    /// Leeway in seconds applied to `exp` validation.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

fn default_leeway() -> u64 {
    30
}
