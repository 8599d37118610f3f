//! API response bodies.

use serde::{Deserialize, Serialize};

/// Uniform success envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always true; errors use `ApiErrorResponse`.
    pub success: bool,
    /// The payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap `data` in the success envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Body of a successful share link creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareLinkCreated {
    /// The share URL: short form, or the self-contained long form when
    /// the store degraded.
    pub url: String,
}

/// Basic health body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Detailed health body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Service status.
    pub status: String,
    /// Database connectivity.
    pub database: String,
}
