//! API request bodies.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Body of `POST /api/share-links`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShareLinkRequest {
    /// The share payload. Taken as raw JSON and run through the
    /// sanitizer server-side; the struct shape is never trusted.
    pub payload: serde_json::Value,
    /// Optional expiry for the stored short link.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}
