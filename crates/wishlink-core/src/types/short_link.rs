//! Short link records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Fixed length of a short link identifier.
pub const SHORT_ID_LENGTH: usize = 10;

/// A stored short link. Records are immutable: created once and deleted
/// only by explicit owner action; there is no update operation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShortLinkRecord {
    /// 10-character identifier from the `[0-9a-zA-Z]` alphabet.
    pub id: String,
    /// The embedded share payload, stored as JSON.
    pub payload: serde_json::Value,
    /// Owner of the link, when the schema carries ownership.
    pub owner_user_id: Option<Uuid>,
    /// When the link stops resolving.
    pub expires_at: Option<DateTime<Utc>>,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to persist a new short link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShortLink {
    /// Generated 10-character identifier.
    pub id: String,
    /// The share payload as JSON.
    pub payload: serde_json::Value,
    /// Owner of the link. `None` either for anonymous creation or for the
    /// schema-drift retry that omits the ownership column.
    pub owner_user_id: Option<Uuid>,
    /// Optional expiry.
    pub expires_at: Option<DateTime<Utc>>,
}
