//! The short link store contract.
//!
//! The store exposes two deliberately separate capability sets: the
//! owner-authenticated operations (insert, list, delete) and the
//! anonymous-safe read of a restricted projection. Anonymous recipients
//! have no identity, so `read_public` must work without authentication
//! while never permitting scans or exposing ownership data.

use async_trait::async_trait;
use uuid::Uuid;

use crate::result::AppResult;
use crate::types::short_link::{NewShortLink, ShortLinkRecord};

/// Outcome of a short link insert attempt.
///
/// `Conflict` and `UnknownColumn` are expected conditions the allocator
/// handles itself; anything else surfaces as an `AppError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The record was persisted.
    Created,
    /// The identifier is already taken.
    Conflict,
    /// The backing schema does not have the optional ownership column.
    UnknownColumn,
}

/// Outcome of a short link delete attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The record was removed.
    Deleted,
    /// The record exists but belongs to someone else.
    Forbidden,
    /// No record with that identifier.
    NotFound,
}

/// Persistence operations for short links.
#[async_trait]
pub trait ShortLinkStore: Send + Sync {
    /// Insert a new short link. Identifier uniqueness is enforced by the
    /// store's atomic insert semantics, not by the caller.
    async fn insert(&self, link: &NewShortLink) -> AppResult<InsertOutcome>;

    /// Anonymous-safe read: the raw payload of an unexpired link, or
    /// `None`. Callers must sanitize the returned value before trusting it.
    async fn read_public(&self, id: &str) -> AppResult<Option<serde_json::Value>>;

    /// List all links owned by a user, newest first.
    async fn list_by_owner(&self, owner_user_id: Uuid) -> AppResult<Vec<ShortLinkRecord>>;

    /// Delete a link on behalf of `caller`, refusing foreign records.
    async fn delete_by_id(&self, id: &str, caller: Uuid) -> AppResult<DeleteOutcome>;
}
