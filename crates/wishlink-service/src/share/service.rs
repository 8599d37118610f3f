//! Owner-facing share link operations.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use wishlink_core::error::AppError;
use wishlink_core::result::AppResult;
use wishlink_core::traits::store::{DeleteOutcome, ShortLinkStore};
use wishlink_core::types::short_link::ShortLinkRecord;

use super::allocator::ShortLinkAllocator;
use super::sanitize;
use crate::context::RequestContext;

/// Manages share link creation, listing, and deletion for authenticated
/// owners. Anonymous resolution lives in [`super::LinkResolver`].
#[derive(Clone)]
pub struct ShareLinkService {
    /// Short link store.
    store: Arc<dyn ShortLinkStore>,
    /// Allocator handling id generation, retries, and degradation.
    allocator: ShortLinkAllocator,
}

impl ShareLinkService {
    /// Creates a new share link service.
    pub fn new(store: Arc<dyn ShortLinkStore>, allocator: ShortLinkAllocator) -> Self {
        Self { store, allocator }
    }

    /// Create a share link from a caller-supplied payload.
    ///
    /// The payload is sanitized before anything is stored — the HTTP
    /// boundary is attacker-reachable no matter which UI sits in front
    /// of it. Returns the link URL: a short one, or the self-contained
    /// long form when the store degrades.
    pub async fn create_link(
        &self,
        ctx: &RequestContext,
        raw_payload: &serde_json::Value,
        expires_at: Option<DateTime<Utc>>,
    ) -> AppResult<String> {
        let payload = sanitize::validate_payload(raw_payload)
            .ok_or_else(|| AppError::validation("Share payload is invalid"))?;

        let url = self
            .allocator
            .create_short_link(&payload, Some(ctx.user_id), expires_at)
            .await?;

        info!(
            user_id = %ctx.user_id,
            items = payload.items.len(),
            "Share link created"
        );

        Ok(url)
    }

    /// List the caller's share links, newest first.
    pub async fn list_links(&self, ctx: &RequestContext) -> AppResult<Vec<ShortLinkRecord>> {
        self.store.list_by_owner(ctx.user_id).await
    }

    /// Delete one of the caller's share links.
    pub async fn delete_link(&self, ctx: &RequestContext, id: &str) -> AppResult<()> {
        match self.store.delete_by_id(id, ctx.user_id).await? {
            DeleteOutcome::Deleted => {
                info!(user_id = %ctx.user_id, id, "Share link deleted");
                Ok(())
            }
            DeleteOutcome::Forbidden => {
                Err(AppError::authorization("You can only delete your own share links"))
            }
            DeleteOutcome::NotFound => Err(AppError::not_found("Share link not found")),
        }
    }
}
