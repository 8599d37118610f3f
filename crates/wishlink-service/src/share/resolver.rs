//! Link resolution.
//!
//! Top-level entry point for the recipient side: the current URL's query
//! parameters go in, a trusted payload or `None` comes out. Callers
//! render a uniform "link invalid" state on `None` — failure causes are
//! logged here, not distinguished at the boundary.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use wishlink_core::traits::store::ShortLinkStore;
use wishlink_core::types::payload::SharePayload;

use super::{codec, sanitize};

/// The share-relevant query parameters of an incoming URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShareQuery {
    /// Short code (`?s=`).
    pub s: Option<String>,
    /// Embedded payload token (`?share=`).
    pub share: Option<String>,
}

/// Resolves share URLs into trusted payloads.
#[derive(Clone)]
pub struct LinkResolver {
    /// Short link store, used through its anonymous-safe read only.
    store: Arc<dyn ShortLinkStore>,
}

impl LinkResolver {
    /// Creates a new resolver.
    pub fn new(store: Arc<dyn ShortLinkStore>) -> Self {
        Self { store }
    }

    /// Resolve query parameters into a payload, or `None`.
    ///
    /// Short-code resolution is preferred. When the short lookup returns
    /// data, that data's validation result is final — stored payloads are
    /// sanitized before being trusted, and a stored-but-invalid payload
    /// does not fall through to the embedded token. Only a missing code,
    /// an empty lookup, or a store failure falls back to `?share=`.
    pub async fn resolve(&self, query: &ShareQuery) -> Option<SharePayload> {
        if let Some(id) = query.s.as_deref().filter(|s| !s.is_empty()) {
            match self.store.read_public(id).await {
                Ok(Some(raw)) => return sanitize::validate_payload(&raw),
                Ok(None) => debug!(id, "Short link not found"),
                Err(err) => warn!(id, error = %err, "Short link lookup failed"),
            }
        }

        let token = query.share.as_deref().filter(|t| !t.is_empty())?;
        let raw = codec::decode(token)?;
        sanitize::validate_payload(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
    use serde_json::json;
    use uuid::Uuid;
    use wishlink_core::error::AppError;
    use wishlink_core::result::AppResult;
    use wishlink_core::traits::store::{DeleteOutcome, InsertOutcome};
    use wishlink_core::types::short_link::{NewShortLink, ShortLinkRecord};

    /// Store stub with one fixed public-read answer.
    struct FixedStore {
        answer: AppResult<Option<serde_json::Value>>,
    }

    #[async_trait]
    impl ShortLinkStore for FixedStore {
        async fn insert(&self, _link: &NewShortLink) -> AppResult<InsertOutcome> {
            Ok(InsertOutcome::Created)
        }

        async fn read_public(&self, _id: &str) -> AppResult<Option<serde_json::Value>> {
            match &self.answer {
                Ok(v) => Ok(v.clone()),
                Err(e) => Err(e.clone()),
            }
        }

        async fn list_by_owner(&self, _owner: Uuid) -> AppResult<Vec<ShortLinkRecord>> {
            Ok(Vec::new())
        }

        async fn delete_by_id(&self, _id: &str, _caller: Uuid) -> AppResult<DeleteOutcome> {
            Ok(DeleteOutcome::NotFound)
        }
    }

    fn resolver_with(answer: AppResult<Option<serde_json::Value>>) -> LinkResolver {
        LinkResolver::new(Arc::new(FixedStore { answer }))
    }

    fn share_token(raw: &serde_json::Value) -> String {
        use base64::Engine;
        let token = base64::engine::general_purpose::STANDARD
            .encode(serde_json::to_vec(raw).unwrap());
        utf8_percent_encode(&token, NON_ALPHANUMERIC).to_string()
    }

    #[tokio::test]
    async fn prefers_short_code_and_sanitizes_stored_data() {
        let stored = json!({ "v": 1, "items": [{ "name": " gift ", "price": 5 }] });
        let resolver = resolver_with(Ok(Some(stored)));

        let query = ShareQuery {
            s: Some("abcDEF0123".to_string()),
            share: Some(share_token(&json!({ "v": 1, "items": [], "title": "other" }))),
        };
        let payload = resolver.resolve(&query).await.unwrap();
        assert_eq!(payload.items[0].name, "gift");
        assert_eq!(payload.title, None);
    }

    #[tokio::test]
    async fn stored_but_invalid_data_does_not_fall_through() {
        let resolver = resolver_with(Ok(Some(json!({ "v": 99 }))));
        let query = ShareQuery {
            s: Some("abcDEF0123".to_string()),
            share: Some(share_token(&json!({ "v": 1, "items": [] }))),
        };
        assert!(resolver.resolve(&query).await.is_none());
    }

    #[tokio::test]
    async fn missing_short_link_falls_back_to_embedded_payload() {
        let resolver = resolver_with(Ok(None));
        let query = ShareQuery {
            s: Some("unknown000".to_string()),
            share: Some(share_token(&json!({ "v": 1, "items": [], "title": "fallback" }))),
        };
        let payload = resolver.resolve(&query).await.unwrap();
        assert_eq!(payload.title.as_deref(), Some("fallback"));
    }

    #[tokio::test]
    async fn store_failure_behaves_like_not_found() {
        let resolver = resolver_with(Err(AppError::database("down")));
        let query = ShareQuery {
            s: Some("abcDEF0123".to_string()),
            share: Some(share_token(&json!({ "v": 1, "items": [] }))),
        };
        assert!(resolver.resolve(&query).await.is_some());

        let empty = ShareQuery {
            s: Some("abcDEF0123".to_string()),
            share: None,
        };
        assert!(resolver_with(Err(AppError::database("down"))).resolve(&empty).await.is_none());
    }

    #[tokio::test]
    async fn garbage_tokens_resolve_to_none() {
        let resolver = resolver_with(Ok(None));
        for share in ["%%%%", "!!!", "dGhpcyBpcyBub3QganNvbg=="] {
            let query = ShareQuery {
                s: None,
                share: Some(share.to_string()),
            };
            assert!(resolver.resolve(&query).await.is_none(), "token {share}");
        }
    }

    #[tokio::test]
    async fn empty_query_resolves_to_none() {
        let resolver = resolver_with(Ok(None));
        assert!(resolver.resolve(&ShareQuery::default()).await.is_none());
    }
}
