//! Short link allocation.
//!
//! Allocates collision-resistant 10-character identifiers and persists
//! the payload behind them. Creation degrades instead of failing: when
//! the store cannot take the record — repeated collisions, schema drift
//! it cannot recover from, or plain unavailability — the caller still
//! gets a working link, just the self-contained long form.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};
use uuid::Uuid;

use wishlink_core::result::AppResult;
use wishlink_core::traits::store::{InsertOutcome, ShortLinkStore};
use wishlink_core::types::payload::SharePayload;
use wishlink_core::types::short_link::{NewShortLink, SHORT_ID_LENGTH};

use super::codec;

/// The 62-symbol identifier alphabet.
const ID_ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Total insert attempts before degrading to a long link. Retries run
/// strictly sequentially so worst-case latency stays bounded.
const MAX_INSERT_ATTEMPTS: u32 = 3;

/// Allocates short identifiers and persists payloads behind them.
#[derive(Clone)]
pub struct ShortLinkAllocator {
    /// Short link store.
    store: Arc<dyn ShortLinkStore>,
    /// Public base URL that links are built against.
    base_url: String,
}

impl ShortLinkAllocator {
    /// Creates a new allocator.
    pub fn new(store: Arc<dyn ShortLinkStore>, base_url: impl Into<String>) -> Self {
        Self {
            store,
            base_url: base_url.into(),
        }
    }

    /// Create a short link for `payload` and return its URL.
    ///
    /// Never hard-fails for store reasons: after [`MAX_INSERT_ATTEMPTS`]
    /// collisions or on any store error it falls back to the
    /// self-contained long URL. The only error path is payload
    /// serialization, which a well-formed payload cannot hit.
    pub async fn create_short_link(
        &self,
        payload: &SharePayload,
        owner_user_id: Option<Uuid>,
        expires_at: Option<DateTime<Utc>>,
    ) -> AppResult<String> {
        let payload_json = serde_json::to_value(payload)?;

        for attempt in 1..=MAX_INSERT_ATTEMPTS {
            let link = NewShortLink {
                id: generate_short_id(),
                payload: payload_json.clone(),
                owner_user_id,
                expires_at,
            };

            match self.store.insert(&link).await {
                Ok(InsertOutcome::Created) => return Ok(self.short_url(&link.id)),
                Ok(InsertOutcome::Conflict) => {
                    debug!(attempt, id = %link.id, "Short id collision, regenerating");
                }
                Ok(InsertOutcome::UnknownColumn) => {
                    // Schema drift on the optional ownership column:
                    // retry the same id once without it.
                    warn!(id = %link.id, "Store lacks ownership column, retrying without it");
                    let ownerless = NewShortLink {
                        owner_user_id: None,
                        ..link.clone()
                    };
                    match self.store.insert(&ownerless).await {
                        Ok(InsertOutcome::Created) => return Ok(self.short_url(&ownerless.id)),
                        Ok(InsertOutcome::Conflict) => {
                            debug!(attempt, id = %ownerless.id, "Short id collision on ownerless retry");
                        }
                        Ok(InsertOutcome::UnknownColumn) | Err(_) => break,
                    }
                }
                Err(err) => {
                    warn!(attempt, error = %err, "Short link insert failed");
                    break;
                }
            }
        }

        warn!("Short link creation exhausted, degrading to self-contained link");
        self.long_url(payload)
    }

    /// Build the self-contained long URL embedding the whole payload.
    pub fn long_url(&self, payload: &SharePayload) -> AppResult<String> {
        let token = codec::encode(payload)?;
        let escaped = utf8_percent_encode(&token, NON_ALPHANUMERIC);
        Ok(format!("{}?share={}", self.base_url, escaped))
    }

    fn short_url(&self, id: &str) -> String {
        format!("{}?s={}", self.base_url, id)
    }
}

/// Generate a 10-character identifier drawn uniformly from the
/// 62-symbol alphabet.
///
/// Seeded from OS entropy when available; when the OS source fails the
/// generator falls back to a clock seed, which is reduced — not absent —
/// unpredictability, and is logged as such.
fn generate_short_id() -> String {
    let mut rng = match StdRng::try_from_os_rng() {
        Ok(rng) => rng,
        Err(err) => {
            warn!(error = %err, "OS entropy unavailable, short ids fall back to a clock seed");
            StdRng::seed_from_u64(clock_seed())
        }
    };
    (0..SHORT_ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use wishlink_core::error::AppError;
    use wishlink_core::traits::store::DeleteOutcome;
    use wishlink_core::types::payload::{PAYLOAD_VERSION, ShareItem, ShareOptions};
    use wishlink_core::types::short_link::ShortLinkRecord;

    /// Store stub driven by a script of insert outcomes.
    struct ScriptedStore {
        script: Mutex<Vec<AppResult<InsertOutcome>>>,
        inserted: Mutex<Vec<NewShortLink>>,
    }

    impl ScriptedStore {
        fn new(script: Vec<AppResult<InsertOutcome>>) -> Self {
            Self {
                script: Mutex::new(script),
                inserted: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ShortLinkStore for ScriptedStore {
        async fn insert(&self, link: &NewShortLink) -> AppResult<InsertOutcome> {
            self.inserted.lock().unwrap().push(link.clone());
            let mut script = self.script.lock().unwrap();
            if script.is_empty() {
                Ok(InsertOutcome::Conflict)
            } else {
                script.remove(0)
            }
        }

        async fn read_public(&self, _id: &str) -> AppResult<Option<serde_json::Value>> {
            Ok(None)
        }

        async fn list_by_owner(&self, _owner: Uuid) -> AppResult<Vec<ShortLinkRecord>> {
            Ok(Vec::new())
        }

        async fn delete_by_id(&self, _id: &str, _caller: Uuid) -> AppResult<DeleteOutcome> {
            Ok(DeleteOutcome::NotFound)
        }
    }

    fn payload() -> SharePayload {
        SharePayload {
            v: PAYLOAD_VERSION,
            author: None,
            author_email: None,
            title: None,
            note: None,
            options: ShareOptions::default(),
            items: vec![ShareItem {
                name: "Книга".to_string(),
                price: 50.0,
                currency: "RUB".to_string(),
                link: None,
                item_type: None,
                comment: None,
                category: None,
            }],
        }
    }

    #[test]
    fn ids_have_fixed_length_and_alphabet() {
        for _ in 0..100 {
            let id = generate_short_id();
            assert_eq!(id.len(), SHORT_ID_LENGTH);
            assert!(id.bytes().all(|b| ID_ALPHABET.contains(&b)));
        }
    }

    #[tokio::test]
    async fn returns_third_id_after_two_collisions() {
        let store = Arc::new(ScriptedStore::new(vec![
            Ok(InsertOutcome::Conflict),
            Ok(InsertOutcome::Conflict),
            Ok(InsertOutcome::Created),
        ]));
        let allocator = ShortLinkAllocator::new(store.clone(), "https://w.example/list");

        let url = allocator.create_short_link(&payload(), None, None).await.unwrap();

        let inserted = store.inserted.lock().unwrap();
        assert_eq!(inserted.len(), 3);
        assert_eq!(url, format!("https://w.example/list?s={}", inserted[2].id));
        // Every attempt used a fresh id.
        assert_ne!(inserted[0].id, inserted[1].id);
        assert_ne!(inserted[1].id, inserted[2].id);
    }

    #[tokio::test]
    async fn degrades_to_long_url_when_every_attempt_conflicts() {
        let store = Arc::new(ScriptedStore::new(vec![
            Ok(InsertOutcome::Conflict),
            Ok(InsertOutcome::Conflict),
            Ok(InsertOutcome::Conflict),
        ]));
        let allocator = ShortLinkAllocator::new(store.clone(), "https://w.example/list");

        let url = allocator.create_short_link(&payload(), None, None).await.unwrap();

        assert_eq!(store.inserted.lock().unwrap().len(), 3);
        assert!(url.starts_with("https://w.example/list?share="));
    }

    #[tokio::test]
    async fn degrades_to_long_url_when_store_errors() {
        let store = Arc::new(ScriptedStore::new(vec![Err(AppError::database("down"))]));
        let allocator = ShortLinkAllocator::new(store.clone(), "https://w.example/list");

        let url = allocator.create_short_link(&payload(), None, None).await.unwrap();

        assert_eq!(store.inserted.lock().unwrap().len(), 1);
        assert!(url.contains("?share="));
    }

    #[tokio::test]
    async fn retries_same_id_without_owner_on_unknown_column() {
        let store = Arc::new(ScriptedStore::new(vec![
            Ok(InsertOutcome::UnknownColumn),
            Ok(InsertOutcome::Created),
        ]));
        let allocator = ShortLinkAllocator::new(store.clone(), "https://w.example/list");
        let owner = Uuid::new_v4();

        let url = allocator
            .create_short_link(&payload(), Some(owner), None)
            .await
            .unwrap();

        let inserted = store.inserted.lock().unwrap();
        assert_eq!(inserted.len(), 2);
        assert_eq!(inserted[0].owner_user_id, Some(owner));
        assert_eq!(inserted[1].owner_user_id, None);
        assert_eq!(inserted[0].id, inserted[1].id);
        assert_eq!(url, format!("https://w.example/list?s={}", inserted[1].id));
    }
}
