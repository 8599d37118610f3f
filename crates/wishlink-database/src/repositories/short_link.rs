//! Short link repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use wishlink_core::error::{AppError, ErrorKind};
use wishlink_core::result::AppResult;
use wishlink_core::traits::store::{DeleteOutcome, InsertOutcome, ShortLinkStore};
use wishlink_core::types::short_link::{NewShortLink, ShortLinkRecord};

/// PostgreSQL unique-violation error code.
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL undefined-column error code.
const UNDEFINED_COLUMN: &str = "42703";

/// Repository for short link persistence and public lookup.
#[derive(Debug, Clone)]
pub struct ShortLinkRepository {
    pool: PgPool,
}

impl ShortLinkRepository {
    /// Create a new short link repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Map an insert error to an outcome where the allocator has a
    /// recovery path, or to an `AppError` where it does not.
    fn classify_insert_error(err: sqlx::Error) -> AppResult<InsertOutcome> {
        if let sqlx::Error::Database(ref db) = err {
            match db.code().as_deref() {
                Some(UNIQUE_VIOLATION) => return Ok(InsertOutcome::Conflict),
                Some(UNDEFINED_COLUMN) => return Ok(InsertOutcome::UnknownColumn),
                _ => {}
            }
        }
        Err(AppError::with_source(
            ErrorKind::Database,
            "Failed to insert short link",
            err,
        ))
    }
}

#[async_trait]
impl ShortLinkStore for ShortLinkRepository {
    async fn insert(&self, link: &NewShortLink) -> AppResult<InsertOutcome> {
        // The ownerless variant names fewer columns so the schema-drift
        // retry does not trip over the missing column again.
        let result = match link.owner_user_id {
            Some(owner) => {
                sqlx::query(
                    "INSERT INTO short_links (id, payload, owner_user_id, expires_at) \
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(&link.id)
                .bind(&link.payload)
                .bind(owner)
                .bind(link.expires_at)
                .execute(&self.pool)
                .await
            }
            None => {
                sqlx::query("INSERT INTO short_links (id, payload, expires_at) VALUES ($1, $2, $3)")
                    .bind(&link.id)
                    .bind(&link.payload)
                    .bind(link.expires_at)
                    .execute(&self.pool)
                    .await
            }
        };

        match result {
            Ok(_) => Ok(InsertOutcome::Created),
            Err(err) => Self::classify_insert_error(err),
        }
    }

    async fn read_public(&self, id: &str) -> AppResult<Option<serde_json::Value>> {
        // Restricted projection: anonymous readers get the payload column
        // of unexpired rows and nothing else.
        sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT payload FROM short_links \
             WHERE id = $1 AND (expires_at IS NULL OR expires_at > NOW())",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read short link", e))
    }

    async fn list_by_owner(&self, owner_user_id: Uuid) -> AppResult<Vec<ShortLinkRecord>> {
        sqlx::query_as::<_, ShortLinkRecord>(
            "SELECT id, payload, owner_user_id, expires_at, created_at FROM short_links \
             WHERE owner_user_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list short links", e))
    }

    async fn delete_by_id(&self, id: &str, caller: Uuid) -> AppResult<DeleteOutcome> {
        // Owner check and delete in one statement; a concurrent delete
        // cannot slip in between them.
        let deleted = sqlx::query("DELETE FROM short_links WHERE id = $1 AND owner_user_id = $2")
            .bind(id)
            .bind(caller)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete short link", e)
            })?
            .rows_affected();

        if deleted > 0 {
            return Ok(DeleteOutcome::Deleted);
        }

        // Nothing deleted: the row either never existed or belongs to
        // someone else.
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM short_links WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to find short link", e)
                })?;

        Ok(if exists {
            DeleteOutcome::Forbidden
        } else {
            DeleteOutcome::NotFound
        })
    }
}
