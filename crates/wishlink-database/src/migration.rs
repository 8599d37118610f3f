//! Schema migrations, embedded at compile time.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use wishlink_core::error::{AppError, ErrorKind};
use wishlink_core::result::AppResult;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Bring the schema up to date.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Migration failed", e))?;

    info!(
        known = MIGRATOR.migrations.len(),
        "Database schema is up to date"
    );
    Ok(())
}
