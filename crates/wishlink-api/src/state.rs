//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use wishlink_core::config::AppConfig;
use wishlink_service::share::resolver::LinkResolver;
use wishlink_service::share::service::ShareLinkService;

use crate::auth::TokenDecoder;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Access token decoder.
    pub token_decoder: Arc<TokenDecoder>,
    /// Owner-facing share link service.
    pub share_link_service: Arc<ShareLinkService>,
    /// Anonymous link resolver.
    pub link_resolver: Arc<LinkResolver>,
}
