//! Wishlink Server — wishlist share link service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use wishlink_core::config::AppConfig;
use wishlink_core::error::AppError;
use wishlink_core::traits::store::ShortLinkStore;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("WISHLINK_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Wishlink v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let db_pool = wishlink_database::connection::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    wishlink_database::migration::run_migrations(&db_pool).await?;
    tracing::info!("Database migrations complete");

    // ── Step 2: Repositories and services ────────────────────────
    let store: Arc<dyn ShortLinkStore> = Arc::new(
        wishlink_database::repositories::short_link::ShortLinkRepository::new(db_pool.clone()),
    );

    let allocator = wishlink_service::share::allocator::ShortLinkAllocator::new(
        Arc::clone(&store),
        config.share.base_url.clone(),
    );
    let share_link_service = Arc::new(wishlink_service::share::service::ShareLinkService::new(
        Arc::clone(&store),
        allocator,
    ));
    let link_resolver = Arc::new(wishlink_service::share::resolver::LinkResolver::new(
        Arc::clone(&store),
    ));

    let token_decoder = Arc::new(wishlink_api::auth::TokenDecoder::new(&config.auth));

    // ── Step 3: Build and start HTTP server ──────────────────────
    let app_state = wishlink_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool,
        token_decoder,
        share_link_service,
        link_resolver,
    };

    let app = wishlink_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Wishlink server listening on {}", addr);

    // ── Step 4: Graceful shutdown ────────────────────────────────
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let mut server = tokio::spawn(
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                tracing::info!("Shutdown signal received, starting graceful shutdown...");
                let _ = shutdown_tx.send(true);
            })
            .into_future(),
    );

    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    tokio::select! {
        result = &mut server => {
            result
                .map_err(|e| AppError::internal(format!("Server task failed: {e}")))?
                .map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        _ = shutdown_rx.changed() => {
            // In-flight requests get the configured grace period to drain.
            if tokio::time::timeout(grace, &mut server).await.is_err() {
                tracing::warn!(
                    grace_seconds = config.server.shutdown_grace_seconds,
                    "In-flight requests did not drain within the grace period, aborting"
                );
                server.abort();
            }
        }
    }

    tracing::info!("Wishlink server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
