//! # StudyTrack Web Server
//!
//! The StudyTrack server: a multi-user study-task tracker with session
//! authentication and per-user task lists, rendered as plain HTML.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/studytrack cargo run -p studytrack-web
//! ```

use std::sync::Arc;

use studytrack_core::db::migrations::run_migrations;
use studytrack_core::db::pool::create_pool;
use studytrack_core::identity::pg::PgIdentity;
use studytrack_core::identity::session::SessionRegistry;
use studytrack_core::store::pg::PgTaskStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studytrack_web::app::{build_router, AppState};
use studytrack_web::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "studytrack_web=debug,studytrack_core=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("StudyTrack v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;

    let pool = create_pool(config.database.clone()).await?;
    run_migrations(&pool).await?;

    let sessions = Arc::new(SessionRegistry::new(
        config.session.ttl(),
        config.session.persistent_ttl(),
    ));
    let identity = Arc::new(PgIdentity::with_sessions(pool.clone(), sessions));
    let store = Arc::new(PgTaskStore::new(pool));

    let state = AppState::with_cookie_max_age(
        identity,
        store,
        config.session.persistent_cookie_max_age_secs(),
    );
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Server listening on http://{}", config.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Resolves on Ctrl-C so in-flight requests can finish before exit
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }

    tracing::info!("Shutdown signal received, exiting...");
}
