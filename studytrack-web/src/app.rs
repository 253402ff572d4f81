/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use studytrack_core::identity::memory::MemoryIdentity;
/// use studytrack_core::store::memory::MemoryTaskStore;
/// use studytrack_web::app::{build_router, AppState};
///
/// # async fn example() -> anyhow::Result<()> {
/// let state = AppState::new(
///     Arc::new(MemoryIdentity::new()),
///     Arc::new(MemoryTaskStore::new()),
/// );
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use studytrack_core::flows::{AccountFlow, TaskFlow};
use studytrack_core::identity::service::IdentityService;
use studytrack_core::store::TaskStore;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::middleware::security::SecurityHeadersLayer;

/// Cookie Max-Age used for "remember me" sessions when no configuration
/// says otherwise; matches the session registry's default lifetime
const DEFAULT_PERSISTENT_COOKIE_MAX_AGE_SECS: u64 = 30 * 24 * 60 * 60;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Identity service, shared by the flows and per-request principal
    /// resolution
    pub identity: Arc<dyn IdentityService>,

    /// Account flow controller
    pub accounts: Arc<AccountFlow>,

    /// Task flow controller
    pub tasks: Arc<TaskFlow>,

    /// Max-Age for the session cookie of "remember me" sessions (seconds)
    pub persistent_cookie_max_age_secs: u64,
}

impl AppState {
    /// Creates application state with the default cookie lifetime
    pub fn new(identity: Arc<dyn IdentityService>, store: Arc<dyn TaskStore>) -> Self {
        Self::with_cookie_max_age(identity, store, DEFAULT_PERSISTENT_COOKIE_MAX_AGE_SECS)
    }

    /// Creates application state with a configured cookie lifetime
    pub fn with_cookie_max_age(
        identity: Arc<dyn IdentityService>,
        store: Arc<dyn TaskStore>,
        persistent_cookie_max_age_secs: u64,
    ) -> Self {
        Self {
            accounts: Arc::new(AccountFlow::new(identity.clone())),
            tasks: Arc::new(TaskFlow::new(identity.clone(), store)),
            identity,
            persistent_cookie_max_age_secs,
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// The router is organized as follows:
/// ```text
/// /
/// ├── GET  /                    # Landing page (public)
/// ├── GET  /health              # Health check (public)
/// ├── /account/
/// │   ├── GET  /register        # Registration form
/// │   ├── POST /register        # Create account, sign in
/// │   ├── GET  /login           # Login form
/// │   ├── POST /login           # Sign in
/// │   ├── POST /logout          # End session
/// │   └── GET  /users           # User listing (JSON, public)
/// └── /tasks/                   # Gated per request by the task flow
///     ├── GET  /                # Current user's task list
///     ├── GET  /create          # Task creation form
///     ├── POST /create          # Create task
///     ├── POST /:id/toggle      # Flip completion flag
///     └── POST /:id/delete      # Delete task
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. Security headers
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Account routes (public; the flows decide what needs a session)
    let account_routes = Router::new()
        .route(
            "/register",
            get(routes::account::show_register).post(routes::account::register),
        )
        .route(
            "/login",
            get(routes::account::show_login).post(routes::account::login),
        )
        .route("/logout", post(routes::account::logout))
        .route("/users", get(routes::account::list_users));

    // Task routes (each handler passes the resolved principal to the flow,
    // which redirects anonymous requests to the login form)
    let task_routes = Router::new()
        .route("/", get(routes::tasks::list))
        .route(
            "/create",
            get(routes::tasks::show_create).post(routes::tasks::create),
        )
        .route("/:id/toggle", post(routes::tasks::toggle_completed))
        .route("/:id/delete", post(routes::tasks::delete));

    Router::new()
        .route("/", get(routes::home::index))
        .route("/health", get(routes::health::health_check))
        .nest("/account", account_routes)
        .nest("/tasks", task_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SecurityHeadersLayer::new())
        .with_state(state)
}
