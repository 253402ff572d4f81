/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - A test context running the real router over in-memory backends
/// - Request builders for browser-shaped traffic (forms, cookies)
/// - Response helpers (body collection, session cookie extraction)
///
/// No database or environment is needed; every context starts empty.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use studytrack_core::identity::memory::MemoryIdentity;
use studytrack_core::store::memory::MemoryTaskStore;
use studytrack_web::app::{build_router, AppState};
use tower::Service as _;

/// Test context containing the app and handles on its backends
pub struct TestContext {
    pub app: Router,
    pub identity: Arc<MemoryIdentity>,
    pub store: Arc<MemoryTaskStore>,
}

impl TestContext {
    /// Creates a new test context with fresh in-memory backends
    pub fn new() -> Self {
        let identity = Arc::new(MemoryIdentity::new());
        let store = Arc::new(MemoryTaskStore::new());
        let state = AppState::new(identity.clone(), store.clone());
        let app = build_router(state);

        Self {
            app,
            identity,
            store,
        }
    }

    /// Sends a request through the router
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.app.clone().call(request).await.unwrap()
    }

    /// Registers a user through the real endpoint and returns the session
    /// cookie pair for follow-up requests
    pub async fn register(&self, full_name: &str, email: &str) -> String {
        let body = format!(
            "full_name={}&email={}&password=Test123!&confirm_password=Test123!",
            full_name.replace(' ', "+"),
            email
        );

        let response = self.send(post_form("/account/register", &body)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        session_cookie(&response).expect("Registration should set the session cookie")
    }

    /// Creates a task through the real endpoint for the given session
    pub async fn create_task(&self, cookie: &str, title: &str) {
        let body = format!(
            "title={}&description=New+Test+Description&deadline=2030-01-15T10:30",
            title.replace(' ', "+")
        );

        let response = self
            .send(post_form_with_cookie("/tasks/create", cookie, &body))
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/tasks");
    }
}

/// Builds a GET request
pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Builds a GET request carrying a session cookie
pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

/// Builds an urlencoded form POST
pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Builds an urlencoded form POST carrying a session cookie
pub fn post_form_with_cookie(uri: &str, cookie: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .header(header::COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Collects a response body into a string
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Extracts the `name=value` pair of the session cookie from a response,
/// ready to send back in a `Cookie` header
pub fn session_cookie(response: &Response) -> Option<String> {
    let value = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    let pair = value.split(';').next()?.trim();

    pair.starts_with("studytrack_session=").then(|| pair.to_string())
}

/// Returns the raw `Set-Cookie` header of a response, if any
pub fn set_cookie_header(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}

/// Returns the `Location` header of a redirect
pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
