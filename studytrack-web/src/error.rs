/// Error handling for the web server
///
/// The flows recover everything recoverable themselves: bad form input
/// re-renders, wrong credentials re-render, unauthenticated requests
/// redirect. The only errors left at a handler boundary are fatal ones
/// from the store or the credential subsystem, and those all map to an
/// opaque 500. The chain is logged, never shown to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Fatal handler error
///
/// Wraps anything convertible to [`anyhow::Error`] so handlers can use `?`
/// directly on flow calls.
pub struct ServerError(anyhow::Error);

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self.0, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

impl<E> From<E> for ServerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
