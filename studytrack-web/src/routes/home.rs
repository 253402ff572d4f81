/// Landing page
///
/// # Endpoint
///
/// ```text
/// GET /
/// ```
///
/// Public; the greeting changes when the request carries a valid session.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;

use crate::app::AppState;
use crate::{extract, views};

/// Landing page handler
pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let slot = extract::session_slot(&headers);
    let principal = extract::resolve_principal(&state, &slot);

    Html(views::home_page(principal.as_ref()))
}
