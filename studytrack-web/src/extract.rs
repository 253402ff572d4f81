/// Session cookie plumbing
///
/// Pulls the opaque session token out of the request's `Cookie` header,
/// resolves it to a principal, and turns the slot's pending change into a
/// `Set-Cookie` header on the way out. The cookie is `HttpOnly` and
/// `SameSite=Lax`; it only carries `Max-Age` for "remember me" sessions,
/// so ordinary sessions also die with the browser.

use axum::http::{header, HeaderMap, HeaderValue};
use studytrack_core::identity::principal::Principal;
use studytrack_core::identity::session::{SessionChange, SessionSlot};

use crate::app::AppState;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "studytrack_session";

/// Reads a single cookie value from the request headers
pub fn parse_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;

    for part in raw.split(';') {
        let part = part.trim();
        if let Some((key, value)) = part.split_once('=') {
            if key == name {
                return Some(value.to_string());
            }
        }
    }

    None
}

/// Builds the per-request session slot from the cookie header
pub fn session_slot(headers: &HeaderMap) -> SessionSlot {
    match parse_cookie(headers, SESSION_COOKIE) {
        Some(token) => SessionSlot::with_token(token),
        None => SessionSlot::empty(),
    }
}

/// Resolves the request's principal, if its session token is still valid
pub fn resolve_principal(state: &AppState, slot: &SessionSlot) -> Option<Principal> {
    slot.token()
        .and_then(|token| state.identity.resolve_principal(token))
}

/// Builds the `Set-Cookie` value establishing a session
///
/// `max_age_secs` is only set for "remember me" sessions; without it the
/// cookie is dropped when the browser exits.
pub fn set_session_cookie(token: &str, max_age_secs: Option<u64>) -> HeaderValue {
    let value = match max_age_secs {
        Some(secs) => format!(
            "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, token, secs
        ),
        None => format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, token
        ),
    };

    // Tokens are base62 and the attributes are fixed, so this cannot fail
    HeaderValue::from_str(&value).unwrap()
}

/// Builds the `Set-Cookie` value clearing the session cookie
pub fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_str(&format!(
        "{}=deleted; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE
    ))
    .unwrap()
}

/// Applies the slot's pending session change as a `Set-Cookie` header
///
/// At most one change is pending per request, so at most one header is
/// written.
pub fn apply_session_change(
    headers: &mut HeaderMap,
    slot: &mut SessionSlot,
    persistent_max_age_secs: u64,
) {
    match slot.take_change() {
        Some(SessionChange::Establish { token, persistent }) => {
            let max_age = persistent.then_some(persistent_max_age_secs);
            headers.insert(header::SET_COOKIE, set_session_cookie(&token, max_age));
        }
        Some(SessionChange::Clear) => {
            headers.insert(header::SET_COOKIE, clear_session_cookie());
        }
        None => {}
    }
}
