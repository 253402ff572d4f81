/// Route handlers
///
/// This module contains all route handlers organized by page group:
///
/// - `home`: Landing page
/// - `health`: Health check endpoint
/// - `account`: Registration, login, logout, user listing
/// - `tasks`: Task list, creation, completion toggling, deletion
///
/// Handlers translate HTTP into flow calls and flow outcomes back into
/// responses; every decision about validation, authentication, and
/// ownership lives in the flows.

pub mod account;
pub mod health;
pub mod home;
pub mod tasks;

use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use studytrack_core::error::FieldError;
use studytrack_core::flows::outcome::{Outcome, Target};
use studytrack_core::identity::session::SessionSlot;

use crate::app::AppState;
use crate::extract;

/// Maps a flow redirect target onto its route path
pub fn target_path(target: Target) -> &'static str {
    match target {
        Target::Home => "/",
        Target::Login => "/account/login",
        Target::TaskList => "/tasks",
    }
}

/// Turns a flow outcome into an HTTP response
///
/// Render outcomes become HTML pages through `page`; redirect outcomes
/// become 303s so the browser re-fetches with GET. The slot's pending
/// session change (if any) rides along as a `Set-Cookie` header.
pub(crate) fn respond<M>(
    state: &AppState,
    outcome: Outcome<M>,
    slot: &mut SessionSlot,
    page: impl FnOnce(&M, &[FieldError]) -> String,
) -> Response {
    let mut headers = HeaderMap::new();
    extract::apply_session_change(&mut headers, slot, state.persistent_cookie_max_age_secs);

    match outcome {
        Outcome::Render { model, errors } => (headers, Html(page(&model, &errors))).into_response(),
        Outcome::Redirect(target) => (headers, Redirect::to(target_path(target))).into_response(),
    }
}

/// Turns a bare redirect target into an HTTP response, cookie change included
pub(crate) fn redirect(state: &AppState, target: Target, slot: &mut SessionSlot) -> Response {
    let mut headers = HeaderMap::new();
    extract::apply_session_change(&mut headers, slot, state.persistent_cookie_max_age_secs);

    (headers, Redirect::to(target_path(target))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_paths() {
        assert_eq!(target_path(Target::Home), "/");
        assert_eq!(target_path(Target::Login), "/account/login");
        assert_eq!(target_path(Target::TaskList), "/tasks");
    }
}
