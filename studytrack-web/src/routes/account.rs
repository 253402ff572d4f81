/// Account endpoints
///
/// Registration, login, logout, and the public user listing.
///
/// # Endpoints
///
/// - `GET /account/register`: Registration form
/// - `POST /account/register`: Create an account and sign in
/// - `GET /account/login`: Login form
/// - `POST /account/login`: Sign in with email and password
/// - `POST /account/logout`: End the current session
/// - `GET /account/users`: JSON listing of registered users
///
/// The form handlers hand the submission to the account flow and translate
/// its outcome: invalid input re-renders the form with the submitted values
/// and field errors, success redirects with the session cookie set.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use axum::{Form, Json};
use studytrack_core::flows::forms::{LoginForm, RegisterForm};
use studytrack_core::identity::session::SessionSlot;
use studytrack_core::models::user::UserSummary;

use crate::app::AppState;
use crate::error::ServerError;
use crate::routes::{redirect, respond};
use crate::{extract, views};

/// Shows the registration form
pub async fn show_register(State(state): State<AppState>) -> Response {
    let outcome = state.accounts.show_register();

    respond(&state, outcome, &mut SessionSlot::empty(), |form, errors| {
        views::register_page(form, errors)
    })
}

/// Handles a registration submission
///
/// On success the new user is signed in and sent to the home page.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<RegisterForm>,
) -> Result<Response, ServerError> {
    let mut slot = extract::session_slot(&headers);

    let outcome = state.accounts.register(form, Vec::new(), &mut slot).await?;

    Ok(respond(&state, outcome, &mut slot, |form, errors| {
        views::register_page(form, errors)
    }))
}

/// Shows the login form
pub async fn show_login(State(state): State<AppState>) -> Response {
    let outcome = state.accounts.show_login();

    respond(&state, outcome, &mut SessionSlot::empty(), |form, errors| {
        views::login_page(form, errors)
    })
}

/// Handles a login submission
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Result<Response, ServerError> {
    let mut slot = extract::session_slot(&headers);

    let outcome = state.accounts.login(form, Vec::new(), &mut slot).await?;

    Ok(respond(&state, outcome, &mut slot, |form, errors| {
        views::login_page(form, errors)
    }))
}

/// Ends the current session and clears its cookie
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut slot = extract::session_slot(&headers);

    let target = state.accounts.logout(&mut slot);

    redirect(&state, target, &mut slot)
}

/// Lists every registered user as a public summary
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserSummary>>, ServerError> {
    Ok(Json(state.accounts.list_users().await?))
}
