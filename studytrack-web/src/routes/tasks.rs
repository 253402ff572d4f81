/// Task endpoints
///
/// The ownership-scoped task pages.
///
/// # Endpoints
///
/// - `GET /tasks`: The current user's task list
/// - `GET /tasks/create`: Task creation form
/// - `POST /tasks/create`: Create a task
/// - `POST /tasks/:id/toggle`: Flip a task's completion flag
/// - `POST /tasks/:id/delete`: Delete a task
///
/// Every handler resolves the principal from the session cookie and passes
/// it to the task flow, which gates authentication and ownership itself.
/// Unauthenticated requests come back as redirects to the login form.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Form;
use serde::Deserialize;
use studytrack_core::error::FieldError;
use studytrack_core::flows::forms::{deadline, TaskForm};

use crate::app::AppState;
use crate::error::ServerError;
use crate::routes::{redirect, respond};
use crate::{extract, views};

/// Raw task submission as it arrives on the wire
///
/// The deadline stays a string here so a malformed one becomes a field
/// error on the re-rendered form instead of a rejected request. Anything
/// else the client sends (an owner id, say) has no field to land in and
/// is dropped.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TaskFormBody {
    title: String,
    description: String,
    deadline: String,
}

/// Shows the current user's task list
pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let mut slot = extract::session_slot(&headers);
    let principal = extract::resolve_principal(&state, &slot);

    let outcome = state.tasks.list(principal.as_ref()).await?;

    Ok(respond(&state, outcome, &mut slot, |tasks, _| {
        views::task_list_page(tasks)
    }))
}

/// Shows the blank task creation form
pub async fn show_create(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let mut slot = extract::session_slot(&headers);
    let principal = extract::resolve_principal(&state, &slot);

    let outcome = state.tasks.show_create(principal.as_ref()).await?;

    Ok(respond(&state, outcome, &mut slot, |form, errors| {
        views::task_form_page(form, errors)
    }))
}

/// Handles a task creation submission
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(body): Form<TaskFormBody>,
) -> Result<Response, ServerError> {
    let mut slot = extract::session_slot(&headers);
    let principal = extract::resolve_principal(&state, &slot);

    // A deadline that does not parse becomes a prior error against a form
    // with the default deadline; the flow still gates authentication first,
    // so an anonymous submission redirects instead of re-rendering.
    let (form, prior_errors) = match deadline::parse(&body.deadline) {
        Ok(parsed) => (
            TaskForm {
                title: body.title,
                description: body.description,
                deadline: parsed,
            },
            Vec::new(),
        ),
        Err(_) => (
            TaskForm {
                title: body.title,
                description: body.description,
                ..TaskForm::default()
            },
            vec![FieldError::new("deadline", "Enter a valid deadline")],
        ),
    };

    let outcome = state.tasks.create(principal.as_ref(), form, prior_errors).await?;

    Ok(respond(&state, outcome, &mut slot, |form, errors| {
        views::task_form_page(form, errors)
    }))
}

/// Flips the completion flag on a task the current user owns
pub async fn toggle_completed(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let mut slot = extract::session_slot(&headers);
    let principal = extract::resolve_principal(&state, &slot);

    let target = state.tasks.toggle_completed(principal.as_ref(), id).await?;

    Ok(redirect(&state, target, &mut slot))
}

/// Deletes a task the current user owns
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let mut slot = extract::session_slot(&headers);
    let principal = extract::resolve_principal(&state, &slot);

    let target = state.tasks.delete(principal.as_ref(), id).await?;

    Ok(redirect(&state, target, &mut slot))
}
