/// Shared error types for the core crate
///
/// Flow controllers return `FlowError` for fatal failures (store unavailable,
/// credential subsystem broken). Recoverable problems such as bad form input
/// or wrong credentials never surface here; they travel as `FieldError`
/// values attached to a re-rendered page model.
///
/// # Example
///
/// ```
/// use studytrack_core::error::FieldError;
///
/// let error = FieldError::new("email", "Invalid email format");
/// assert_eq!(error.field, "email");
/// ```

use serde::{Deserialize, Serialize};

use crate::identity::service::IdentityError;
use crate::store::StoreError;

/// A validation error attached to a single form field
///
/// An empty `field` marks a form-level error that is not tied to one input
/// (for example the generic failed-login message).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

impl FieldError {
    /// Creates a field error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Fatal error from a flow controller operation
///
/// Wraps the failures of the two collaborators a flow talks to. Both map to
/// a server error at the HTTP boundary; neither is retried.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// Identity service failure
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// Task store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}
