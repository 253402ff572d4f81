/// Form models for the account and task pages
///
/// Each form doubles as the page view-model: on validation failure the flow
/// re-renders the same struct so submitted values survive the round trip.
/// Owner and author never appear here; the task flow stamps them from the
/// resolved current user.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::error::FieldError;

/// Registration form
///
/// `confirm_password` has no derive rule; the account flow compares it to
/// `password` by hand so the mismatch message lands on the right field.
/// Missing fields deserialize as empty strings and fail validation instead
/// of failing the body parse.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterForm {
    /// Full name
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,

    /// Email address, also used as the account's username
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (strength policy is enforced by the identity service)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Password confirmation
    pub confirm_password: String,
}

/// Login form
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginForm {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    /// Extends the session lifetime; absent in the form body when unchecked
    #[serde(default, deserialize_with = "checkbox::deserialize")]
    pub remember_me: bool,
}

/// Task creation form
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct TaskForm {
    /// Task title
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Due date
    #[serde(deserialize_with = "deadline::deserialize")]
    pub deadline: DateTime<Utc>,
}

impl Default for TaskForm {
    /// The blank form shown by the create page: empty text fields and a
    /// deadline one day out, so the default is always in the future
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            deadline: Utc::now() + Duration::days(1),
        }
    }
}

/// Deadline parsing
///
/// Browsers submit `<input type="datetime-local">` values without a zone
/// (`2030-01-15T10:30`); those are taken as UTC. Full RFC 3339 timestamps
/// are accepted as well.
pub mod deadline {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};

    const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

    /// Parses a deadline string from a form submission
    pub fn parse(value: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
            return Ok(parsed.with_timezone(&Utc));
        }

        for format in LOCAL_FORMATS {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
                return Ok(parsed.and_utc());
            }
        }

        Err(format!("Invalid deadline: {}", value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        parse(&value).map_err(serde::de::Error::custom)
    }
}

/// Checkbox parsing
///
/// A checked HTML checkbox submits its value (`on` unless overridden) and
/// an unchecked one submits nothing at all, so the field deserializes from
/// an optional string rather than a bool.
pub mod checkbox {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(matches!(value.as_deref(), Some("on" | "true" | "1")))
    }
}

/// Flattens `validator` output into field errors, in field order
pub fn collect_errors(result: Result<(), validator::ValidationErrors>) -> Vec<FieldError> {
    match result {
        Ok(()) => Vec::new(),
        Err(e) => e
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| FieldError {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect(),
    }
}
