/// Database models for StudyTrack
///
/// This module contains the persisted entities and their view projections.
/// CRUD lives with the backends (`identity::pg`, `store::pg`), not here;
/// the models stay plain data.
///
/// # Models
///
/// - `user`: User accounts and the summary projection served as JSON
/// - `task`: Study tasks owned by a single user
///
/// # Example
///
/// ```
/// use studytrack_core::models::user::{User, UserSummary};
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let user = User {
///     id: Uuid::new_v4(),
///     username: "alice@mail.com".to_string(),
///     email: "alice@mail.com".to_string(),
///     full_name: "Alice A".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     created_at: Utc::now(),
/// };
///
/// let summary = UserSummary::from(&user);
/// assert_eq!(summary.email, "alice@mail.com");
/// ```

pub mod task;
pub mod user;
