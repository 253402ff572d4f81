/// Task model and creation input
///
/// A study task owned by exactly one user. Visibility and mutation are scoped
/// to the owner at the flow-controller boundary; the store itself performs no
/// authorization.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     deadline TIMESTAMPTZ NOT NULL,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     author VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task model representing one study task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Store-assigned ID, monotonically increasing in insertion order
    pub id: i64,

    /// Owning user (foreign key to `users.id`)
    pub user_id: Uuid,

    /// Task title (non-empty)
    pub title: String,

    /// Free-form description
    pub description: String,

    /// Due date
    pub deadline: DateTime<Utc>,

    /// Completion flag, false on creation
    pub completed: bool,

    /// Owner's username snapshotted at creation time
    ///
    /// Not updated if the user later changes their name.
    pub author: String,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new task
///
/// `user_id` and `author` are stamped by the task flow from the resolved
/// current user, never taken from the client. There is no completion field:
/// new tasks always start incomplete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    /// Owning user
    pub user_id: Uuid,

    /// Task title
    pub title: String,

    /// Free-form description
    pub description: String,

    /// Due date
    pub deadline: DateTime<Utc>,

    /// Owner's username at creation time
    pub author: String,
}
