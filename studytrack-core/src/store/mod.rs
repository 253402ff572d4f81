/// Task persistence
///
/// The store reads and writes tasks and nothing else: it performs no
/// authorization. Ownership checks live in the task flow controller, which
/// only hands the store ids it has already cleared.
///
/// Implementations:
/// - [`PgTaskStore`]: PostgreSQL-backed
/// - [`MemoryTaskStore`]: in-memory, for tests

pub mod memory;
pub mod pg;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::task::{NewTask, Task};

pub use memory::MemoryTaskStore;
pub use pg::PgTaskStore;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Operations the task flow controller requires from persistence
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Persists a new task and returns it with its assigned id
    ///
    /// New tasks always start incomplete.
    async fn insert(&self, new_task: NewTask) -> Result<Task, StoreError>;

    /// Lists the tasks owned by one user, in insertion order
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Task>, StoreError>;

    /// Looks up a task by id, regardless of owner
    async fn find(&self, id: i64) -> Result<Option<Task>, StoreError>;

    /// Sets the completion flag on a task
    ///
    /// Returns `false` if no task with that id exists.
    async fn set_completed(&self, id: i64, completed: bool) -> Result<bool, StoreError>;

    /// Deletes a task by id
    ///
    /// Returns `false` if no task with that id exists.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}
