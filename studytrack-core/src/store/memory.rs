/// In-memory task store
///
/// Mirrors [`PgTaskStore`](crate::store::pg::PgTaskStore) semantics for
/// tests: sequential ids starting at 1, insertion-order listing, and
/// completion forced to false on insert.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::models::task::{NewTask, Task};
use crate::store::{StoreError, TaskStore};

struct Inner {
    tasks: Vec<Task>,
    next_id: i64,
}

/// Task store holding tasks in process memory
pub struct MemoryTaskStore {
    inner: RwLock<Inner>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                tasks: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn insert(&self, new_task: NewTask) -> Result<Task, StoreError> {
        let mut inner = self.inner.write();

        let task = Task {
            id: inner.next_id,
            user_id: new_task.user_id,
            title: new_task.title,
            description: new_task.description,
            deadline: new_task.deadline,
            completed: false,
            author: new_task.author,
            created_at: Utc::now(),
        };

        inner.next_id += 1;
        inner.tasks.push(task.clone());
        Ok(task)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Task>, StoreError> {
        let tasks = self
            .inner
            .read()
            .tasks
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();

        Ok(tasks)
    }

    async fn find(&self, id: i64) -> Result<Option<Task>, StoreError> {
        let task = self.inner.read().tasks.iter().find(|t| t.id == id).cloned();
        Ok(task)
    }

    async fn set_completed(&self, id: i64, completed: bool) -> Result<bool, StoreError> {
        let mut inner = self.inner.write();

        match inner.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = completed;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut inner = self.inner.write();

        match inner.tasks.iter().position(|t| t.id == id) {
            Some(index) => {
                inner.tasks.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
