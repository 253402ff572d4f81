/// PostgreSQL-backed task store

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::task::{NewTask, Task};
use crate::store::{StoreError, TaskStore};

/// Task store backed by the `tasks` table
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn insert(&self, new_task: NewTask) -> Result<Task, StoreError> {
        // `completed` is left to its column default (FALSE)
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, title, description, deadline, author)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, title, description, deadline, completed, author, created_at
            "#,
        )
        .bind(new_task.user_id)
        .bind(&new_task.title)
        .bind(&new_task.description)
        .bind(new_task.deadline)
        .bind(&new_task.author)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Task>, StoreError> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, deadline, completed, author, created_at
            FROM tasks
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn find(&self, id: i64) -> Result<Option<Task>, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, deadline, completed, author, created_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn set_completed(&self, id: i64, completed: bool) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET completed = $2
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(completed)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
