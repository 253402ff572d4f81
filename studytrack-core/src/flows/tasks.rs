/// Task flow controller
///
/// Every operation resolves the current user first; an unauthenticated
/// request redirects to the login form before the store is touched. That
/// resolution is the single authorization gate for the whole controller:
/// reads are scoped to the resolved user's id and mutations check ownership
/// against it. The store itself never authorizes anything.

use std::sync::Arc;

use validator::Validate;

use crate::error::{FieldError, FlowError};
use crate::flows::forms::{collect_errors, TaskForm};
use crate::flows::outcome::{Outcome, Target};
use crate::identity::principal::Principal;
use crate::identity::service::IdentityService;
use crate::models::task::{NewTask, Task};
use crate::models::user::User;
use crate::store::TaskStore;

/// Flow controller for the task pages
pub struct TaskFlow {
    identity: Arc<dyn IdentityService>,
    store: Arc<dyn TaskStore>,
}

impl TaskFlow {
    pub fn new(identity: Arc<dyn IdentityService>, store: Arc<dyn TaskStore>) -> Self {
        Self { identity, store }
    }

    async fn current_user(
        &self,
        principal: Option<&Principal>,
    ) -> Result<Option<User>, FlowError> {
        Ok(self.identity.current_user(principal).await?)
    }

    /// Lists the current user's tasks
    ///
    /// A signed-in user with no tasks renders an empty list, not an error.
    pub async fn list(
        &self,
        principal: Option<&Principal>,
    ) -> Result<Outcome<Vec<Task>>, FlowError> {
        let user = match self.current_user(principal).await? {
            Some(user) => user,
            None => return Ok(Outcome::Redirect(Target::Login)),
        };

        let tasks = self.store.list_for_user(user.id).await?;
        Ok(Outcome::render(tasks))
    }

    /// Shows the blank task creation form
    pub async fn show_create(
        &self,
        principal: Option<&Principal>,
    ) -> Result<Outcome<TaskForm>, FlowError> {
        if self.current_user(principal).await?.is_none() {
            return Ok(Outcome::Redirect(Target::Login));
        }

        Ok(Outcome::render(TaskForm::default()))
    }

    /// Handles a task creation submission
    ///
    /// `prior_errors` carries validation errors the caller already knows
    /// about (a deadline that failed to parse, typically); the gate still
    /// runs first, so an unauthenticated submission redirects rather than
    /// re-rendering. Owner and author are stamped from the resolved current
    /// user; nothing the client sends can influence them. The completion
    /// flag starts false.
    pub async fn create(
        &self,
        principal: Option<&Principal>,
        form: TaskForm,
        prior_errors: Vec<FieldError>,
    ) -> Result<Outcome<TaskForm>, FlowError> {
        let user = match self.current_user(principal).await? {
            Some(user) => user,
            None => return Ok(Outcome::Redirect(Target::Login)),
        };

        let mut errors = prior_errors;
        errors.extend(collect_errors(form.validate()));
        if !errors.is_empty() {
            return Ok(Outcome::render_with_errors(form, errors));
        }

        let new_task = NewTask {
            user_id: user.id,
            title: form.title,
            description: form.description,
            deadline: form.deadline,
            author: user.username,
        };

        self.store.insert(new_task).await?;
        Ok(Outcome::Redirect(Target::TaskList))
    }

    /// Flips the completion flag on a task the current user owns
    ///
    /// A task that does not exist or belongs to someone else is left alone;
    /// either way the response is the task list, so the outcome does not
    /// reveal whether the id was real.
    pub async fn toggle_completed(
        &self,
        principal: Option<&Principal>,
        id: i64,
    ) -> Result<Target, FlowError> {
        let user = match self.current_user(principal).await? {
            Some(user) => user,
            None => return Ok(Target::Login),
        };

        if let Some(task) = self.store.find(id).await? {
            if task.user_id == user.id {
                self.store.set_completed(id, !task.completed).await?;
            }
        }

        Ok(Target::TaskList)
    }

    /// Deletes a task the current user owns
    ///
    /// Same ownership gate as [`toggle_completed`](Self::toggle_completed).
    pub async fn delete(
        &self,
        principal: Option<&Principal>,
        id: i64,
    ) -> Result<Target, FlowError> {
        let user = match self.current_user(principal).await? {
            Some(user) => user,
            None => return Ok(Target::Login),
        };

        if let Some(task) = self.store.find(id).await? {
            if task.user_id == user.id {
                self.store.delete(id).await?;
            }
        }

        Ok(Target::TaskList)
    }
}
