use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::models::{NewTask, NewUser, Task, TaskStatus, User};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unique constraint violated: {0}")]
    Conflict(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// User records, keyed by id and by unique email.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Fails with [`StoreError::Conflict`] when the email is already taken.
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;
}

/// Task records. Every query that touches an existing task is scoped by owner.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Tasks owned by `owner_id`, newest `created_at` first.
    async fn list_tasks_for_owner(&self, owner_id: Uuid) -> Result<Vec<Task>, StoreError>;

    /// Inserts with status TODO and fresh id/timestamps.
    async fn insert_task(&self, task: NewTask) -> Result<Task, StoreError>;

    /// Sets `status` on the task matching both `id` and `owner_id` in one step.
    ///
    /// `None` when no such task exists for that owner; a task owned by someone
    /// else is reported exactly like a missing one.
    async fn update_task_status_for_owner(
        &self,
        id: Uuid,
        owner_id: Uuid,
        status: TaskStatus,
    ) -> Result<Option<Task>, StoreError>;

    /// Cheap round-trip used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
