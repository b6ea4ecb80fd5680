use std::sync::Arc;

use uuid::Uuid;

use crate::database::models::{NewTask, Task, TaskStatus};
use crate::database::{StoreError, TaskStore};
use crate::error::ApiError;

/// Task operations on behalf of an already-authenticated caller.
///
/// Every read and write is scoped to `caller_id`; a task owned by anyone
/// else behaves exactly as if it did not exist.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, caller_id: Uuid) -> Result<Vec<Task>, ApiError> {
        Ok(self.store.list_tasks_for_owner(caller_id).await?)
    }

    /// `title` must already be validated. Status always starts at TODO.
    pub async fn create(&self, caller_id: Uuid, title: String) -> Result<Task, ApiError> {
        let task = self
            .store
            .insert_task(NewTask {
                title,
                owner_id: caller_id,
            })
            .await?;

        tracing::info!("Created task {} for user {}", task.id, caller_id);
        Ok(task)
    }

    /// Any status may follow any other, including itself.
    pub async fn update_status(
        &self,
        caller_id: Uuid,
        task_id: &str,
        status: TaskStatus,
    ) -> Result<Task, ApiError> {
        // A malformed id cannot name an owned task
        let task_id = Uuid::parse_str(task_id).map_err(|_| ApiError::task_not_found())?;

        let task = self
            .store
            .update_task_status_for_owner(task_id, caller_id, status)
            .await?
            .ok_or_else(ApiError::task_not_found)?;

        tracing::debug!("Task {} moved to {}", task.id, task.status);
        Ok(task)
    }

    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }
}
