use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{NewTask, NewUser, Task, TaskStatus, User};
use super::store::{StoreError, TaskStore, UserStore};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    // Insertion order doubles as the tie-breaker for equal timestamps
    tasks: Vec<Task>,
}

/// Process-local store with the same semantics as [`super::PgStore`].
///
/// Used by the test suite and by `--store memory` for local runs; data is
/// lost when the process exits.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict("users.email".to_string()));
        }

        let record = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        tables.users.insert(record.id, record.clone());
        Ok(record)
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list_tasks_for_owner(&self, owner_id: Uuid) -> Result<Vec<Task>, StoreError> {
        let tables = self.tables.read().await;
        let mut owned: Vec<(usize, &Task)> = tables
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.owner_id == owner_id)
            .collect();
        owned.sort_by(|(a_seq, a), (b_seq, b)| {
            b.created_at.cmp(&a.created_at).then(b_seq.cmp(a_seq))
        });
        Ok(owned.into_iter().map(|(_, task)| task.clone()).collect())
    }

    async fn insert_task(&self, task: NewTask) -> Result<Task, StoreError> {
        let now = Utc::now();
        let record = Task {
            id: Uuid::new_v4(),
            title: task.title,
            status: TaskStatus::Todo,
            owner_id: task.owner_id,
            created_at: now,
            updated_at: now,
        };

        let mut tables = self.tables.write().await;
        tables.tasks.push(record.clone());
        Ok(record)
    }

    async fn update_task_status_for_owner(
        &self,
        id: Uuid,
        owner_id: Uuid,
        status: TaskStatus,
    ) -> Result<Option<Task>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(task) = tables
            .tasks
            .iter_mut()
            .find(|task| task.id == id && task.owner_id == owner_id)
        else {
            return Ok(None);
        };

        task.status = status;
        task.updated_at = Utc::now();
        Ok(Some(task.clone()))
    }
}
