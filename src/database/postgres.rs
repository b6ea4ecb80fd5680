use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::manager::DatabaseManager;
use super::models::{NewTask, NewUser, Task, TaskRow, TaskStatus, User};
use super::store::{StoreError, TaskStore, UserStore};

const TASK_COLUMNS: &str = "id, title, status, owner_id, created_at, updated_at";
/// Insertion sequence breaks `created_at` ties, matching the memory store.
const NEWEST_FIRST: &str = "created_at DESC, seq DESC";
const USER_COLUMNS: &str = "id, name, email, password_hash, created_at";

/// Postgres unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// sqlx-backed store over a shared connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn to_task(row: TaskRow) -> Result<Task, StoreError> {
    let id = row.id;
    Task::try_from(row)
        .map_err(|e| StoreError::Corrupt(format!("task {} has unknown status '{}'", id, e.0)))
}

fn map_insert_error(err: sqlx::Error, what: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            StoreError::Conflict(what.to_string())
        }
        _ => StoreError::Sqlx(err),
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let sql = format!(
            "INSERT INTO users (id, name, email, password_hash) VALUES ($1, $2, $3, $4) RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_insert_error(e, "users.email"))
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn list_tasks_for_owner(&self, owner_id: Uuid) -> Result<Vec<Task>, StoreError> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE owner_id = $1 ORDER BY {}",
            TASK_COLUMNS, NEWEST_FIRST
        );
        let rows = sqlx::query_as::<_, TaskRow>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(to_task).collect()
    }

    async fn insert_task(&self, task: NewTask) -> Result<Task, StoreError> {
        let sql = format!(
            "INSERT INTO tasks (id, title, status, owner_id) VALUES ($1, $2, $3, $4) RETURNING {}",
            TASK_COLUMNS
        );
        let row = sqlx::query_as::<_, TaskRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&task.title)
            .bind(TaskStatus::Todo.as_str())
            .bind(task.owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_insert_error(e, "tasks.id"))?;
        to_task(row)
    }

    async fn update_task_status_for_owner(
        &self,
        id: Uuid,
        owner_id: Uuid,
        status: TaskStatus,
    ) -> Result<Option<Task>, StoreError> {
        let sql = format!(
            "UPDATE tasks SET status = $3, updated_at = now() WHERE id = $1 AND owner_id = $2 RETURNING {}",
            TASK_COLUMNS
        );
        let row = sqlx::query_as::<_, TaskRow>(&sql)
            .bind(id)
            .bind(owner_id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.map(to_task).transpose()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
