use axum::extract::{Extension, State};

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

use super::TaskListBody;

/// GET /tasks - the caller's tasks, newest first
pub async fn task_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<TaskListBody> {
    let tasks = state.tasks.list(auth.user_id).await?;
    Ok(ApiResponse::success(TaskListBody { tasks }))
}
