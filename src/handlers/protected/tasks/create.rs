use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    Json,
};
use serde_json::Value;

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::validation;

use super::TaskBody;

/// POST /tasks - create a task owned by the caller
///
/// Expected Input:
/// ```json
/// { "title": "Buy milk" }
/// ```
///
/// Any `status` in the body is ignored; new tasks always start as TODO.
pub async fn task_create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<TaskBody> {
    let Json(body) = body?;
    let title = validation::create_task(&body)?;

    let task = state.tasks.create(auth.user_id, title).await?;
    Ok(ApiResponse::created(TaskBody { task }))
}
