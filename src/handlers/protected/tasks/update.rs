use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Extension, Path, State,
    },
    Json,
};
use serde_json::Value;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::validation;

use super::TaskBody;

/// PATCH /tasks/:id - move one of the caller's tasks to a new status
///
/// Expected Input:
/// ```json
/// { "status": "IN_PROGRESS" }
/// ```
///
/// The body is validated before the lookup, so a bad status is a 400 even
/// for an unknown id. Unknown, foreign and undecodable ids are all 404.
pub async fn task_update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<TaskBody> {
    let Json(body) = body?;
    let status = validation::update_status(&body)?;
    let Path(id) = id.map_err(|rejection| {
        tracing::debug!("Rejected task id: {}", rejection.body_text());
        ApiError::task_not_found()
    })?;

    let task = state.tasks.update_status(auth.user_id, &id, status).await?;
    Ok(ApiResponse::success(TaskBody { task }))
}
