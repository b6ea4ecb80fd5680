use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller, injected into request extensions by
/// [`session_auth_middleware`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
}

/// Session cookie authentication for protected routes.
///
/// Rejects with 401 before any handler or body extractor runs.
pub async fn session_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user_id = state
        .sessions
        .resolve_current_user(request.headers())
        .ok_or_else(ApiError::unauthorized)?;

    request.extensions_mut().insert(AuthUser { user_id });

    Ok(next.run(request).await)
}
