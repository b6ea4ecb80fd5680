use axum::extract::{Extension, State};

use crate::handlers::public::auth::session::UserBody;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /auth/me - the user behind the current session
pub async fn whoami(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<UserBody> {
    let user = state.accounts.current_user(auth.user_id).await?;
    Ok(ApiResponse::success(UserBody { user }))
}
