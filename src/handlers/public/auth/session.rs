use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::database::models::PublicUser;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation;

#[derive(Debug, Serialize)]
pub struct UserBody {
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

/// POST /auth/signup - create an account and start a session
///
/// Expected Input:
/// ```json
/// { "name": "Ann", "email": "ann@example.com", "password": "secret1" }
/// ```
pub async fn signup(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<UserBody> {
    let Json(body) = body?;
    let input = validation::signup(&body)?;

    let user = state.accounts.signup(input).await?;
    let cookie = session_cookie(&state, &user)?;

    Ok(ApiResponse::created(UserBody { user }).with_cookie(cookie))
}

/// POST /auth/login - verify credentials and start a session
///
/// Expected Input:
/// ```json
/// { "email": "ann@example.com", "password": "secret1" }
/// ```
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<UserBody> {
    let Json(body) = body?;
    let input = validation::login(&body)?;

    let user = state.accounts.login(input).await?;
    let cookie = session_cookie(&state, &user)?;

    Ok(ApiResponse::success(UserBody { user }).with_cookie(cookie))
}

/// POST /auth/logout - drop the session cookie
///
/// Tokens are stateless, so this only clears the client's copy.
pub async fn logout(State(state): State<AppState>) -> ApiResult<MessageBody> {
    Ok(ApiResponse::success(MessageBody { message: "Logged out" })
        .with_cookie(state.sessions.logout_cookie()))
}

fn session_cookie(state: &AppState, user: &PublicUser) -> Result<String, ApiError> {
    let token = state.sessions.codec().issue(user.id)?;
    Ok(state.sessions.login_cookie(token))
}
