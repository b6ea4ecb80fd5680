//! Request body validation. Each validator reports only the first rule broken.

use serde_json::Value;

use crate::database::models::TaskStatus;
use crate::error::ApiError;

pub const TITLE_MAX_CHARS: usize = 200;
pub const NAME_MAX_CHARS: usize = 100;
pub const PASSWORD_MIN_CHARS: usize = 6;
pub const PASSWORD_MAX_CHARS: usize = 100;

const INVALID_STATUS: &str = "Status must be TODO, IN_PROGRESS, or DONE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// `POST /tasks`: only `title` is read; a client-sent `status` is ignored.
pub fn create_task(body: &Value) -> Result<String, ApiError> {
    let title = match body.get("title") {
        None | Some(Value::Null) => return Err(ApiError::validation_error("Title is required")),
        Some(Value::String(title)) => title,
        Some(_) => return Err(ApiError::validation_error("Title must be a string")),
    };

    if title.is_empty() {
        return Err(ApiError::validation_error("Title is required"));
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(ApiError::validation_error(format!(
            "Title must be {} characters or less",
            TITLE_MAX_CHARS
        )));
    }

    Ok(title.clone())
}

/// `PATCH /tasks/{id}`: exact, case-sensitive status names only.
pub fn update_status(body: &Value) -> Result<TaskStatus, ApiError> {
    body.get("status")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| ApiError::validation_error(INVALID_STATUS))
}

pub fn signup(body: &Value) -> Result<SignupInput, ApiError> {
    let name = string_field(body, "name").unwrap_or_default();
    if name.is_empty() {
        return Err(ApiError::validation_error("Name is required"));
    }
    if name.chars().count() > NAME_MAX_CHARS {
        return Err(ApiError::validation_error(format!(
            "Name must be {} characters or less",
            NAME_MAX_CHARS
        )));
    }

    let email = required_email(body)?;

    let password = string_field(body, "password").unwrap_or_default();
    let password_len = password.chars().count();
    if password_len < PASSWORD_MIN_CHARS {
        return Err(ApiError::validation_error(format!(
            "Password must be at least {} characters",
            PASSWORD_MIN_CHARS
        )));
    }
    if password_len > PASSWORD_MAX_CHARS {
        return Err(ApiError::validation_error(format!(
            "Password must be {} characters or less",
            PASSWORD_MAX_CHARS
        )));
    }

    Ok(SignupInput {
        name: name.to_string(),
        email,
        password: password.to_string(),
    })
}

pub fn login(body: &Value) -> Result<LoginInput, ApiError> {
    let email = required_email(body)?;

    let password = string_field(body, "password").unwrap_or_default();
    if password.is_empty() {
        return Err(ApiError::validation_error("Password is required"));
    }

    Ok(LoginInput {
        email,
        password: password.to_string(),
    })
}

fn string_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str)
}

fn required_email(body: &Value) -> Result<String, ApiError> {
    match string_field(body, "email") {
        Some(email) if is_valid_email(email) => Ok(email.to_string()),
        _ => Err(ApiError::validation_error("Invalid email address")),
    }
}

/// Syntactic check only: one `@`, non-empty local part, dotted domain, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}
