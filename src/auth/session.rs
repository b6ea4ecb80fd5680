use axum::http::{header, HeaderMap};
use chrono::Duration;
use cookie::{Cookie, SameSite};
use uuid::Uuid;

use super::token::SessionTokenCodec;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "token";

/// Turns request headers into an authenticated user id.
///
/// Authentication only: ownership checks belong to the task service.
#[derive(Clone)]
pub struct SessionResolver {
    codec: SessionTokenCodec,
    secure_cookies: bool,
}

impl SessionResolver {
    pub fn new(codec: SessionTokenCodec, secure_cookies: bool) -> Self {
        Self { codec, secure_cookies }
    }

    pub fn codec(&self) -> &SessionTokenCodec {
        &self.codec
    }

    /// `None` when the cookie is absent or its token does not verify. Never errors.
    pub fn resolve_current_user(&self, headers: &HeaderMap) -> Option<Uuid> {
        let token = session_token_from_headers(headers)?;
        match self.codec.verify(&token) {
            Ok(user_id) => Some(user_id),
            Err(_) => {
                tracing::debug!("Rejected session cookie with invalid token");
                None
            }
        }
    }

    /// `Set-Cookie` value that starts a session for `token`.
    pub fn login_cookie(&self, token: String) -> String {
        self.base_cookie(token)
            .max_age(to_cookie_duration(self.codec.ttl()))
            .build()
            .to_string()
    }

    /// `Set-Cookie` value that deletes the session cookie.
    pub fn logout_cookie(&self) -> String {
        let mut cookie = self.base_cookie(String::new()).build();
        cookie.make_removal();
        cookie.to_string()
    }

    fn base_cookie(&self, value: String) -> cookie::CookieBuilder<'static> {
        Cookie::build((SESSION_COOKIE, value))
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookies)
            .path("/")
    }
}

fn to_cookie_duration(ttl: Duration) -> cookie::time::Duration {
    cookie::time::Duration::seconds(ttl.num_seconds())
}

/// Find the session cookie among all `Cookie` headers; the first match wins.
pub fn session_token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| Cookie::split_parse(raw))
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}
