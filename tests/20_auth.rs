mod common;

use anyhow::{Context, Result};
use reqwest::{header, StatusCode};
use serde_json::{json, Value};

#[tokio::test]
async fn signup_sets_session_and_hides_password() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let email = common::unique_email("ada");

    let res = client
        .post(server.url("/auth/signup"))
        .json(&json!({ "name": "Ada", "email": email, "password": "secret123" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let set_cookie = common::raw_set_cookie(&res).context("missing Set-Cookie")?;
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=604800"));

    let body: Value = res.json().await?;
    assert_eq!(body["user"]["name"], "Ada");
    assert_eq!(body["user"]["email"], email.as_str());
    assert!(body["user"]["id"].is_string());
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());
    Ok(())
}

#[tokio::test]
async fn duplicate_signup_conflicts() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let email = common::unique_email("dup");
    let payload = json!({ "name": "Dup", "email": email, "password": "secret123" });

    let first = client.post(server.url("/auth/signup")).json(&payload).send().await?;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = client.post(server.url("/auth/signup")).json(&payload).send().await?;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert!(common::raw_set_cookie(&second).is_none());
    let body: Value = second.json().await?;
    assert!(body["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn signup_rejects_invalid_fields() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/auth/signup"))
        .json(&json!({ "name": "", "email": "not-an-email", "password": "123" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert!(body["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn login_and_me_round_trip() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let email = common::unique_email("grace");

    client
        .post(server.url("/auth/signup"))
        .json(&json!({ "name": "Grace", "email": email, "password": "secret123" }))
        .send()
        .await?;

    let res = client
        .post(server.url("/auth/login"))
        .json(&json!({ "email": email, "password": "secret123" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = common::session_cookie(&res).context("login did not set a cookie")?;

    let me = client
        .get(server.url("/auth/me"))
        .header(header::COOKIE, &cookie)
        .send()
        .await?;
    assert_eq!(me.status(), StatusCode::OK);
    let body: Value = me.json().await?;
    assert_eq!(body["user"]["name"], "Grace");
    assert_eq!(body["user"]["email"], email.as_str());
    Ok(())
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let email = common::unique_email("linus");

    client
        .post(server.url("/auth/signup"))
        .json(&json!({ "name": "Linus", "email": email, "password": "secret123" }))
        .send()
        .await?;

    let wrong = client
        .post(server.url("/auth/login"))
        .json(&json!({ "email": email, "password": "nope-nope" }))
        .send()
        .await?;
    let unknown = client
        .post(server.url("/auth/login"))
        .json(&json!({ "email": common::unique_email("ghost"), "password": "nope-nope" }))
        .send()
        .await?;

    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert!(common::raw_set_cookie(&wrong).is_none());

    let wrong: Value = wrong.json().await?;
    let unknown: Value = unknown.json().await?;
    assert_eq!(wrong, unknown);
    Ok(())
}

#[tokio::test]
async fn logout_expires_the_cookie() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.post(server.url("/auth/logout")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let set_cookie = common::raw_set_cookie(&res).context("missing Set-Cookie")?;
    assert!(set_cookie.starts_with("token=;"));
    assert!(set_cookie.contains("Max-Age=0"));

    let body: Value = res.json().await?;
    assert!(body["message"].is_string());
    Ok(())
}

#[tokio::test]
async fn me_requires_a_session() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/auth/me")).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(server.url("/auth/me"))
        .header(header::COOKIE, "token=garbage")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
