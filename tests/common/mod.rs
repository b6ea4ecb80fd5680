#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{header, Response, StatusCode};
use serde_json::{json, Value};

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // In-memory store keeps the suite independent of a running Postgres
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_taskboard-api"));
        cmd.env("TASKBOARD_PORT", port.to_string())
            .env("TASKBOARD_STORE", "memory")
            .env("APP_ENV", "development")
            .env("JWT_SECRET", "integration-test-secret")
            .env("BCRYPT_COST", "4")
            .env("RUST_LOG", "taskboard_api=warn")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Email that no other test in the run will register.
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, uuid_suffix())
}

fn uuid_suffix() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{}-{}", nanos, COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// `name=value` pair from the response's session `Set-Cookie`, ready to
/// send back in a `Cookie` header.
pub fn session_cookie(res: &Response) -> Option<String> {
    res.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("token="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub fn raw_set_cookie(res: &Response) -> Option<String> {
    res.headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Register a fresh account and return its session cookie.
pub async fn signup(server: &TestServer, client: &reqwest::Client, name: &str) -> Result<String> {
    let res = client
        .post(server.url("/auth/signup"))
        .json(&json!({
            "name": name,
            "email": unique_email(&name.to_lowercase()),
            "password": "secret123"
        }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "signup failed: {}", res.status());
    session_cookie(&res).context("signup did not set a session cookie")
}

pub async fn create_task(
    server: &TestServer,
    client: &reqwest::Client,
    cookie: &str,
    title: &str,
) -> Result<Value> {
    let res = client
        .post(server.url("/tasks"))
        .header(header::COOKIE, cookie)
        .json(&json!({ "title": title }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "create failed: {}", res.status());
    let body: Value = res.json().await?;
    Ok(body["task"].clone())
}
