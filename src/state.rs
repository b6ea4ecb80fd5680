use std::sync::Arc;

use crate::auth::{PasswordHasher, SessionResolver, SessionTokenCodec};
use crate::config::AppConfig;
use crate::database::{TaskStore, UserStore};
use crate::services::{AccountService, TaskService};

/// Shared, read-only request context. Cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sessions: SessionResolver,
    pub accounts: AccountService,
    pub tasks: TaskService,
}

impl AppState {
    pub fn new(config: AppConfig, users: Arc<dyn UserStore>, tasks: Arc<dyn TaskStore>) -> Self {
        let codec = SessionTokenCodec::new(config.security.jwt_secret.as_bytes(), config.session_ttl());
        let sessions = SessionResolver::new(codec, config.security.cookie_secure);
        let hasher = PasswordHasher::new(config.security.bcrypt_cost);

        Self {
            sessions,
            accounts: AccountService::new(users, hasher),
            tasks: TaskService::new(tasks),
            config: Arc::new(config),
        }
    }
}
