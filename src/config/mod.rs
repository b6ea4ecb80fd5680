use std::env;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::password::DEFAULT_COST;

/// Fixed session lifetime: a token and its cookie both expire after 7 days.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Accepted bcrypt work factors.
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(StoreBackend::Postgres),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::Invalid {
                key: "TASKBOARD_STORE",
                value: other.to_string(),
            }),
        }
    }
}

/// Values passed on the command line; these win over the environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub store: Option<StoreBackend>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub store: StoreBackend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub bcrypt_cost: u32,
    pub cookie_secure: bool,
    pub cors_origins: Vec<String>,
}

// Keep the signing secret out of debug output and logs
impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("cookie_secure", &self.cookie_secure)
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}

impl AppConfig {
    /// Build configuration from the process environment.
    ///
    /// Fails when `JWT_SECRET` is unset or empty: there is no fallback secret.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(CliOverrides::default())
    }

    /// Same as [`AppConfig::from_env`], with command-line flags applied last.
    pub fn from_env_with(overrides: CliOverrides) -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let defaults = match environment {
            Environment::Production => Self::production(jwt_secret),
            Environment::Staging => Self::staging(jwt_secret),
            Environment::Development => Self::development(jwt_secret),
        };

        let mut config = defaults.with_env_overrides()?;
        if let Some(port) = overrides.port {
            config.server.port = port;
        }
        if let Some(store) = overrides.store {
            config.server.store = store;
        }
        config.validate()
    }

    fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Server overrides
        if let Ok(v) = env::var("TASKBOARD_PORT") {
            self.server.port = parse_var("TASKBOARD_PORT", &v)?;
        } else if let Ok(v) = env::var("PORT") {
            self.server.port = parse_var("PORT", &v)?;
        }
        if let Ok(v) = env::var("TASKBOARD_STORE") {
            self.server.store = v.parse()?;
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse_var("DATABASE_MAX_CONNECTIONS", &v)?;
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = parse_var("DATABASE_CONNECTION_TIMEOUT", &v)?;
        }

        // Security overrides
        if let Ok(v) = env::var("BCRYPT_COST") {
            self.security.bcrypt_cost = parse_var("BCRYPT_COST", &v)?;
        }
        if let Ok(v) = env::var("SECURITY_COOKIE_SECURE") {
            self.security.cookie_secure = parse_var("SECURITY_COOKIE_SECURE", &v)?;
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        Ok(self)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if !BCRYPT_COST_RANGE.contains(&self.security.bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                value: self.security.bcrypt_cost.to_string(),
            });
        }
        // Credentialed CORS cannot use a wildcard origin
        if let Some(origin) = self.security.cors_origins.iter().find(|o| o.as_str() == "*") {
            return Err(ConfigError::Invalid {
                key: "SECURITY_CORS_ORIGINS",
                value: origin.clone(),
            });
        }
        if self.server.store == StoreBackend::Postgres && self.database.url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }
        Ok(self)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::days(SESSION_TTL_DAYS)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Defaults for local development. Also the baseline for tests.
    pub fn development(jwt_secret: String) -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 3000,
                store: StoreBackend::Postgres,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
            },
            security: SecurityConfig {
                jwt_secret,
                bcrypt_cost: DEFAULT_COST,
                cookie_secure: false,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
            },
        }
    }

    fn staging(jwt_secret: String) -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                port: 3000,
                store: StoreBackend::Postgres,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
            },
            security: SecurityConfig {
                jwt_secret,
                bcrypt_cost: DEFAULT_COST,
                cookie_secure: false,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    fn production(jwt_secret: String) -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: 3000,
                store: StoreBackend::Postgres,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
            },
            security: SecurityConfig {
                jwt_secret,
                bcrypt_cost: DEFAULT_COST,
                cookie_secure: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }
}

fn parse_var<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}
