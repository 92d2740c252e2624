//! Service configuration loaded from defaults and `CARBON_*` environment variables
//!
//! Nested keys use a double underscore: `CARBON_SERVER__PORT=8080` sets
//! `server.port`. Database and Redis settings are read separately by
//! [`common::database::DatabaseConfig`] and [`common::cache::RedisConfig`].

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

pub const DEFAULT_SECRET_KEY: &str = "change-me-in-production";

/// Top-level service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Session token settings
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// HMAC secret used to sign session tokens
    pub secret_key: String,
    /// Session lifetime in seconds (default: 7 days)
    pub ttl_seconds: u64,
    /// Name of the cookie carrying the session token
    pub cookie_name: String,
    /// Only send the cookie over HTTPS
    pub secure_cookie: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `web=debug,sqlx=warn`
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(environment())
    }

    fn from_source(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000_i64)?
            .set_default("session.secret_key", DEFAULT_SECRET_KEY)?
            .set_default("session.ttl_seconds", 604_800_i64)?
            .set_default("session.cookie_name", "carbon_session")?
            .set_default("session.secure_cookie", false)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "text")?
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn uses_default_secret(&self) -> bool {
        self.session.secret_key == DEFAULT_SECRET_KEY
    }
}

fn environment() -> Environment {
    Environment::with_prefix("CARBON")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
