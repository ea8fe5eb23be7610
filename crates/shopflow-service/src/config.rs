//! Service configuration.

use std::str::FromStr;

/// Configuration problems that stop a service from starting.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

/// Service configuration loaded from environment variables.
///
/// All three services share this shape; each reads the fields it needs.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on.
    pub listen_addr: String,

    /// PostgreSQL URL. Unset means the in-memory store.
    pub database_url: Option<String>,

    /// Maximum pooled database connections (default: 10).
    pub database_max_connections: u32,

    /// HMAC secret for signing tokens. Required by the auth service only.
    pub jwt_secret: Option<String>,

    /// Base URL of the auth service (default: `http://localhost:8000`).
    pub auth_url: String,

    /// Base URL of the billing service (default: `http://localhost:8001`).
    pub billing_url: String,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,

    /// Timeout for calls to other services, in seconds.
    pub upstream_timeout_seconds: u64,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// `default_listen_addr` is used when `LISTEN_ADDR` is unset, so each
    /// binary keeps its own port.
    #[must_use]
    pub fn from_env(default_listen_addr: &str) -> Self {
        let defaults = Self::default();

        Self {
            listen_addr: std::env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| default_listen_addr.into()),
            database_url: non_empty_var("DATABASE_URL"),
            database_max_connections: parsed_var(
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            ),
            jwt_secret: non_empty_var("JWT_SECRET"),
            auth_url: std::env::var("AUTH_URL").unwrap_or(defaults.auth_url),
            billing_url: std::env::var("BILLING_URL").unwrap_or(defaults.billing_url),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: parsed_var("MAX_BODY_BYTES", defaults.max_body_bytes),
            request_timeout_seconds: parsed_var(
                "REQUEST_TIMEOUT_SECONDS",
                defaults.request_timeout_seconds,
            ),
            upstream_timeout_seconds: parsed_var(
                "UPSTREAM_TIMEOUT_SECONDS",
                defaults.upstream_timeout_seconds,
            ),
        }
    }

    /// The token signing secret.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if `JWT_SECRET` was not set.
    pub fn require_jwt_secret(&self) -> Result<&[u8], ConfigError> {
        self.jwt_secret
            .as_deref()
            .map(str::as_bytes)
            .ok_or(ConfigError::Missing("JWT_SECRET"))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_var<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            database_url: None,
            database_max_connections: 10,
            jwt_secret: None,
            auth_url: "http://localhost:8000".into(),
            billing_url: "http://localhost:8001".into(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
            upstream_timeout_seconds: 10,
        }
    }
}
