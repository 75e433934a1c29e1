//! Application configuration loaded from environment.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Signing secret used when `JWT_SECRET` is unset. Only fit for local development.
pub const DEFAULT_JWT_SECRET: &str = "change-me-in-prod";

/// Application configuration loaded from `.env` and environment variables.
///
/// Read once at startup and handed to component constructors; nothing reads
/// the environment after that.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g. `0.0.0.0:8000`).
    pub server_addr: SocketAddr,
    /// SQLite database file path.
    pub database_path: PathBuf,
    /// HS256 signing secret for access tokens.
    pub jwt_secret: String,
    /// Access token lifetime in minutes.
    pub token_ttl_minutes: i64,
    /// Log level: `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment. Call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_addr = lookup("SERVER_ADDR").unwrap_or_else(|| "0.0.0.0:8000".to_string());
        let server_addr: SocketAddr = server_addr
            .parse()
            .map_err(|_| ConfigLoadError::InvalidServerAddr)?;

        let database_path =
            PathBuf::from(lookup("DB_PATH").unwrap_or_else(|| "data/app.db".to_string()));
        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string());

        let token_ttl_minutes = match lookup("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|m| *m > 0)
                .ok_or(ConfigLoadError::InvalidTokenTtl(raw))?,
            None => 60,
        };
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            server_addr,
            database_path,
            jwt_secret,
            token_ttl_minutes,
            log_level,
        })
    }

    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Invalid SERVER_ADDR")]
    InvalidServerAddr,
    #[error("Invalid ACCESS_TOKEN_EXPIRE_MINUTES: {0:?} (expected a positive integer)")]
    InvalidTokenTtl(String),
}
