//! Application configuration
//!
//! Layered with the `config` crate: built-in defaults first, then
//! environment variables prefixed with `EXAMPILOT_`, using `__` to reach
//! nested keys (`EXAMPILOT_SERVER__PORT=9000`, `EXAMPILOT_ADMIN__PASSWORD=...`).
//! PostgreSQL settings live in [`common::database::DatabaseConfig`].

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub admin: AdminConfig,
    pub storage: StorageConfig,
    pub cors: CorsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to bind the server to
    pub port: u16,
}

/// Seeded administrator account, also the login fallback when the
/// document store is unreachable
#[derive(Clone, Deserialize)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

/// Which document store backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Comma separated list of origins
    pub allowed_origins: String,
}

impl CorsConfig {
    pub fn origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl AppConfig {
    /// Load configuration from defaults and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8084_i64)?
            .set_default("admin.username", "admin")?
            .set_default("admin.password", "admin123")?
            .set_default("storage.backend", "postgres")?
            .set_default(
                "cors.allowed_origins",
                "http://localhost:5173,http://localhost:5174,http://localhost:3000",
            )?
            .add_source(
                Environment::with_prefix("EXAMPILOT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
