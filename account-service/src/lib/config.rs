use std::env;

use config::builder::ConfigBuilder;
use config::builder::DefaultState;
use config::Config as RawConfig;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Placeholder signing secret shipped for local development.
///
/// Deployments must override it (`SECRET_KEY` or `APP_SESSION__SECRET`); anyone
/// who knows it can forge sessions.
pub const DEVELOPMENT_SECRET: &str = "development-secret-change-me-before-deploying";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub lifetime_hours: i64,
    pub cookie_secure: bool,
}

impl SessionConfig {
    pub fn uses_development_secret(&self) -> bool {
        self.secret == DEVELOPMENT_SECRET
    }
}

/// Argon2id cost parameters for newly hashed passwords.
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Config {
    /// Load configuration from defaults, files and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. `SECRET_KEY` and `DATABASE_URI`
    /// 2. Environment variables (APP_SESSION__SECRET, APP_DATABASE__URL, APP_SERVER__PORT, etc.)
    /// 3. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 4. Default config file (config/default.toml)
    /// 5. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: APP_DATABASE__URL=sqlite://... overrides database.url
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("session.secret", env::var("SECRET_KEY").ok())?
            .set_override_option("database.url", env::var("DATABASE_URI").ok())?
            .build()?;

        configuration.try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        RawConfig::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("database.url", "sqlite://users.db")?
            .set_default("database.max_connections", 5)?
            .set_default("session.secret", DEVELOPMENT_SECRET)?
            .set_default("session.lifetime_hours", 24)?
            .set_default("session.cookie_secure", false)?
            .set_default("password.memory_kib", auth::PasswordHasher::DEFAULT_MEMORY_KIB)?
            .set_default("password.iterations", auth::PasswordHasher::DEFAULT_ITERATIONS)?
            .set_default("password.parallelism", auth::PasswordHasher::DEFAULT_PARALLELISM)
    }
}
