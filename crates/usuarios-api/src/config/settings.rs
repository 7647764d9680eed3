use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

pub const PRODUCTION_ENV: &str = "production";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub idle_timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
}

impl Settings {
    /// Load settings from defaults, an optional `config/settings` file,
    /// `APP__*` variables and finally the conventional deployment variables
    /// (`DATABASE_URL`, `PORT`, `HOST`, `NODE_ENV`).
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::builder()?
            .add_source(File::with_name("config/settings").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("server.host", std::env::var("HOST").ok())?
            .set_override_option("app.env", std::env::var("NODE_ENV").ok())?
            .build()?;

        config.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.name", "API en Render")?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.max_connections", 10)?
            .set_default("database.idle_timeout_seconds", 30)?
            .set_default("database.connect_timeout_seconds", 10)
    }

    /// TLS toward the database is only required in production.
    pub fn is_production(&self) -> bool {
        self.app.env == PRODUCTION_ENV
    }
}
