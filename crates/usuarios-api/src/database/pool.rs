use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Process-wide PostgreSQL pool, built once at startup.
#[derive(Clone)]
pub struct DbPool {
    pool: PgPool,
}

impl DbPool {
    /// Build the pool without opening a connection. Connectivity problems
    /// show up on the first query, not here.
    pub fn new(config: &DatabaseConfig, require_tls: bool) -> Result<Self> {
        let options = connect_options(&config.url, require_tls)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .connect_lazy_with(options);

        info!(
            "Database pool ready: max={}, idle_timeout={}s, acquire_timeout={}s, tls={}",
            config.max_connections,
            config.idle_timeout_seconds,
            config.connect_timeout_seconds,
            require_tls
        );

        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// `Require` encrypts the connection but skips certificate validation.
fn connect_options(url: &str, require_tls: bool) -> Result<PgConnectOptions> {
    let ssl_mode = if require_tls {
        PgSslMode::Require
    } else {
        PgSslMode::Disable
    };

    let options = PgConnectOptions::from_str(url)
        .context("invalid DATABASE_URL")?
        .ssl_mode(ssl_mode);

    Ok(options)
}
