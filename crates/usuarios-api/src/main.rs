use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use usuarios_api::{
    build_router,
    config::Settings,
    database::{DbPool, PgUserRepository},
    state::AppState,
    telemetry,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before the subscriber reads RUST_LOG
    dotenvy::dotenv().ok();

    telemetry::init_telemetry();

    info!("Starting usuarios-api...");

    let settings = Settings::load().context("load configuration")?;
    info!("Configuration loaded (env={})", settings.app.env);

    let db_pool = DbPool::new(&settings.database, settings.is_production())?;

    let repository = Arc::new(PgUserRepository::new(db_pool.clone()));
    let state = AppState::new(repository, settings.app.name.clone());

    let app = build_router(state);

    let addr = SocketAddr::from((
        settings
            .server
            .host
            .parse::<std::net::IpAddr>()
            .context("parse server host")?,
        settings.server.port,
    ));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {}", addr))?;
    info!("Servidor escuchando en puerto {}", settings.server.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down, closing database pool");
    db_pool.close().await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
