use anyhow::Result;
use foodgram_shared::State;

use crate::{Config, routes};

#[tracing::instrument(skip(config))]
pub async fn serve(config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    tracing::info!("Starting foodgram server...");

    let host = host.unwrap_or_else(|| config.server.host.to_owned());
    let port = port.unwrap_or(config.server.port);

    tokio::fs::create_dir_all(&config.media.root).await?;

    // write pool first, it creates the database and switches it to WAL
    let write_db = crate::db::create_write_pool(&config.database.url).await?;
    foodgram_db::migrate(&write_db).await?;
    let read_db =
        crate::db::create_read_pool(&config.database.url, config.database.max_connections).await?;

    let state = routes::AppState::new(config, State { read_db, write_db });
    let app = routes::router(state);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}
