//! Todo Manager
//!
//! Serves todos, projects and categories over HTTP on port 4567 by default.

use clap::Parser;
use todo_persistence::backends::memory::InMemoryBackend;
use todo_rest::{ServerConfig, ShutdownHandle, create_app_with_shutdown, init_logging};
use tracing::info;

/// Starts the Axum HTTP server and waits for `GET /shutdown` or Ctrl-C.
async fn serve(app: axum::Router, config: &ServerConfig, shutdown: ShutdownHandle) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal(shutdown: ShutdownHandle) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(err) = result {
                tracing::warn!(error = %err, "Failed to listen for Ctrl-C");
                // Still honour the HTTP route.
                shutdown.wait().await;
            } else {
                info!("Received Ctrl-C");
            }
        }
        _ = shutdown.wait() => {}
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        anyhow::bail!("invalid configuration ({} errors)", errors.len());
    }

    info!(
        port = config.port,
        host = %config.host,
        seed_data = config.seed_data,
        "Starting todo manager"
    );

    let backend = if config.seed_data {
        InMemoryBackend::with_sample_data()
    } else {
        InMemoryBackend::new()
    };

    let shutdown = ShutdownHandle::new();
    let app = create_app_with_shutdown(backend, config.clone(), shutdown.clone());
    serve(app, &config, shutdown).await
}
