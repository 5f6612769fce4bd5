//! HTTP server initialization and runtime setup.

use crate::config::Config;
use crate::infrastructure::persistence::ConnectionProvider;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Lazily-connecting PostgreSQL pool, probed in the background
/// - Application services
/// - Axum HTTP server with graceful shutdown on Ctrl-C / SIGTERM
///
/// The schema is expected to exist; see `migrations/`.
///
/// # Errors
///
/// Returns an error if:
/// - The database URL cannot be parsed
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let connections =
        ConnectionProvider::connect_lazy(&config).context("Invalid database configuration")?;

    let probe = connections.clone();
    tokio::spawn(async move {
        match probe.ping().await {
            Ok(()) => tracing::info!("Connected to database"),
            Err(e) => tracing::warn!(
                error = %e,
                "Database unreachable; requests will report connection errors until it recovers"
            ),
        }
    });

    let state = AppState::new(connections).with_max_body_bytes(config.max_body_bytes);
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
