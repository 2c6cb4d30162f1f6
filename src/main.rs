use anyhow::Result;
use enterprise_demo::{build_router, create_app_state, init_tracing, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    init_tracing();

    let config = AppConfig::from_env()?;
    let app_state = create_app_state(&config)?;
    let hostname = app_state.runtime().hostname.clone();
    let app = build_router(app_state);

    if !config.binds_listener() {
        info!("Test mode: router built, listener suppressed");
        drop(app);
        return Ok(());
    }

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Enterprise Demo App listening on {}", listener.local_addr()?);
    info!("Version: {}", config.version);
    info!("Hostname: {}", hostname);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    // ---
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {err}");
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
    info!("Shutdown signal received");
}
