//! sb-server: HTTP surface for snapbridge.
//!
//! Serves the landing page with its QR code, the mobile upload page, the
//! upload endpoint, and the stored images themselves.

pub mod context;
pub mod error;
pub mod middleware;
pub mod net;
pub mod pages;
pub mod qr;
pub mod router;
pub mod routes;
pub mod upload;

use std::net::SocketAddr;

use sb_core::config::Config;
use sb_store::ImageStore;

use crate::context::AppContext;

/// Start the snapbridge server.
///
/// Creates the upload directory, binds the listener, and serves until a
/// shutdown signal is received.
pub async fn start(config: Config) -> sb_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    let store = ImageStore::new(&config.storage.upload_dir);
    store.init()?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| sb_core::Error::Validation(format!("Invalid server address: {e}")))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| sb_core::Error::Internal(format!("Failed to bind to {addr}: {e}")))?;
    let port = listener.local_addr()?.port();

    let host = net::advertised_host(&config.server);
    let upload_url = net::upload_url(&host, port);
    let ctx = AppContext::new(config, store, upload_url)?;
    let app = router::build_router(ctx);

    tracing::info!("Server started at http://{host}:{port}");
    tracing::info!("Scan the QR code on that page with a phone to upload images");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
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

    tracing::info!("Shutdown signal received");
}
