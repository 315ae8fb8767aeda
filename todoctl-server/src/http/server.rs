//! Axum server setup
//!
//! Server skeleton with:
//! - CORS open to any origin
//! - Tracing middleware
//! - Optional static frontend as the fallback service
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::Store;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:5000)
    pub bind_addr: SocketAddr,

    /// Directory served for paths outside the API (e.g. `/` → `index.html`)
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            static_dir: None,
        }
    }
}

/// Shared application state
///
/// Only connection settings are shared; handlers open their own connections.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}

/// Build the application router.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .merge(routes::health::router())
        .merge(routes::todos::router());

    if let Some(dir) = &config.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let store = Store::open(DEFAULT_DB_PATH).await?;
/// run_server(store, ServerConfig::default()).await?;
/// ```
pub async fn run_server(store: Store, config: ServerConfig) -> Result<(), ServerError> {
    if let Some(dir) = &config.static_dir {
        if !dir.is_dir() {
            tracing::warn!(dir = %dir.display(), "Static directory does not exist");
        }
    }

    let app = build_router(AppState { store }, &config);

    // Bind listener
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
