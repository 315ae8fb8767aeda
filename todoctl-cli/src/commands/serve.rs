//! HTTP server command
//!
//! Initializes the store, then serves the todo API until shutdown.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use todoctl_server::{run_server, ServerConfig, Store, DEFAULT_DB_PATH};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "TODOCTL_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// SQLite database file (parent directory is created if missing)
    #[arg(long, env = "TODOCTL_DB_PATH", default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// Directory with a frontend to serve at `/`
    #[arg(long, env = "TODOCTL_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting todoctl server on {}", args.bind);

    // A server without a working store must not start
    let store = Store::open(&args.db_path)
        .await
        .with_context(|| format!("Failed to initialize database at {}", args.db_path.display()))?;

    let config = ServerConfig {
        bind_addr: args.bind,
        static_dir: args.static_dir,
    };

    // Run server (blocks until shutdown)
    run_server(store, config).await.context("Server error")?;

    Ok(())
}
