//! Database initialization command

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use todoctl_server::{Store, DEFAULT_DB_PATH};

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    /// SQLite database file (parent directory is created if missing)
    #[arg(long, env = "TODOCTL_DB_PATH", default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,
}

/// Create the database and schema without starting the server
pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let store = Store::open(&args.db_path)
        .await
        .with_context(|| format!("Failed to initialize database at {}", args.db_path.display()))?;

    println!("Database initialized at: {}", store.path().display());
    Ok(())
}
