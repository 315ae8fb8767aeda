//! todoctl CLI - recurring todo tracker
//!
//! Entry point for the todoctl HTTP backend:
//! - `serve`: initialize the database and serve the todo API
//! - `init-db`: create the database and schema only

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "todoctl",
    author,
    version,
    about = "Recurring todo tracker with a JSON HTTP API backed by SQLite"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the database and schema, then exit
    InitDb(commands::init_db::InitDbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = config::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();
    config::report(&dotenv);

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::InitDb(args) => commands::run_init_db(args).await?,
    }
    Ok(())
}
