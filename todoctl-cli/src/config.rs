//! Environment configuration
//!
//! Settings come from command line flags, falling back to `TODOCTL_*`
//! environment variables. A `.env` file in the working directory is
//! loaded first; variables already set in the environment win.

use std::path::PathBuf;

use tracing::{debug, warn};

/// What happened when looking for a `.env` file.
#[derive(Debug)]
pub enum Dotenv {
    Loaded(PathBuf),
    NotFound,
    Failed(dotenvy::Error),
}

/// Load `.env` from the current directory, if present.
///
/// Runs before argument parsing so clap's env fallbacks see the values,
/// which is also before logging is up; pass the result to [`report`]
/// once tracing is initialized.
pub fn load_dotenv() -> Dotenv {
    match dotenvy::dotenv() {
        Ok(path) => Dotenv::Loaded(path),
        Err(e) if e.not_found() => Dotenv::NotFound,
        Err(e) => Dotenv::Failed(e),
    }
}

/// Log the outcome of [`load_dotenv`].
pub fn report(dotenv: &Dotenv) {
    match dotenv {
        Dotenv::Loaded(path) => debug!("Loaded .env from {}", path.display()),
        Dotenv::NotFound => debug!("No .env file found, using environment only"),
        Dotenv::Failed(e) => warn!("Failed to load .env: {}", e),
    }
}
