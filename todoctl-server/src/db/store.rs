//! SQLite store - location, connection settings, and startup initialization

use std::path::{Path, PathBuf};
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteJournalMode};
use sqlx::{ConnectOptions, Connection};

use super::repos::DbError;
use super::schema;

/// Default database file, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "data/todo_manager.db";

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the on-disk todo database.
///
/// Holds connection settings only; every call to [`Store::connect`] opens
/// a fresh connection.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl Store {
    /// Open the store at `path`, creating the parent directory, the
    /// database file, and the schema as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the schema
    /// cannot be applied. Callers should treat this as fatal.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = Store::open("data/todo_manager.db").await?;
    /// ```
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let store = Self { path, options };

        let mut conn = store.connect().await?;
        schema::init(&mut conn).await?;
        conn.close().await?;

        tracing::info!(path = %store.path.display(), "Database initialized");
        Ok(store)
    }

    /// Open a new connection to the database.
    pub async fn connect(&self) -> Result<SqliteConnection, DbError> {
        Ok(self.options.connect().await?)
    }

    /// Location of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
