//! todoctl-server: recurring todo tracking over HTTP
//!
//! Stores todos (title, description, frequency, status, goal date) in a
//! single SQLite table and exposes CRUD endpoints under `/api/todos`.

pub mod db;
pub mod http;
pub mod models;

pub use db::{DbError, Store, DEFAULT_DB_PATH};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
