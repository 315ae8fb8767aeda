//! Database layer - SQLite store and repositories
//!
//! # Design Principles
//!
//! - One connection per request, released before the response is sent
//! - Schema is created idempotently at startup; failure is fatal
//! - Rely on DB constraints as a second line behind model validation

pub mod repos;
pub mod schema;
pub mod store;

pub use repos::*;
pub use store::{Store, DEFAULT_DB_PATH};
