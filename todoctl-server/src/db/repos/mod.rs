//! Repository implementations for database access
//!
//! Repositories own the connection they run on, so a request's
//! connection lives exactly as long as its repository.

pub mod todos;

pub use todos::{DbError, Todo, TodoRepo};
