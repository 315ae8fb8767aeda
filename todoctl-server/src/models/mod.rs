//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod patch;
pub mod todo;
pub mod validation;

pub use patch::Patch;
pub use todo::{Frequency, NewTodo, Status, TodoChanges, TodoTitle};
pub use validation::ValidationError;
