//! Validation error types

use std::fmt;

/// Validation error for todo input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required fields were not provided
    Missing { fields: &'static str },

    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field was explicitly null where a value is required
    Null { field: &'static str },

    /// Invalid enum variant
    InvalidVariant { field: &'static str, value: String },

    /// Update body carried no recognized field
    NoFields,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { fields } => write!(f, "{} are required", fields),
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::Null { field } => write!(f, "{} cannot be null", field),
            Self::InvalidVariant { field, value } => {
                write!(f, "invalid {} value: '{}'", field, value)
            }
            Self::NoFields => write!(f, "no fields to update"),
        }
    }
}

impl std::error::Error for ValidationError {}
