//! Todo domain types
//!
//! `Frequency` and `Status` mirror the CHECK constraints on the `todos`
//! table; parsing them here keeps invalid values from reaching SQL.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Recurrence cadence of a todo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [Self::Daily, Self::Weekly, Self::Monthly, Self::Yearly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl FromStr for Frequency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidVariant {
                field: "frequency",
                value: s.to_owned(),
            })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle stage of a todo.
///
/// The usual progression is open → in_progress → completed, but any
/// status may be set from any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Open,
    InProgress,
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Self::Open, Self::InProgress, Self::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for Status {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidVariant {
                field: "status",
                value: s.to_owned(),
            })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated todo title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    /// Create a new todo title.
    ///
    /// # Rules
    /// - Not empty or whitespace only
    /// - Stored exactly as given, surrounding whitespace included
    ///
    /// # Example
    /// ```
    /// use todoctl_server::models::TodoTitle;
    ///
    /// assert_eq!(TodoTitle::new(" Water plants ").unwrap().as_str(), " Water plants ");
    /// assert!(TodoTitle::new("").is_err());
    /// assert!(TodoTitle::new("   ").is_err());  // whitespace only
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the title as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TodoTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated todo ready for insertion, with defaults applied.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: TodoTitle,
    pub description: String,
    pub frequency: Frequency,
    pub status: Status,
    pub goal_date: Option<String>,
}

/// A validated partial update.
///
/// `None` leaves the column untouched. For nullable columns the inner
/// `Option` distinguishes clearing (`Some(None)`) from setting a value.
#[derive(Debug, Clone, Default)]
pub struct TodoChanges {
    pub title: Option<TodoTitle>,
    pub description: Option<Option<String>>,
    pub frequency: Option<Frequency>,
    pub status: Option<Status>,
    pub goal_date: Option<Option<String>>,
}

impl TodoChanges {
    /// True when no column would be touched.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.frequency.is_none()
            && self.status.is_none()
            && self.goal_date.is_none()
    }
}
