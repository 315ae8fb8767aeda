//! Tri-state field for partial updates
//!
//! JSON distinguishes a key that is absent from a key set to `null`.
//! `Patch<T>` keeps that distinction after deserialization; pair it with
//! `#[serde(default)]` so absent keys become `Patch::Unset`.

use serde::{Deserialize, Deserializer};

/// A field in a partial update: absent, explicitly null, or a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// Key was not present in the request
    #[default]
    Unset,
    /// Key was present with a `null` value
    Null,
    /// Key was present with a value
    Value(T),
}

impl<T> Patch<T> {
    /// Merge two keys that name the same field.
    ///
    /// The field counts as present if either key is present; the first
    /// non-null value wins, and it is null only when every present key is.
    pub fn first_non_null(self, other: Self) -> Self {
        match (self, other) {
            (Self::Value(v), _) | (_, Self::Value(v)) => Self::Value(v),
            (Self::Null, _) | (_, Self::Null) => Self::Null,
            (Self::Unset, Self::Unset) => Self::Unset,
        }
    }

    /// `None` when unset, `Some(None)` when null, `Some(Some(v))` otherwise.
    pub fn into_option(self) -> Option<Option<T>> {
        match self {
            Self::Unset => None,
            Self::Null => Some(None),
            Self::Value(v) => Some(Some(v)),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the key exists; absence is handled by `default`.
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(v) => Self::Value(v),
            None => Self::Null,
        })
    }
}
