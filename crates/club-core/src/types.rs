//! Core type definitions with validation.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static CLIENT_NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9_-]+$").unwrap());

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Not a valid `HH:MM` time of day.
    #[error("invalid time: {value:?}")]
    InvalidTime { value: String },

    /// Client names are limited to `[a-z0-9_-]+`.
    #[error("invalid client name: {value:?}")]
    InvalidClientName { value: String },
}

/// A validated client identifier.
///
/// Client names are non-empty and consist of lowercase ASCII letters, digits,
/// `_` and `-`. Ordering is lexicographic, which keeps closing-time departures
/// reproducible.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientId(String);

impl ClientId {
    /// Creates a new ID after validation.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if !CLIENT_NAME_RE.is_match(&id) {
            return Err(ValidationError::InvalidClientName { value: id });
        }
        Ok(Self(id))
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ClientId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClientId> for String {
    fn from(id: ClientId) -> Self {
        id.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A table number, `1..=tables_total`.
pub type TableNumber = usize;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_id_accepts_allowed_charset() {
        for name in ["alice", "client1", "a_b-c", "42", "-"] {
            let id = ClientId::new(name).unwrap();
            assert_eq!(id.as_str(), name);
        }
    }

    #[test]
    fn client_id_rejects_everything_else() {
        for name in ["", "Alice", "bob smith", "caf\u{e9}", "x.y"] {
            let err = ClientId::new(name).unwrap_err();
            assert_eq!(
                err,
                ValidationError::InvalidClientName {
                    value: name.to_string()
                }
            );
        }
    }

    #[test]
    fn client_id_orders_lexicographically() {
        let mut ids: Vec<_> = ["carol", "alice", "bob"]
            .into_iter()
            .map(|n| ClientId::new(n).unwrap())
            .collect();
        ids.sort();
        let names: Vec<_> = ids.iter().map(ClientId::as_str).collect();
        assert_eq!(names, ["alice", "bob", "carol"]);
    }

    #[test]
    fn client_id_serde_rejects_invalid_names() {
        let ok: ClientId = serde_json::from_str(r#""bob""#).unwrap();
        assert_eq!(ok.as_str(), "bob");
        assert!(serde_json::from_str::<ClientId>(r#""Bob""#).is_err());
    }
}
