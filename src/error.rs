//! Error types for configuration and storage
//!
//! Gameplay never errors; collisions and a full board are phase transitions.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum SettingsError {
    /// Input was not valid settings JSON
    Parse(String),
    /// A field parsed but is out of range
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid settings json: {msg}"),
            Self::Invalid { field, reason } => write!(f, "invalid setting `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageError {
    /// No backing store in this environment
    Unavailable,
    /// The backend refused the write (quota, privacy mode, ...)
    Rejected(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage unavailable"),
            Self::Rejected(msg) => write!(f, "storage write rejected: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}
