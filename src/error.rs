//! Centralized error types for gmcli.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the gmcli store.
///
/// Only writes and directory setup can fail. Reading a missing or malformed
/// record is never an error; it degrades to "absent".
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error with the associated file path.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A record could not be encoded as JSON.
    #[error("Failed to serialize '{path}': {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// No home directory could be resolved for the default store location.
    #[error("Could not determine the user's home directory")]
    HomeDirUnavailable,

    /// The account was rejected before being written.
    #[error("Invalid account: {0}")]
    InvalidAccount(String),
}

/// Convenience alias for `Result<T, StoreError>`.
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a `Serialize` variant from a path and a `serde_json::Error`.
    pub fn serialize(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Serialize {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let err = StoreError::io(
            "/tmp/.gmcli/accounts.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/.gmcli/accounts.json"), "got: {msg}");
        assert!(msg.contains("denied"), "got: {msg}");
    }
}
