//! Error types for the publishing pipeline.
//!
//! All errors in the system are represented by the [`Error`] enum.
//! Only [`Error::Transform`] is meant to be recovered from (per note); every
//! other variant aborts the operation that raised it.

use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// The core error type for all publishing operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Path outside its configured root, or a root that cannot be resolved
    #[error("Invalid path: {reason}")]
    InvalidPath { reason: String },

    /// A single note could not be transformed for publishing
    #[error("Failed to transform '{}': {reason}", path.display())]
    Transform { path: PathBuf, reason: String },

    /// Vault or site layout does not match what publishing expects
    #[error("Structural error: {reason}")]
    Structural { reason: String },

    /// Invalid configuration
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an IO error
    pub fn io(err: io::Error) -> Self {
        Error::Io(err)
    }

    /// Create an invalid path error
    pub fn invalid_path(reason: impl Into<String>) -> Self {
        Error::InvalidPath {
            reason: reason.into(),
        }
    }

    /// Create a transform error for the given file
    pub fn transform(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::Transform {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a structural error
    pub fn structural(reason: impl Into<String>) -> Self {
        Error::Structural {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// True when the batch may continue with the next note.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Transform { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::invalid_path("/tmp/x is outside Source root");
        assert!(err.to_string().contains("Invalid path"));

        let err = Error::structural("File notes.md located in the publish directory");
        assert!(err.to_string().contains("notes.md"));
    }

    #[test]
    fn test_transform_message_carries_path_and_reason() {
        let err = Error::transform("/vault/Publish/Posts/Bad.md", "Missing date field for post layout");
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to transform '/vault/Publish/Posts/Bad.md'"));
        assert!(msg.ends_with("Missing date field for post layout"));
    }

    #[test]
    fn test_only_transform_is_recoverable() {
        assert!(Error::transform("a.md", "x").is_recoverable());
        assert!(!Error::structural("x").is_recoverable());
        assert!(!Error::invalid_path("x").is_recoverable());
        assert!(!Error::config_error("x").is_recoverable());
        assert!(!Error::io(io::Error::other("x")).is_recoverable());
    }
}
