//! Error types for the user-agent configuration library

use rvoip_persist_core::PersistError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for user-agent library operations
pub type UaResult<T> = Result<T, UaError>;

/// Errors reported by the user-agent library
#[derive(Debug, Error)]
pub enum UaError {
    /// Document persistence error
    #[error("Document error: {0}")]
    Persist(#[from] PersistError),

    /// Operation not allowed in the current library state
    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    /// A configuration value was rejected
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Transport id does not refer to a live transport
    #[error("Transport not found: {id}")]
    TransportNotFound { id: i32 },

    /// Logging could not be set up
    #[error("Logging setup failed: {message}")]
    Logging { message: String },

    /// A file used by the library could not be opened
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl UaError {
    /// Create an invalid state error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a logging error
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }

    /// Create an I/O error for `path`
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persist_errors_convert() {
        let err: UaError = PersistError::InvalidPath("a..b".to_string()).into();
        assert!(matches!(err, UaError::Persist(_)));
        assert!(err.to_string().contains("a..b"));
    }

    #[test]
    fn io_error_names_the_path() {
        let err = UaError::io(
            "/nowhere/THE.LOG",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.to_string(), "I/O error on /nowhere/THE.LOG: missing");
    }
}
