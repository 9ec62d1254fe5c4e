//! Error types for configuration document operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type for document operations
pub type PersistResult<T> = Result<T, PersistError>;

/// Errors that can occur while building, reading or persisting a document
#[derive(Debug, Error)]
pub enum PersistError {
    /// The document text is not valid JSON, or its root is not an object
    #[error("Syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// A record could not be reconstructed from its container
    #[error("Failed to read '{container}': {message}")]
    Parse { container: String, message: String },

    /// A record could not be expressed as a document tree
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Reading or writing the backing file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A path expression was malformed or did not resolve
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl PersistError {
    /// Create a syntax error from a JSON parser error
    pub fn syntax(err: &serde_json::Error) -> Self {
        Self::Syntax {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }

    /// Create a parse error for the given container
    pub fn parse(container: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            container: container.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error for the given path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error came from malformed document text
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. })
    }

    /// Whether this error came from an incompatible or incomplete record
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_carries_position() {
        let err = serde_json::from_str::<serde_json::Value>("{\n  \"a\": }").unwrap_err();
        let err = PersistError::syntax(&err);

        match &err {
            PersistError::Syntax { line, column, .. } => {
                assert_eq!(*line, 2);
                assert!(*column > 0);
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
        assert!(err.is_syntax());
        assert!(!err.is_parse());
    }

    #[test]
    fn io_error_mentions_path() {
        let err = PersistError::io(
            "/tmp/missing.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("/tmp/missing.json"));
    }
}
