//! Error types shared across the crate

use std::path::PathBuf;

/// Checked replacements for misuse of a container.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    #[error("invalid argument to {container}: {reason}")]
    InvalidArgument {
        container: &'static str,
        reason: String,
    },

    #[error("{container} invariant violated: {reason}")]
    InvariantViolated {
        container: &'static str,
        reason: String,
    },
}

/// Errors from the stream-reading operations of `DynamicString`.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("end of stream")]
    EndOfStream,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReadError {
    /// True if the stream simply ran out of input.
    #[must_use]
    pub const fn is_end_of_stream(&self) -> bool {
        matches!(self, Self::EndOfStream)
    }
}

/// Errors parsing a single `name: value` database line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatabaseError {
    #[error("missing ': ' delimiter in line {0:?}")]
    MissingDelimiter(String),

    #[error("expected field {expected:?}, found {found:?}")]
    UnexpectedField { expected: &'static str, found: String },

    #[error("invalid value {value:?} for field {field:?}")]
    InvalidValue { field: String, value: String },
}

/// Errors loading or saving a player record.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("failed to read player record: {0}")]
    Read(#[from] ReadError),

    #[error("corrupt player record: {0}")]
    Database(#[from] DatabaseError),

    #[error("failed to write player record {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to open player record {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors validating the application configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_error_display() {
        let err = CollectionError::InvalidArgument {
            container: "OrderedSet",
            reason: "element is not in the set".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid argument to OrderedSet: element is not in the set"
        );
    }

    #[test]
    fn database_error_display() {
        let err = DatabaseError::UnexpectedField {
            expected: "Username",
            found: "Words Played".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "expected field \"Username\", found \"Words Played\""
        );
    }

    #[test]
    fn read_error_end_of_stream() {
        assert!(ReadError::EndOfStream.is_end_of_stream());
        let io = ReadError::from(std::io::Error::other("boom"));
        assert!(!io.is_end_of_stream());
        assert_eq!(io.to_string(), "I/O error: boom");
    }
}
