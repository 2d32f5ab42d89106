//! Error types for stride.
//!
//! All core operations return `StrideError`. Session lifecycle violations
//! get their own variants so shells can match on them directly.

use thiserror::Error;

/// Errors that can occur in stride.
#[derive(Debug, Error)]
pub enum StrideError {
    /// A session is already active; it must be stopped first.
    #[error("A session is already running. Stop it first with 'stride stop'.")]
    AlreadyActive,

    /// An operation required an active session but none exists.
    #[error("No active session. Start one with 'stride start'.")]
    NoActiveSession,

    /// Break input was rejected before any state change.
    #[error("Invalid break duration: {0}")]
    InvalidBreak(String),

    /// Configuration problem (paths, config file, bad arguments).
    #[error("Configuration error: {0}")]
    Config(String),

    /// A requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Filesystem I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML config parsing failure.
    #[error("Config parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_error_messages() {
        assert!(StrideError::AlreadyActive.to_string().contains("stride stop"));
        assert!(StrideError::NoActiveSession
            .to_string()
            .contains("stride start"));
    }

    #[test]
    fn test_invalid_break_message() {
        let err = StrideError::InvalidBreak("negative minutes".to_string());
        assert_eq!(err.to_string(), "Invalid break duration: negative minutes");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: StrideError = io.into();
        assert!(matches!(err, StrideError::Io(_)));
    }
}
