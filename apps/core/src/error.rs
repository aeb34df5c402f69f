use std::io;
use thiserror::Error;

/// Crate-wide error type, consolidating the pipeline and collaborator failures into a single enum.
#[derive(Debug, Error)]
pub enum MindMapError {
    /// The input held no usable text after trimming.
    #[error("Empty input: no text to analyze")]
    EmptyInput,

    /// The pipeline ran but produced neither structural nor category nodes.
    #[error("No content extracted from the input text")]
    NoContentExtracted,

    /// The remote generator returned data that cannot become a tree, even after repair.
    #[error("Malformed external result: {0}")]
    MalformedExternalResult(String),

    /// Represents configuration-related errors (e.g., invalid environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents transport or protocol errors while talking to the completion service.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents serialization errors of trees and history entries.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Represents share-link encoding and decoding errors.
    #[error("Share link error: {0}")]
    Share(String),
}

impl MindMapError {
    /// Whether the caller should surface a transient message and allow a retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MindMapError::EmptyInput
                | MindMapError::NoContentExtracted
                | MindMapError::MalformedExternalResult(_)
        )
    }
}

impl From<tokio::time::error::Elapsed> for MindMapError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        MindMapError::Timeout(format!("Operation timed out: {}", err))
    }
}

impl From<reqwest::Error> for MindMapError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MindMapError::Timeout(err.to_string())
        } else {
            MindMapError::Http(err.to_string())
        }
    }
}

impl From<validator::ValidationErrors> for MindMapError {
    fn from(err: validator::ValidationErrors) -> Self {
        MindMapError::Config(format!("Validation errors: {}", err))
    }
}

impl From<url::ParseError> for MindMapError {
    fn from(err: url::ParseError) -> Self {
        MindMapError::Share(format!("URL parse error: {}", err))
    }
}

impl From<base64::DecodeError> for MindMapError {
    fn from(err: base64::DecodeError) -> Self {
        MindMapError::Share(format!("Base64 decode error: {}", err))
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, MindMapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_are_recoverable() {
        assert!(MindMapError::EmptyInput.is_recoverable());
        assert!(MindMapError::NoContentExtracted.is_recoverable());
        assert!(MindMapError::MalformedExternalResult("x".into()).is_recoverable());
        assert!(!MindMapError::Config("x".into()).is_recoverable());
    }

    #[test]
    fn test_json_error_conversion() {
        let err: MindMapError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, MindMapError::Json(_)));
        assert!(err.to_string().starts_with("JSON error"));
    }
}
