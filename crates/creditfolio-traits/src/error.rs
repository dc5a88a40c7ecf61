//! Error types for source operations.

use thiserror::Error;

/// Common error type for data source operations.
///
/// An unknown identifier is not an error: sources answer it with an empty
/// history.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TraitError {
    /// Source not available
    #[error("source not available: {0}")]
    SourceNotAvailable(String),

    /// Operation timed out
    #[error("timeout")]
    Timeout,

    /// Parse/deserialization error
    #[error("parse error: {0}")]
    ParseError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<std::io::Error> for TraitError {
    fn from(e: std::io::Error) -> Self {
        TraitError::IoError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(TraitError::Timeout.to_string(), "timeout");
        assert_eq!(
            TraitError::ParseError("bad close".into()).to_string(),
            "parse error: bad close"
        );
        let io: TraitError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(io, TraitError::IoError(_)));
    }
}
