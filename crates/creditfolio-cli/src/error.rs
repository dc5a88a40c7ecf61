//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Input that is neither a rating letter nor a score.
    #[error("Invalid rating: {0}. Use a letter such as BBB+ or a numeric score.")]
    InvalidRating(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            CliError::InvalidDate("2025-13-01".into()).to_string(),
            "Invalid date format: 2025-13-01. Use YYYY-MM-DD."
        );
        assert_eq!(
            CliError::Config("window must be positive".into()).to_string(),
            "Configuration error: window must be positive"
        );
    }
}
