//! Error types for the core crate.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by core type construction and rating lookups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid or unparseable date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Rating letter not present in the rating scale.
    ///
    /// Fatal to the single lookup only; callers decide whether the run continues.
    #[error("Unknown credit rating: '{rating}'")]
    UnknownRating {
        /// The rating text that failed to resolve.
        rating: String,
    },

    /// Invalid security identifier.
    #[error("Invalid ticker '{ticker}': {reason}")]
    InvalidTicker {
        /// The rejected identifier text.
        ticker: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an unknown rating error.
    #[must_use]
    pub fn unknown_rating(rating: impl Into<String>) -> Self {
        Self::UnknownRating {
            rating: rating.into(),
        }
    }

    /// Creates an invalid ticker error.
    #[must_use]
    pub fn invalid_ticker(ticker: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTicker {
            ticker: ticker.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_date("2025-02-30");
        assert!(err.to_string().contains("Invalid date"));

        let err = CoreError::unknown_rating("ZZZ");
        assert!(err.to_string().contains("ZZZ"));

        let err = CoreError::invalid_ticker("", "empty identifier");
        assert!(err.to_string().contains("empty identifier"));
    }
}
