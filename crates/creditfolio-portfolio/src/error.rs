//! Error types for portfolio analytics.

use creditfolio_core::CoreError;
use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// Missing required field during construction.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// A position failed validation.
    #[error("Invalid position '{id}': {reason}")]
    InvalidPosition {
        /// The position identifier.
        id: String,
        /// The reason the position is invalid.
        reason: String,
    },

    /// The same identifier appears twice within one instrument set.
    #[error("Duplicate {kind} position '{id}'")]
    DuplicatePosition {
        /// The repeated identifier.
        id: String,
        /// Instrument set ("bond" or "CDS").
        kind: String,
    },

    /// Zero total bond value; weighted averages are undefined.
    #[error("Portfolio has no bond value to weight by")]
    EmptyPortfolio,

    /// Error from the core crate (rating or date parsing).
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl PortfolioError {
    /// Create a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid position error.
    #[must_use]
    pub fn invalid_position(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPosition {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create a duplicate position error.
    #[must_use]
    pub fn duplicate_position(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::DuplicatePosition {
            id: id.into(),
            kind: kind.into(),
        }
    }
}
