//! Error types for file adapters.

use std::path::Path;

use creditfolio_portfolio::PortfolioError;
use thiserror::Error;

/// Result type for file operations.
pub type FileResult<T> = Result<T, FileError>;

/// Errors raised while reading reference data or writing exports.
#[derive(Debug, Error)]
pub enum FileError {
    /// File could not be read or written.
    #[error("IO error on {path}: {message}")]
    Io {
        /// File involved.
        path: String,
        /// Underlying error.
        message: String,
    },

    /// File content could not be parsed.
    #[error("parse error in {path}: {message}")]
    Parse {
        /// File involved.
        path: String,
        /// Underlying error.
        message: String,
    },

    /// A record parsed but failed position validation.
    #[error(transparent)]
    Portfolio(#[from] PortfolioError),
}

impl FileError {
    /// Create an IO error for `path`.
    #[must_use]
    pub fn io(path: &Path, message: impl ToString) -> Self {
        Self::Io {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }

    /// Create a parse error for `path`.
    #[must_use]
    pub fn parse(path: &Path, message: impl ToString) -> Self {
        Self::Parse {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }
}
