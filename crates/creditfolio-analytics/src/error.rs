//! Error types for price analytics.

use thiserror::Error;

/// Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Errors raised by analytics configuration.
///
/// Short price histories are not errors: they degrade the affected metric
/// to `None`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Invalid metrics configuration.
    #[error("Invalid metrics configuration: {reason}")]
    InvalidConfig {
        /// The reason the configuration is invalid.
        reason: String,
    },
}

impl AnalyticsError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
