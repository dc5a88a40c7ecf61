//! Engine error types.

use creditfolio_portfolio::PortfolioError;
use thiserror::Error;

/// Engine error type.
///
/// Per-identifier fetch problems are not errors; they are collected in the
/// [`FetchReport`](crate::FetchReport).
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Portfolio-level calculation failed
    #[error("portfolio error: {0}")]
    Portfolio(#[from] PortfolioError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = EngineError::ConfigError("source not configured".into());
        assert_eq!(err.to_string(), "configuration error: source not configured");

        let err: EngineError = PortfolioError::EmptyPortfolio.into();
        assert_eq!(
            err.to_string(),
            "portfolio error: Portfolio has no bond value to weight by"
        );
    }
}
