//! Configuration for per-security metrics.

use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Default trailing window for the high/low statistics (one trading year).
pub const DEFAULT_WINDOW: usize = 252;

/// Default annualization factor.
pub const DEFAULT_TRADING_DAYS_PER_YEAR: u32 = 252;

/// Parameters for [`compute_security_metrics`](crate::compute_security_metrics).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Number of most recent closes used for the trailing high/low.
    pub window: usize,

    /// Observations per year used to annualize volatility.
    pub trading_days_per_year: u32,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            trading_days_per_year: DEFAULT_TRADING_DAYS_PER_YEAR,
        }
    }
}

impl MetricsConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the trailing high/low window.
    #[must_use]
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Sets the annualization factor.
    #[must_use]
    pub fn with_trading_days_per_year(mut self, days: u32) -> Self {
        self.trading_days_per_year = days;
        self
    }

    /// Checks that both parameters are positive.
    pub fn validate(&self) -> AnalyticsResult<()> {
        if self.window == 0 {
            return Err(AnalyticsError::invalid_config("window must be at least 1"));
        }
        if self.trading_days_per_year == 0 {
            return Err(AnalyticsError::invalid_config(
                "trading_days_per_year must be at least 1",
            ));
        }
        Ok(())
    }

    /// Square-root-of-time scaling from daily to annual volatility.
    #[must_use]
    pub fn annualization_factor(&self) -> f64 {
        f64::from(self.trading_days_per_year).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default() {
        let config = MetricsConfig::default();
        assert_eq!(config.window, 252);
        assert_eq!(config.trading_days_per_year, 252);
        assert!(config.validate().is_ok());
        assert_relative_eq!(config.annualization_factor(), 252f64.sqrt());
    }

    #[test]
    fn test_builder() {
        let config = MetricsConfig::new()
            .with_window(63)
            .with_trading_days_per_year(260);
        assert_eq!(config.window, 63);
        assert_eq!(config.trading_days_per_year, 260);
    }

    #[test]
    fn test_validate() {
        assert!(MetricsConfig::new().with_window(0).validate().is_err());
        assert!(MetricsConfig::new()
            .with_trading_days_per_year(0)
            .validate()
            .is_err());
    }
}
