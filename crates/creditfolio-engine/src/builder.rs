//! Builder pattern for the analytics engine.

use std::sync::Arc;
use std::time::Duration;

use creditfolio_analytics::MetricsConfig;
use creditfolio_core::RatingScale;
use creditfolio_traits::PriceHistorySource;

use crate::error::EngineError;
use crate::AnalyticsEngine;

/// Default per-identifier fetch timeout.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Default number of fetches in flight.
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Builder for constructing an [`AnalyticsEngine`].
pub struct AnalyticsEngineBuilder {
    source: Option<Arc<dyn PriceHistorySource>>,
    metrics_config: MetricsConfig,
    rating_scale: RatingScale,
    fetch_timeout: Duration,
    max_concurrency: usize,
}

impl AnalyticsEngineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            source: None,
            metrics_config: MetricsConfig::default(),
            rating_scale: RatingScale::standard(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Set the price history source.
    pub fn with_source(mut self, source: Arc<dyn PriceHistorySource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the metrics parameters.
    pub fn with_metrics_config(mut self, config: MetricsConfig) -> Self {
        self.metrics_config = config;
        self
    }

    /// Set the rating scale used for letter rendering.
    pub fn with_rating_scale(mut self, scale: RatingScale) -> Self {
        self.rating_scale = scale;
        self
    }

    /// Set the per-identifier fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Set the maximum number of concurrent fetches.
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max;
        self
    }

    /// Build the analytics engine.
    pub fn build(self) -> Result<AnalyticsEngine, EngineError> {
        let source = self
            .source
            .ok_or_else(|| EngineError::ConfigError("price history source not configured".into()))?;

        self.metrics_config
            .validate()
            .map_err(|e| EngineError::ConfigError(e.to_string()))?;

        if self.max_concurrency == 0 {
            return Err(EngineError::ConfigError(
                "max_concurrency must be at least 1".into(),
            ));
        }
        if self.fetch_timeout.is_zero() {
            return Err(EngineError::ConfigError(
                "fetch_timeout must be positive".into(),
            ));
        }

        Ok(AnalyticsEngine::new(
            source,
            self.metrics_config,
            self.rating_scale,
            self.fetch_timeout,
            self.max_concurrency,
        ))
    }
}

impl Default for AnalyticsEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use creditfolio_traits::EmptyPriceHistorySource;

    #[test]
    fn test_requires_source() {
        let err = AnalyticsEngineBuilder::new().build().err().unwrap();
        assert!(matches!(err, EngineError::ConfigError(_)));
    }

    #[test]
    fn test_rejects_bad_settings() {
        let source: Arc<dyn PriceHistorySource> = Arc::new(EmptyPriceHistorySource);
        assert!(AnalyticsEngineBuilder::new()
            .with_source(source.clone())
            .with_max_concurrency(0)
            .build()
            .is_err());
        assert!(AnalyticsEngineBuilder::new()
            .with_source(source.clone())
            .with_metrics_config(MetricsConfig::new().with_window(0))
            .build()
            .is_err());
        assert!(AnalyticsEngineBuilder::new()
            .with_source(source)
            .with_fetch_timeout(Duration::ZERO)
            .build()
            .is_err());
    }

    #[test]
    fn test_build_with_defaults() {
        let engine = AnalyticsEngineBuilder::new()
            .with_source(Arc::new(EmptyPriceHistorySource))
            .build()
            .unwrap();
        assert_eq!(engine.max_concurrency(), DEFAULT_MAX_CONCURRENCY);
        assert_eq!(engine.fetch_timeout(), DEFAULT_FETCH_TIMEOUT);
    }
}
