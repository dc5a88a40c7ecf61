//! Price history and fundamentals sources.

use async_trait::async_trait;
use creditfolio_analytics::PricePoint;
use creditfolio_core::Ticker;
use serde::{Deserialize, Serialize};

use crate::error::TraitError;
use crate::lookback::LookbackPeriod;

/// Where a source's data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    /// Request-response vendor API
    Snapshot,
    /// File-based (CSV)
    File,
    /// In-memory or fixed test data
    Manual,
}

/// Issuer fundamentals.
///
/// Every field is optional; a source that cannot supply a value leaves it
/// `None` rather than zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Fundamentals {
    /// Equity market capitalization.
    pub market_cap: Option<f64>,
}

impl Fundamentals {
    /// Fundamentals with a market capitalization.
    #[must_use]
    pub fn with_market_cap(market_cap: f64) -> Self {
        Self {
            market_cap: Some(market_cap),
        }
    }
}

/// Daily closing prices and fundamentals per identifier.
///
/// Implementations must answer an unknown identifier with an empty history,
/// not an error; errors are reserved for the source itself failing.
#[async_trait]
pub trait PriceHistorySource: Send + Sync {
    /// Source type.
    fn source_type(&self) -> SourceType;

    /// Closing prices covering `lookback`, oldest first.
    async fn get_history(
        &self,
        ticker: &Ticker,
        lookback: LookbackPeriod,
    ) -> Result<Vec<PricePoint>, TraitError>;

    /// Issuer fundamentals. Sources without fundamentals return the default.
    async fn get_fundamentals(&self, _ticker: &Ticker) -> Result<Fundamentals, TraitError> {
        Ok(Fundamentals::default())
    }
}

/// A source with no data: every history is empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyPriceHistorySource;

#[async_trait]
impl PriceHistorySource for EmptyPriceHistorySource {
    fn source_type(&self) -> SourceType {
        SourceType::Manual
    }

    async fn get_history(
        &self,
        _ticker: &Ticker,
        _lookback: LookbackPeriod,
    ) -> Result<Vec<PricePoint>, TraitError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_empty_source() {
        let source: Arc<dyn PriceHistorySource> = Arc::new(EmptyPriceHistorySource);
        let history = source
            .get_history(&Ticker::from("TSLA"), LookbackPeriod::default())
            .await
            .unwrap();
        assert!(history.is_empty());

        let fundamentals = source.get_fundamentals(&Ticker::from("TSLA")).await.unwrap();
        assert_eq!(fundamentals.market_cap, None);
        assert_eq!(source.source_type(), SourceType::Manual);
    }
}
