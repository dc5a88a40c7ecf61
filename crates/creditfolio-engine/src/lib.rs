//! # Creditfolio Engine
//!
//! Runs the full analytics pipeline over a bond and CDS book.
//!
//! This crate provides:
//! - [`AnalyticsEngine`]: concurrent history fetch plus the synchronous
//!   analytics that follow it
//! - [`AnalyticsEngineBuilder`]: wiring of source, limits and parameters
//! - [`FetchReport`]: which identifiers loaded and why the others did not
//! - [`RunReport`]: everything one run produces
//!
//! ## Pipeline
//!
//! ```text
//! ReferenceData ─> tickers ─> fetch_all ─┬─> metrics ─> correlation
//!                                        │
//!                                        └─> enrichment <─ aggregates, summary, maturity
//! ```
//!
//! One identifier failing to fetch never fails the run; it is recorded in
//! the fetch report and its positions are enriched with empty market fields.
//!
//! ## Usage
//!
//! ```ignore
//! let engine = AnalyticsEngineBuilder::new()
//!     .with_source(Arc::new(CsvPriceHistorySource::new("prices.csv")?))
//!     .with_max_concurrency(4)
//!     .build()?;
//!
//! let report = engine.run(&reference, LookbackPeriod::Years(2)).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod error;
pub mod fetch;
pub mod report;

// Re-exports
pub use builder::{AnalyticsEngineBuilder, DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_CONCURRENCY};
pub use error::EngineError;
pub use fetch::{FetchFailure, FetchOutcome, FetchReport};
pub use report::RunReport;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use creditfolio_analytics::{compute_correlation_matrix, compute_security_metrics, MetricsConfig, PriceSeries};
use creditfolio_core::{RatingScale, Ticker};
use creditfolio_portfolio::{
    bucket_by_maturity, compute_portfolio_aggregates, enrich_bonds, enrich_cds, MetricsByTicker,
    PortfolioSummary, ReferenceData,
};
use creditfolio_traits::{Fundamentals, LookbackPeriod, PriceHistorySource};

/// The analytics engine.
pub struct AnalyticsEngine {
    /// Price history source
    source: Arc<dyn PriceHistorySource>,

    /// Metrics parameters
    metrics_config: MetricsConfig,

    /// Rating scale for averages and letters
    rating_scale: RatingScale,

    /// Per-identifier fetch timeout
    fetch_timeout: Duration,

    /// Maximum fetches in flight
    max_concurrency: usize,
}

impl AnalyticsEngine {
    pub(crate) fn new(
        source: Arc<dyn PriceHistorySource>,
        metrics_config: MetricsConfig,
        rating_scale: RatingScale,
        fetch_timeout: Duration,
        max_concurrency: usize,
    ) -> Self {
        Self {
            source,
            metrics_config,
            rating_scale,
            fetch_timeout,
            max_concurrency,
        }
    }

    /// Create a builder.
    pub fn builder() -> AnalyticsEngineBuilder {
        AnalyticsEngineBuilder::new()
    }

    /// Per-identifier fetch timeout.
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    /// Maximum number of concurrent fetches.
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Metrics parameters.
    pub fn metrics_config(&self) -> &MetricsConfig {
        &self.metrics_config
    }

    /// Rating scale.
    pub fn rating_scale(&self) -> &RatingScale {
        &self.rating_scale
    }

    /// Fetches history and fundamentals for each distinct identifier.
    ///
    /// At most `max_concurrency` fetches run at once and each history fetch
    /// is bounded by the fetch timeout. Every requested identifier ends up in
    /// the report, either loaded or with its failure.
    pub async fn fetch_all(&self, tickers: &[Ticker], lookback: LookbackPeriod) -> FetchReport {
        let mut seen = HashSet::new();
        let unique: Vec<Ticker> = tickers
            .iter()
            .filter(|t| seen.insert(*t))
            .cloned()
            .collect();

        debug!(
            count = unique.len(),
            max_concurrency = self.max_concurrency,
            %lookback,
            "fetching price histories"
        );

        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let handles: Vec<(Ticker, JoinHandle<FetchOutcome>)> = unique
            .into_iter()
            .map(|ticker| {
                let source = Arc::clone(&self.source);
                let semaphore = Arc::clone(&semaphore);
                let timeout = self.fetch_timeout;
                let task_ticker = ticker.clone();
                let handle = tokio::spawn(async move {
                    // Closed only if the semaphore is dropped, which it is not.
                    let _permit = semaphore.acquire_owned().await.ok();
                    fetch_one(source.as_ref(), &task_ticker, lookback, timeout).await
                });
                (ticker, handle)
            })
            .collect();

        let mut report = FetchReport::new();
        for (ticker, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => FetchOutcome::Failed(FetchFailure::Aborted {
                    error: e.to_string(),
                }),
            };
            match &outcome {
                FetchOutcome::Loaded { series, .. } => {
                    debug!(ticker = %ticker, points = series.len(), "history loaded");
                }
                FetchOutcome::Failed(failure) => {
                    warn!(ticker = %ticker, reason = %failure, "no history");
                }
            }
            report.record(ticker, outcome);
        }
        report
    }

    /// Computes metrics for every loaded identifier, attaching market
    /// capitalization from its fundamentals.
    pub fn compute_metrics(&self, fetch: &FetchReport) -> MetricsByTicker {
        fetch
            .series
            .iter()
            .map(|(ticker, series)| {
                let market_cap = fetch.fundamentals.get(ticker).and_then(|f| f.market_cap);
                let metrics = compute_security_metrics(series, &self.metrics_config)
                    .with_market_cap(market_cap);
                (ticker.clone(), metrics)
            })
            .collect()
    }

    /// Runs every synchronous stage on an already completed fetch.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Portfolio`] when the bond book has no value to
    /// weight by.
    pub fn analyze(
        &self,
        reference: &ReferenceData,
        fetch: FetchReport,
    ) -> Result<RunReport, EngineError> {
        let valuation_date = reference.valuation_date();

        let aggregates = compute_portfolio_aggregates(
            reference.bonds(),
            reference.cds(),
            valuation_date,
            &self.rating_scale,
        )?;
        let metrics = self.compute_metrics(&fetch);
        let correlation = compute_correlation_matrix(&fetch.series);
        let summary = PortfolioSummary::calculate(reference, &self.rating_scale);
        let maturity = bucket_by_maturity(reference.bonds(), valuation_date);
        let enriched_bonds = enrich_bonds(reference.bonds(), &metrics, valuation_date);
        let enriched_cds = enrich_cds(reference.cds(), &metrics);

        Ok(RunReport {
            fetch,
            metrics,
            correlation,
            aggregates,
            summary,
            maturity,
            enriched_bonds,
            enriched_cds,
        })
    }

    /// Fetches every identifier in the reference data and runs the full
    /// pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Portfolio`] when the bond book has no value to
    /// weight by. Fetch failures are reported, not returned.
    pub async fn run(
        &self,
        reference: &ReferenceData,
        lookback: LookbackPeriod,
    ) -> Result<RunReport, EngineError> {
        let started = Instant::now();
        let tickers = reference.tickers();
        info!(
            bonds = reference.bonds().len(),
            cds = reference.cds().len(),
            identifiers = tickers.len(),
            valuation_date = %reference.valuation_date(),
            "starting analytics run"
        );

        let fetch = self.fetch_all(&tickers, lookback).await;
        let report = self.analyze(reference, fetch)?;

        info!(
            succeeded = report.succeeded(),
            failed = report.fetch.failed(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "analytics run complete"
        );
        Ok(report)
    }
}

async fn fetch_one(
    source: &dyn PriceHistorySource,
    ticker: &Ticker,
    lookback: LookbackPeriod,
    timeout: Duration,
) -> FetchOutcome {
    let after_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);

    let points = match tokio::time::timeout(timeout, source.get_history(ticker, lookback)).await {
        Err(_) => return FetchOutcome::Failed(FetchFailure::Timeout { after_ms }),
        Ok(Err(e)) => {
            return FetchOutcome::Failed(FetchFailure::Source {
                error: e.to_string(),
            })
        }
        Ok(Ok(points)) => points,
    };

    let series = PriceSeries::new(ticker.clone(), points);
    if series.is_empty() {
        return FetchOutcome::Failed(FetchFailure::NoData);
    }

    // Missing fundamentals leave market cap empty; the history still counts.
    let fundamentals = match tokio::time::timeout(timeout, source.get_fundamentals(ticker)).await {
        Ok(Ok(fundamentals)) => fundamentals,
        Ok(Err(e)) => {
            warn!(ticker = %ticker, error = %e, "fundamentals unavailable");
            Fundamentals::default()
        }
        Err(_) => {
            warn!(ticker = %ticker, after_ms, "fundamentals timed out");
            Fundamentals::default()
        }
    };

    FetchOutcome::Loaded {
        series,
        fundamentals,
    }
}
