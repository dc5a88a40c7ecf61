//! Pipeline tests against in-memory sources.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use approx::assert_relative_eq;
use async_trait::async_trait;
use creditfolio_analytics::{PricePoint, PriceSeries};
use creditfolio_core::{CreditRating, Date, RatingScale, Ticker};
use creditfolio_engine::*;
use creditfolio_portfolio::{BondPosition, CdsPosition, PortfolioError, ReferenceData};
use creditfolio_traits::{
    Fundamentals, LookbackPeriod, PriceHistorySource, SourceType, TraitError,
};
use rust_decimal_macros::dec;

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

fn points(closes: &[f64]) -> Vec<PricePoint> {
    PriceSeries::from_closes(Ticker::from("X"), d(2024, 1, 2), closes)
        .points()
        .to_vec()
}

/// Serves fixed histories; unknown identifiers get an error.
#[derive(Default)]
struct MapSource {
    histories: HashMap<String, Vec<PricePoint>>,
    market_caps: HashMap<String, f64>,
    fail_fundamentals: bool,
}

impl MapSource {
    fn with(mut self, ticker: &str, closes: &[f64]) -> Self {
        self.histories.insert(ticker.to_string(), points(closes));
        self
    }

    fn with_cap(mut self, ticker: &str, cap: f64) -> Self {
        self.market_caps.insert(ticker.to_string(), cap);
        self
    }
}

#[async_trait]
impl PriceHistorySource for MapSource {
    fn source_type(&self) -> SourceType {
        SourceType::Manual
    }

    async fn get_history(
        &self,
        ticker: &Ticker,
        _lookback: LookbackPeriod,
    ) -> Result<Vec<PricePoint>, TraitError> {
        self.histories
            .get(ticker.as_str())
            .cloned()
            .ok_or_else(|| TraitError::SourceNotAvailable(format!("unknown {ticker}")))
    }

    async fn get_fundamentals(&self, ticker: &Ticker) -> Result<Fundamentals, TraitError> {
        if self.fail_fundamentals {
            return Err(TraitError::Timeout);
        }
        Ok(self
            .market_caps
            .get(ticker.as_str())
            .map_or_else(Fundamentals::default, |cap| Fundamentals::with_market_cap(*cap)))
    }
}

/// Sleeps on every fetch and records peak concurrency.
struct SlowSource {
    delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl SlowSource {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PriceHistorySource for SlowSource {
    fn source_type(&self) -> SourceType {
        SourceType::Manual
    }

    async fn get_history(
        &self,
        _ticker: &Ticker,
        _lookback: LookbackPeriod,
    ) -> Result<Vec<PricePoint>, TraitError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(points(&[1.0, 2.0]))
    }
}

fn bond(ticker: &str, size: rust_decimal::Decimal, coupon: f64, rating: CreditRating) -> BondPosition {
    BondPosition::builder()
        .ticker(ticker)
        .company(format!("{ticker} Inc"))
        .sector("Industrials")
        .position_size(size)
        .coupon(coupon)
        .maturity(d(2030, 1, 15))
        .rating(rating)
        .current_price(dec!(98))
        .build(&RatingScale::standard())
        .unwrap()
}

fn cds(ticker: &str, spread: f64) -> CdsPosition {
    CdsPosition::builder()
        .ticker(ticker)
        .notional(dec!(10_000_000))
        .spread_bps(spread)
        .recovery_rate(0.4)
        .contract_date(d(2024, 6, 1))
        .build()
        .unwrap()
}

fn reference() -> ReferenceData {
    ReferenceData::builder()
        .valuation_date(d(2025, 1, 17))
        .risk_free_rate(0.0425)
        .add_bonds([
            bond("F", dec!(10_000_000), 6.0, CreditRating::BBMinus),
            bond("XOM", dec!(30_000_000), 4.0, CreditRating::AAMinus),
        ])
        .add_cds_positions([cds("F", 250.0), cds("M", 400.0)])
        .build()
        .unwrap()
}

fn engine(source: impl PriceHistorySource + 'static) -> AnalyticsEngine {
    AnalyticsEngine::builder()
        .with_source(Arc::new(source))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_run_with_partial_history() {
    let source = MapSource::default()
        .with("F", &[10.0, 10.5, 10.2, 10.8])
        .with("XOM", &[100.0, 101.0, 99.0, 102.0])
        .with_cap("F", 4.0e10);
    let report = engine(source)
        .run(&reference(), LookbackPeriod::Years(2))
        .await
        .unwrap();

    assert_eq!(report.requested(), 3);
    assert_eq!(report.succeeded(), 2);
    assert!(matches!(
        report.fetch.failures[&Ticker::from("M")],
        FetchFailure::Source { .. }
    ));

    // Failed identifier is still in the enriched CDS table.
    assert_eq!(report.enriched_cds.len(), 2);
    let m = &report.enriched_cds[1];
    assert_eq!(m.ticker.as_str(), "M");
    assert_eq!(m.stock_price, None);
    assert_eq!(m.volatility, None);

    let f = &report.enriched_bonds[0];
    assert_eq!(f.stock_price, Some(10.8));
    assert_eq!(f.market_cap, Some(4.0e10));
    assert!(f.volatility.is_some());
    assert_eq!(report.enriched_bonds[1].market_cap, None);

    assert_eq!(report.correlation.len(), 2);
    assert!(report.correlation.is_symmetric());

    // Weights 0.25 / 0.75.
    assert_relative_eq!(report.aggregates.weighted_avg_coupon, 4.5, epsilon = 1e-12);
    assert_eq!(report.aggregates.total_cds_notional, dec!(20_000_000));
    assert_eq!(report.summary.num_cds, 2);
    assert!(report.average_volatility().is_some());
}

#[tokio::test]
async fn test_fundamentals_failure_keeps_history() {
    let source = MapSource {
        fail_fundamentals: true,
        ..MapSource::default()
    }
    .with("F", &[10.0, 11.0])
    .with_cap("F", 1.0);

    let report = engine(source)
        .fetch_all(&[Ticker::from("F")], LookbackPeriod::Max)
        .await;
    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.fundamentals[&Ticker::from("F")].market_cap, None);
}

#[tokio::test]
async fn test_slow_fetch_times_out() {
    let engine = AnalyticsEngine::builder()
        .with_source(Arc::new(SlowSource::new(Duration::from_millis(500))))
        .with_fetch_timeout(Duration::from_millis(20))
        .build()
        .unwrap();

    let report = engine
        .fetch_all(&[Ticker::from("F")], LookbackPeriod::Max)
        .await;
    assert_eq!(
        report.failures[&Ticker::from("F")],
        FetchFailure::Timeout { after_ms: 20 }
    );
}

#[tokio::test]
async fn test_concurrency_is_bounded() {
    let source = Arc::new(SlowSource::new(Duration::from_millis(20)));
    let engine = AnalyticsEngine::builder()
        .with_source(source.clone())
        .with_max_concurrency(2)
        .build()
        .unwrap();

    let tickers: Vec<Ticker> = ["A", "B", "C", "D", "E", "F"]
        .into_iter()
        .map(Ticker::from)
        .collect();
    let report = engine.fetch_all(&tickers, LookbackPeriod::Max).await;

    assert_eq!(report.succeeded(), 6);
    assert!(source.peak.load(Ordering::SeqCst) <= 2);
}

#[tokio::test]
async fn test_empty_bond_book_is_an_error() {
    let reference = ReferenceData::builder()
        .valuation_date(d(2025, 1, 17))
        .add_cds(cds("M", 400.0))
        .build()
        .unwrap();

    let err = engine(MapSource::default())
        .run(&reference, LookbackPeriod::Max)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Portfolio(PortfolioError::EmptyPortfolio)
    ));
}

#[test]
fn test_report_serializes_without_series() {
    let engine = engine(MapSource::default());
    let mut fetch = FetchReport::new();
    fetch.record(
        Ticker::from("F"),
        FetchOutcome::Loaded {
            series: PriceSeries::new(Ticker::from("F"), points(&[10.0, 11.0])),
            fundamentals: Fundamentals::default(),
        },
    );
    fetch.record(Ticker::from("XOM"), FetchOutcome::Failed(FetchFailure::NoData));

    let report = engine.analyze(&reference(), fetch).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert!(json["fetch"].get("series").is_none());
    assert_eq!(json["fetch"]["failures"]["XOM"]["kind"], "no_data");
    assert_eq!(json["metrics"]["F"]["current_price"], 11.0);
    assert_eq!(json["enriched_bonds"].as_array().unwrap().len(), 2);
}
