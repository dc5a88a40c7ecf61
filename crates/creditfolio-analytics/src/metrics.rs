//! Per-security metrics derived from a price series.

use creditfolio_core::{Date, Ticker};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::config::MetricsConfig;
use crate::series::PriceSeries;

/// One-month price change window, in observations.
pub const PRICE_CHANGE_1M: usize = 21;

/// Three-month price change window, in observations.
pub const PRICE_CHANGE_3M: usize = 63;

/// One-year price change window, in observations.
pub const PRICE_CHANGE_1Y: usize = 252;

/// Metrics for one identifier, computed once from its full price series.
///
/// Every statistic is optional; `None` means there were not enough
/// observations (or no fundamentals), never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityMetrics {
    /// Identifier.
    pub ticker: Ticker,

    /// Number of closes the metrics were computed from.
    pub observations: usize,

    /// Date of the latest close.
    pub as_of: Option<Date>,

    /// Latest close.
    pub current_price: Option<f64>,

    /// Sample standard deviation of all simple returns × sqrt(trading days).
    pub annual_volatility: Option<f64>,

    /// Market capitalization from fundamentals.
    pub market_cap: Option<f64>,

    /// Highest close over the trailing window.
    #[serde(rename = "52w_high")]
    pub high_52w: Option<f64>,

    /// Lowest close over the trailing window.
    #[serde(rename = "52w_low")]
    pub low_52w: Option<f64>,

    /// Change over the last 21 observations.
    pub price_change_1m: Option<f64>,

    /// Change over the last 63 observations.
    pub price_change_3m: Option<f64>,

    /// Change over the last 252 observations.
    pub price_change_1y: Option<f64>,
}

impl SecurityMetrics {
    /// Attaches a market capitalization. Non-finite values are treated as absent.
    #[must_use]
    pub fn with_market_cap(mut self, market_cap: Option<f64>) -> Self {
        self.market_cap = market_cap.filter(|v| v.is_finite());
        self
    }
}

/// Computes metrics for one series.
///
/// - volatility: sample (N-1) standard deviation of the whole return series,
///   scaled by `sqrt(trading_days_per_year)`; needs at least two returns
/// - high/low: max/min of the last `window` closes, or of all closes when
///   fewer exist
/// - change over N: `close[last] / close[last - N] - 1`; needs N + 1 closes
#[must_use]
pub fn compute_security_metrics(series: &PriceSeries, config: &MetricsConfig) -> SecurityMetrics {
    let closes = series.closes();
    let returns: Vec<f64> = series.returns().into_iter().map(|(_, r)| r).collect();

    let trailing = &closes[closes.len().saturating_sub(config.window.max(1))..];

    let metrics = SecurityMetrics {
        ticker: series.ticker().clone(),
        observations: closes.len(),
        as_of: series.last().map(|p| p.date),
        current_price: closes.last().copied(),
        annual_volatility: annualized_volatility(&returns, config),
        market_cap: None,
        high_52w: trailing.iter().copied().reduce(f64::max),
        low_52w: trailing.iter().copied().reduce(f64::min),
        price_change_1m: price_change(&closes, PRICE_CHANGE_1M),
        price_change_3m: price_change(&closes, PRICE_CHANGE_3M),
        price_change_1y: price_change(&closes, PRICE_CHANGE_1Y),
    };

    log::debug!(
        "{}: {} closes, vol={:?}, price={:?}",
        metrics.ticker,
        metrics.observations,
        metrics.annual_volatility,
        metrics.current_price
    );

    metrics
}

fn annualized_volatility(returns: &[f64], config: &MetricsConfig) -> Option<f64> {
    if returns.len() < 2 {
        return None;
    }
    let daily = returns.iter().std_dev();
    Some(daily * config.annualization_factor()).filter(|v| v.is_finite())
}

fn price_change(closes: &[f64], n: usize) -> Option<f64> {
    if n == 0 || closes.len() < n + 1 {
        return None;
    }
    let last = closes[closes.len() - 1];
    let base = closes[closes.len() - 1 - n];
    Some(last / base - 1.0)
}

/// Simple mean of the defined volatilities; `None` if none are defined.
#[must_use]
pub fn average_volatility<'a>(metrics: impl IntoIterator<Item = &'a SecurityMetrics>) -> Option<f64> {
    let vols: Vec<f64> = metrics
        .into_iter()
        .filter_map(|m| m.annual_volatility)
        .collect();
    if vols.is_empty() {
        None
    } else {
        Some(vols.iter().mean())
    }
}
