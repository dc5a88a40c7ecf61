//! Closing-price time series.

use creditfolio_core::{Date, Ticker};
use serde::{Deserialize, Serialize};

/// A single closing price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation date.
    pub date: Date,
    /// Closing price.
    pub close: f64,
}

impl PricePoint {
    /// Creates a price point.
    #[must_use]
    pub fn new(date: Date, close: f64) -> Self {
        Self { date, close }
    }
}

/// Chronologically ordered closing prices for one identifier.
///
/// Construction sorts by date, keeps the last observation for a repeated
/// date, and drops closes that are not finite and positive (a zero close
/// would make the next return infinite).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    ticker: Ticker,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Builds a series from unordered observations.
    #[must_use]
    pub fn new(ticker: Ticker, mut points: Vec<PricePoint>) -> Self {
        let before = points.len();
        points.retain(|p| p.close.is_finite() && p.close > 0.0);
        if points.len() < before {
            log::warn!(
                "{}: dropped {} non-positive or non-finite closes",
                ticker,
                before - points.len()
            );
        }

        // Stable sort, so the last duplicate in input order survives dedup below.
        points.sort_by_key(|p| p.date);
        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }

        Self {
            ticker,
            points: deduped,
        }
    }

    /// Builds a series of consecutive calendar days starting at `start`.
    #[must_use]
    pub fn from_closes(ticker: Ticker, start: Date, closes: &[f64]) -> Self {
        let points = closes
            .iter()
            .zip(0_i64..)
            .map(|(close, offset)| PricePoint::new(start.add_days(offset), *close))
            .collect();
        Self::new(ticker, points)
    }

    /// Identifier the series belongs to.
    #[must_use]
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Observations, oldest first.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Closing prices, oldest first.
    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if there are no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent observation.
    #[must_use]
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Simple returns `close[t] / close[t-1] - 1`, dated at `t`.
    ///
    /// The first observation has no return, so the result has `len() - 1`
    /// entries (or none).
    #[must_use]
    pub fn returns(&self) -> Vec<(Date, f64)> {
        self.points
            .windows(2)
            .map(|w| (w[1].date, w[1].close / w[0].close - 1.0))
            .collect()
    }
}
