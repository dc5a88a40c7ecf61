//! Return correlation across identifiers.

use std::collections::BTreeMap;

use creditfolio_core::{Date, Ticker};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::series::PriceSeries;

/// Square correlation matrix of simple returns, indexed by identifier.
///
/// Cells are `None` where a pair shares fewer than two return dates or one
/// side has zero variance over the shared dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    tickers: Vec<Ticker>,
    /// Row-major, `tickers.len()` squared.
    cells: Vec<Option<f64>>,
}

impl CorrelationMatrix {
    /// Identifiers in row/column order.
    #[must_use]
    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    /// Matrix dimension.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    /// Returns true for a matrix with no identifiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    fn index_of(&self, ticker: &Ticker) -> Option<usize> {
        self.tickers.iter().position(|t| t == ticker)
    }

    /// Correlation between two identifiers. `None` if either is unknown or
    /// the cell is undefined.
    #[must_use]
    pub fn get(&self, a: &Ticker, b: &Ticker) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        self.cell(i, j)
    }

    /// Cell by position.
    #[must_use]
    pub fn cell(&self, i: usize, j: usize) -> Option<f64> {
        let n = self.len();
        if i >= n || j >= n {
            return None;
        }
        self.cells[i * n + j]
    }

    /// Row `i` as a slice of cells.
    #[must_use]
    pub fn row(&self, i: usize) -> &[Option<f64>] {
        let n = self.len();
        &self.cells[i * n..(i + 1) * n]
    }

    /// Returns true if `cell(i, j) == cell(j, i)` for every pair.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        let n = self.len();
        (0..n).all(|i| (0..n).all(|j| self.cell(i, j) == self.cell(j, i)))
    }
}

/// Computes pairwise Pearson correlation of simple returns.
///
/// Return series are aligned by date; each pair uses only the dates on which
/// both identifiers have a return (pairwise-complete observations). The
/// diagonal is exactly 1.0 for any identifier with at least two returns.
#[must_use]
pub fn compute_correlation_matrix(series: &BTreeMap<Ticker, PriceSeries>) -> CorrelationMatrix {
    let tickers: Vec<Ticker> = series.keys().cloned().collect();
    let returns: Vec<BTreeMap<Date, f64>> = series
        .values()
        .map(|s| s.returns().into_iter().collect())
        .collect();

    let n = tickers.len();
    let mut cells = vec![None; n * n];

    for i in 0..n {
        if returns[i].len() >= 2 {
            cells[i * n + i] = Some(1.0);
        }
        for j in (i + 1)..n {
            let value = pairwise_correlation(&returns[i], &returns[j]);
            cells[i * n + j] = value;
            cells[j * n + i] = value;
        }
    }

    log::debug!("correlation matrix: {n}x{n}");

    CorrelationMatrix { tickers, cells }
}

fn pairwise_correlation(a: &BTreeMap<Date, f64>, b: &BTreeMap<Date, f64>) -> Option<f64> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = a
        .iter()
        .filter_map(|(date, x)| b.get(date).map(|y| (*x, *y)))
        .unzip();

    if xs.len() < 2 {
        return None;
    }

    let sx = xs.iter().std_dev();
    let sy = ys.iter().std_dev();
    if !(sx > 0.0 && sy > 0.0) {
        return None;
    }

    let rho = xs.iter().covariance(ys.iter()) / (sx * sy);
    rho.is_finite().then(|| rho.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn start() -> Date {
        Date::from_ymd(2024, 6, 3).unwrap()
    }

    fn map(entries: Vec<PriceSeries>) -> BTreeMap<Ticker, PriceSeries> {
        entries
            .into_iter()
            .map(|s| (s.ticker().clone(), s))
            .collect()
    }

    #[test]
    fn test_perfect_positive_and_negative() {
        let a = PriceSeries::from_closes("A".into(), start(), &[100.0, 110.0, 99.0, 120.0]);
        // Twice the price level, identical returns
        let b = PriceSeries::from_closes("B".into(), start(), &[200.0, 220.0, 198.0, 240.0]);
        let c = PriceSeries::from_closes("C".into(), start(), &[100.0, 90.0, 99.0, 80.0]);

        let m = compute_correlation_matrix(&map(vec![a, b, c]));
        let ab = m.get(&"A".into(), &"B".into()).unwrap();
        let ac = m.get(&"A".into(), &"C".into()).unwrap();
        assert_relative_eq!(ab, 1.0, epsilon = 1e-9);
        assert!(ac < -0.9);
        assert!(m.is_symmetric());
    }

    #[test]
    fn test_diagonal_is_exactly_one() {
        let a = PriceSeries::from_closes("A".into(), start(), &[10.0, 11.0, 12.5]);
        let b = PriceSeries::from_closes("B".into(), start(), &[10.0, 10.0, 10.0]);
        let m = compute_correlation_matrix(&map(vec![a, b]));
        assert_eq!(m.cell(0, 0), Some(1.0));
        assert_eq!(m.cell(1, 1), Some(1.0));
        // Zero variance in B: undefined, not zero
        assert_eq!(m.cell(0, 1), None);
    }

    #[test]
    fn test_short_series_diagonal_undefined() {
        let a = PriceSeries::from_closes("A".into(), start(), &[10.0, 11.0]);
        let m = compute_correlation_matrix(&map(vec![a]));
        assert_eq!(m.cell(0, 0), None);
    }

    #[test]
    fn test_no_overlap_is_undefined() {
        let a = PriceSeries::from_closes("A".into(), start(), &[10.0, 11.0, 12.5, 11.0]);
        let b = PriceSeries::from_closes(
            "B".into(),
            start().add_days(30),
            &[20.0, 21.0, 19.0, 22.0],
        );
        let m = compute_correlation_matrix(&map(vec![a, b]));
        assert_eq!(m.get(&"A".into(), &"B".into()), None);
        assert_eq!(m.get(&"B".into(), &"A".into()), None);
        assert_eq!(m.cell(0, 0), Some(1.0));
    }

    #[test]
    fn test_partial_overlap_uses_shared_dates() {
        let a = PriceSeries::from_closes("A".into(), start(), &[100.0, 101.0, 103.0, 102.0, 104.0]);
        let b = PriceSeries::from_closes("B".into(), start().add_days(1), &[101.0, 103.0, 102.0, 104.0]);
        let m = compute_correlation_matrix(&map(vec![a, b]));
        // Returns coincide on the three shared dates; A's first return has no partner
        assert_relative_eq!(m.get(&"A".into(), &"B".into()).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unknown_ticker() {
        let m = compute_correlation_matrix(&BTreeMap::new());
        assert!(m.is_empty());
        assert_eq!(m.get(&"X".into(), &"X".into()), None);
    }
}
