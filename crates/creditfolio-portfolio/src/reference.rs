//! Immutable reference data: positions plus market context.

use std::collections::HashSet;

use creditfolio_core::{Date, Ticker};
use serde::{Deserialize, Serialize};

use crate::types::{BondPosition, CdsPosition};
use crate::{PortfolioError, PortfolioResult};

/// Valuation context shared by every position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketContext {
    /// Date all maturities are measured from.
    pub valuation_date: Date,

    /// Risk-free rate as a decimal. Carried for reporting; no formula
    /// here consumes it.
    pub risk_free_rate: f64,
}

/// The bond and CDS books being analysed.
///
/// Built once through [`ReferenceDataBuilder`] and never mutated. Positions
/// keep their input order; identifiers are unique within each book.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceData {
    market: MarketContext,
    bonds: Vec<BondPosition>,
    cds: Vec<CdsPosition>,
}

impl ReferenceData {
    /// Creates a new reference data builder.
    #[must_use]
    pub fn builder() -> ReferenceDataBuilder {
        ReferenceDataBuilder::new()
    }

    /// Market context.
    #[must_use]
    pub fn market(&self) -> &MarketContext {
        &self.market
    }

    /// Valuation date.
    #[must_use]
    pub fn valuation_date(&self) -> Date {
        self.market.valuation_date
    }

    /// Same positions valued as of another date.
    #[must_use]
    pub fn with_valuation_date(mut self, date: Date) -> Self {
        self.market.valuation_date = date;
        self
    }

    /// Risk-free rate.
    #[must_use]
    pub fn risk_free_rate(&self) -> f64 {
        self.market.risk_free_rate
    }

    /// Bond positions in input order.
    #[must_use]
    pub fn bonds(&self) -> &[BondPosition] {
        &self.bonds
    }

    /// CDS positions in input order.
    #[must_use]
    pub fn cds(&self) -> &[CdsPosition] {
        &self.cds
    }

    /// Bond position for an identifier.
    #[must_use]
    pub fn bond(&self, ticker: &Ticker) -> Option<&BondPosition> {
        self.bonds.iter().find(|b| &b.ticker == ticker)
    }

    /// CDS position for an identifier.
    #[must_use]
    pub fn cds_for(&self, ticker: &Ticker) -> Option<&CdsPosition> {
        self.cds.iter().find(|c| &c.ticker == ticker)
    }

    /// Every distinct identifier: bond issuers first, then CDS names not
    /// already covered by a bond, each in input order.
    #[must_use]
    pub fn tickers(&self) -> Vec<Ticker> {
        let mut seen = HashSet::new();
        self.bonds
            .iter()
            .map(|b| &b.ticker)
            .chain(self.cds.iter().map(|c| &c.ticker))
            .filter(|t| seen.insert(*t))
            .cloned()
            .collect()
    }

    /// Returns true if both books are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty() && self.cds.is_empty()
    }
}

/// Builder for [`ReferenceData`].
#[derive(Debug, Clone, Default)]
pub struct ReferenceDataBuilder {
    valuation_date: Option<Date>,
    risk_free_rate: f64,
    bonds: Vec<BondPosition>,
    cds: Vec<CdsPosition>,
}

impl ReferenceDataBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the valuation date.
    #[must_use]
    pub fn valuation_date(mut self, date: Date) -> Self {
        self.valuation_date = Some(date);
        self
    }

    /// Sets the risk-free rate (decimal, defaults to zero).
    #[must_use]
    pub fn risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    /// Adds a bond position.
    #[must_use]
    pub fn add_bond(mut self, bond: BondPosition) -> Self {
        self.bonds.push(bond);
        self
    }

    /// Adds several bond positions.
    #[must_use]
    pub fn add_bonds(mut self, bonds: impl IntoIterator<Item = BondPosition>) -> Self {
        self.bonds.extend(bonds);
        self
    }

    /// Adds a CDS position.
    #[must_use]
    pub fn add_cds(mut self, cds: CdsPosition) -> Self {
        self.cds.push(cds);
        self
    }

    /// Adds several CDS positions.
    #[must_use]
    pub fn add_cds_positions(mut self, cds: impl IntoIterator<Item = CdsPosition>) -> Self {
        self.cds.extend(cds);
        self
    }

    /// Builds the reference data.
    ///
    /// # Errors
    ///
    /// Returns an error if the valuation date is missing, the risk-free rate
    /// is not finite, or an identifier repeats within the bond book or within
    /// the CDS book.
    pub fn build(self) -> PortfolioResult<ReferenceData> {
        let valuation_date = self
            .valuation_date
            .ok_or_else(|| PortfolioError::missing_field("valuation_date"))?;

        if !self.risk_free_rate.is_finite() {
            return Err(PortfolioError::invalid_position(
                "market",
                "risk_free_rate must be finite",
            ));
        }

        check_unique(self.bonds.iter().map(|b| &b.ticker), "bond")?;
        check_unique(self.cds.iter().map(|c| &c.ticker), "CDS")?;

        log::debug!(
            "reference data: {} bonds, {} CDS, valuation {}",
            self.bonds.len(),
            self.cds.len(),
            valuation_date
        );

        Ok(ReferenceData {
            market: MarketContext {
                valuation_date,
                risk_free_rate: self.risk_free_rate,
            },
            bonds: self.bonds,
            cds: self.cds,
        })
    }
}

fn check_unique<'a>(tickers: impl Iterator<Item = &'a Ticker>, kind: &str) -> PortfolioResult<()> {
    let mut seen = HashSet::new();
    for ticker in tickers {
        if !seen.insert(ticker) {
            return Err(PortfolioError::duplicate_position(ticker.as_str(), kind));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use creditfolio_core::{CreditRating, RatingScale};
    use rust_decimal_macros::dec;

    fn date() -> Date {
        Date::from_ymd(2025, 1, 17).unwrap()
    }

    fn bond(ticker: &str) -> BondPosition {
        BondPosition::builder()
            .ticker(ticker)
            .position_size(dec!(5_000_000))
            .coupon(5.0)
            .maturity(Date::from_ymd(2029, 1, 17).unwrap())
            .rating(CreditRating::BBB)
            .current_price(dec!(100))
            .build(&RatingScale::standard())
            .unwrap()
    }

    fn cds(ticker: &str) -> CdsPosition {
        CdsPosition::builder()
            .ticker(ticker)
            .notional(dec!(5_000_000))
            .spread_bps(200.0)
            .recovery_rate(0.4)
            .contract_date(date())
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_keeps_order() {
        let data = ReferenceData::builder()
            .valuation_date(date())
            .risk_free_rate(0.0425)
            .add_bonds([bond("XOM"), bond("AAL"), bond("F")])
            .add_cds(cds("M"))
            .build()
            .unwrap();

        let bonds: Vec<&str> = data.bonds().iter().map(|b| b.ticker.as_str()).collect();
        assert_eq!(bonds, vec!["XOM", "AAL", "F"]);
        assert_eq!(data.valuation_date(), date());
        assert!((data.risk_free_rate() - 0.0425).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tickers_bonds_then_uncovered_cds() {
        let data = ReferenceData::builder()
            .valuation_date(date())
            .add_bonds([bond("TSLA"), bond("F")])
            .add_cds_positions([cds("M"), cds("F"), cds("AAL")])
            .build()
            .unwrap();

        let tickers: Vec<String> = data.tickers().iter().map(ToString::to_string).collect();
        assert_eq!(tickers, vec!["TSLA", "F", "M", "AAL"]);
    }

    #[test]
    fn test_same_name_in_both_books_is_allowed() {
        let data = ReferenceData::builder()
            .valuation_date(date())
            .add_bond(bond("F"))
            .add_cds(cds("F"))
            .build()
            .unwrap();
        assert!(data.bond(&"F".into()).is_some());
        assert!(data.cds_for(&"F".into()).is_some());
    }

    #[test]
    fn test_rejects_duplicates() {
        let err = ReferenceData::builder()
            .valuation_date(date())
            .add_bonds([bond("F"), bond("F")])
            .build()
            .unwrap_err();
        assert_eq!(err, PortfolioError::duplicate_position("F", "bond"));

        let err = ReferenceData::builder()
            .valuation_date(date())
            .add_cds_positions([cds("M"), cds("M")])
            .build()
            .unwrap_err();
        assert_eq!(err, PortfolioError::duplicate_position("M", "CDS"));
    }

    #[test]
    fn test_with_valuation_date() {
        let data = ReferenceData::builder()
            .valuation_date(date())
            .add_bond(bond("F"))
            .build()
            .unwrap();
        let later = Date::from_ymd(2026, 1, 2).unwrap();
        let moved = data.clone().with_valuation_date(later);
        assert_eq!(moved.valuation_date(), later);
        assert_eq!(moved.bonds(), data.bonds());
    }

    #[test]
    fn test_requires_valuation_date() {
        let err = ReferenceData::builder().build().unwrap_err();
        assert_eq!(err, PortfolioError::missing_field("valuation_date"));
    }
}
