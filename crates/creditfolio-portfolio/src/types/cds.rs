//! Single-name CDS positions.

use creditfolio_core::{Date, Ticker};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{PortfolioError, PortfolioResult};

/// Default contract tenor in years.
pub const DEFAULT_TENOR_YEARS: f64 = 5.0;

/// Protection on a single reference entity.
///
/// The reference entity is identified by ticker; it does not need a
/// matching bond position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdsPosition {
    /// Reference entity identifier.
    pub ticker: Ticker,

    /// Reference entity name.
    pub company: String,

    /// Contract notional, in currency units.
    pub notional: Decimal,

    /// Tenor in years.
    pub tenor: f64,

    /// Running spread in basis points.
    pub spread_bps: f64,

    /// Assumed recovery as a fraction of notional.
    pub recovery_rate: f64,

    /// Trade date.
    pub contract_date: Date,
}

impl CdsPosition {
    /// Creates a new CDS position builder.
    #[must_use]
    pub fn builder() -> CdsPositionBuilder {
        CdsPositionBuilder::new()
    }

    /// Running spread as a decimal rate (280 bps → 0.028).
    #[must_use]
    pub fn spread_rate(&self) -> f64 {
        self.spread_bps / 10_000.0
    }
}

/// Builder for [`CdsPosition`].
#[derive(Debug, Clone, Default)]
pub struct CdsPositionBuilder {
    ticker: Option<Ticker>,
    company: Option<String>,
    notional: Option<Decimal>,
    tenor: Option<f64>,
    spread_bps: Option<f64>,
    recovery_rate: Option<f64>,
    contract_date: Option<Date>,
}

impl CdsPositionBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the reference entity identifier.
    #[must_use]
    pub fn ticker(mut self, ticker: impl Into<Ticker>) -> Self {
        self.ticker = Some(ticker.into());
        self
    }

    /// Sets the reference entity name.
    #[must_use]
    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Sets the notional.
    #[must_use]
    pub fn notional(mut self, notional: Decimal) -> Self {
        self.notional = Some(notional);
        self
    }

    /// Sets the tenor in years (defaults to 5).
    #[must_use]
    pub fn tenor(mut self, years: f64) -> Self {
        self.tenor = Some(years);
        self
    }

    /// Sets the spread in basis points.
    #[must_use]
    pub fn spread_bps(mut self, bps: f64) -> Self {
        self.spread_bps = Some(bps);
        self
    }

    /// Sets the recovery rate.
    #[must_use]
    pub fn recovery_rate(mut self, rate: f64) -> Self {
        self.recovery_rate = Some(rate);
        self
    }

    /// Sets the contract date.
    #[must_use]
    pub fn contract_date(mut self, date: Date) -> Self {
        self.contract_date = Some(date);
        self
    }

    /// Builds the position.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing, the notional or
    /// tenor is not positive, the spread is negative, or the recovery rate
    /// is outside `[0, 1]`.
    pub fn build(self) -> PortfolioResult<CdsPosition> {
        let ticker = self
            .ticker
            .ok_or_else(|| PortfolioError::missing_field("ticker"))?;
        let id = ticker.as_str();

        let notional = self
            .notional
            .ok_or_else(|| PortfolioError::missing_field("notional"))?;
        let spread_bps = self
            .spread_bps
            .ok_or_else(|| PortfolioError::missing_field("spread_bps"))?;
        let recovery_rate = self
            .recovery_rate
            .ok_or_else(|| PortfolioError::missing_field("recovery_rate"))?;
        let contract_date = self
            .contract_date
            .ok_or_else(|| PortfolioError::missing_field("contract_date"))?;
        let tenor = self.tenor.unwrap_or(DEFAULT_TENOR_YEARS);

        if notional <= Decimal::ZERO {
            return Err(PortfolioError::invalid_position(
                id,
                "notional must be positive",
            ));
        }
        if !(tenor.is_finite() && tenor > 0.0) {
            return Err(PortfolioError::invalid_position(
                id,
                format!("tenor must be positive, got {tenor}"),
            ));
        }
        if !(spread_bps.is_finite() && spread_bps >= 0.0) {
            return Err(PortfolioError::invalid_position(
                id,
                format!("spread_bps cannot be negative, got {spread_bps}"),
            ));
        }
        if !(0.0..=1.0).contains(&recovery_rate) {
            return Err(PortfolioError::invalid_position(
                id,
                format!("recovery_rate must be within [0, 1], got {recovery_rate}"),
            ));
        }

        Ok(CdsPosition {
            company: self.company.unwrap_or_else(|| ticker.to_string()),
            ticker,
            notional,
            tenor,
            spread_bps,
            recovery_rate,
            contract_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn american() -> CdsPositionBuilder {
        CdsPosition::builder()
            .ticker("AAL")
            .company("American Airlines")
            .notional(dec!(5_000_000))
            .spread_bps(450.0)
            .recovery_rate(0.35)
            .contract_date(Date::from_ymd(2025, 1, 17).unwrap())
    }

    #[test]
    fn test_build_defaults_tenor() {
        let cds = american().build().unwrap();
        assert_relative_eq!(cds.tenor, 5.0);
        assert_relative_eq!(cds.spread_rate(), 0.045);
    }

    #[test]
    fn test_recovery_bounds_are_inclusive() {
        assert!(american().recovery_rate(0.0).build().is_ok());
        assert!(american().recovery_rate(1.0).build().is_ok());
        assert!(american().recovery_rate(1.01).build().is_err());
        assert!(american().recovery_rate(-0.1).build().is_err());
        assert!(american().recovery_rate(f64::NAN).build().is_err());
    }

    #[test]
    fn test_rejects_invalid_terms() {
        assert!(american().notional(dec!(0)).build().is_err());
        assert!(american().tenor(0.0).build().is_err());
        assert!(american().spread_bps(-1.0).build().is_err());
        assert!(american().spread_bps(0.0).build().is_ok());
    }
}
