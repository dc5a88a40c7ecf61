//! Joins positions with per-issuer market metrics.
//!
//! The join is left-outer on the ticker: every position produces a record,
//! and a position whose issuer has no metrics keeps `None` in the market
//! fields. Field order on the record types is the column order of the
//! exported tables.

use std::collections::BTreeMap;

use creditfolio_analytics::SecurityMetrics;
use creditfolio_core::{CreditRating, Date, Ticker};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{BondPosition, CdsPosition};

/// Metrics keyed by identifier.
pub type MetricsByTicker = BTreeMap<Ticker, SecurityMetrics>;

/// A bond position with market value, remaining life and issuer metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedBondRecord {
    /// Issuer identifier.
    pub ticker: Ticker,
    /// Issuer name.
    pub company: String,
    /// Issuer sector.
    pub sector: String,
    /// Face amount held.
    pub position_size: Decimal,
    /// Annual coupon, percent.
    pub coupon: f64,
    /// Maturity date.
    pub maturity: Date,
    /// Letter rating.
    pub rating: CreditRating,
    /// Numeric rating.
    pub rating_numeric: u8,
    /// Issue price, percent of par.
    pub issue_price: Decimal,
    /// Market price, percent of par.
    pub current_price: Decimal,
    /// Issuer's latest stock close.
    pub stock_price: Option<f64>,
    /// Issuer's annualized stock volatility.
    pub volatility: Option<f64>,
    /// Issuer's market capitalization.
    pub market_cap: Option<f64>,
    /// Years from valuation date to maturity.
    pub years_to_maturity: f64,
    /// Position size × current price / 100.
    pub market_value: Decimal,
}

/// A CDS position with reference-entity metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedCdsRecord {
    /// Reference entity identifier.
    pub ticker: Ticker,
    /// Reference entity name.
    pub company: String,
    /// Contract notional.
    pub notional: Decimal,
    /// Tenor in years.
    pub tenor: f64,
    /// Spread in basis points.
    pub spread_bps: f64,
    /// Recovery rate.
    pub recovery_rate: f64,
    /// Trade date.
    pub contract_date: Date,
    /// Entity's latest stock close.
    pub stock_price: Option<f64>,
    /// Entity's annualized stock volatility.
    pub volatility: Option<f64>,
}

/// Enriches every bond, in input order.
#[must_use]
pub fn enrich_bonds(
    bonds: &[BondPosition],
    metrics: &MetricsByTicker,
    valuation_date: Date,
) -> Vec<EnrichedBondRecord> {
    bonds
        .iter()
        .map(|bond| {
            let m = metrics.get(&bond.ticker);
            if m.is_none() {
                log::debug!("{}: no metrics, market fields left empty", bond.ticker);
            }
            EnrichedBondRecord {
                ticker: bond.ticker.clone(),
                company: bond.company.clone(),
                sector: bond.sector.clone(),
                position_size: bond.position_size,
                coupon: bond.coupon,
                maturity: bond.maturity,
                rating: bond.rating,
                rating_numeric: bond.rating_numeric,
                issue_price: bond.issue_price,
                current_price: bond.current_price,
                stock_price: m.and_then(|m| m.current_price),
                volatility: m.and_then(|m| m.annual_volatility),
                market_cap: m.and_then(|m| m.market_cap),
                years_to_maturity: bond.years_to_maturity(valuation_date),
                market_value: bond.market_value(),
            }
        })
        .collect()
}

/// Enriches every CDS position, in input order.
#[must_use]
pub fn enrich_cds(cds: &[CdsPosition], metrics: &MetricsByTicker) -> Vec<EnrichedCdsRecord> {
    cds.iter()
        .map(|c| {
            let m = metrics.get(&c.ticker);
            EnrichedCdsRecord {
                ticker: c.ticker.clone(),
                company: c.company.clone(),
                notional: c.notional,
                tenor: c.tenor,
                spread_bps: c.spread_bps,
                recovery_rate: c.recovery_rate,
                contract_date: c.contract_date,
                stock_price: m.and_then(|m| m.current_price),
                volatility: m.and_then(|m| m.annual_volatility),
            }
        })
        .collect()
}
