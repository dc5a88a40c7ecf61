//! Reference-data summary.

use std::collections::BTreeMap;

use creditfolio_core::{CreditRating, Date, RatingScale, DEFAULT_TOLERANCE, NOT_AVAILABLE};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::bucketing::{exposure_by_rating, exposure_by_sector, BucketExposure};
use crate::reference::ReferenceData;

/// Overview of both books, computed from reference data alone.
///
/// The averages here are simple (unweighted) means; see
/// [`PortfolioAggregates`](super::PortfolioAggregates) for value-weighted
/// figures. `None` means the corresponding book is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Valuation date.
    pub valuation_date: Date,

    /// Risk-free rate as a decimal.
    pub risk_free_rate: f64,

    /// Number of bond positions.
    pub num_bonds: usize,

    /// Number of CDS positions.
    pub num_cds: usize,

    /// Sum of bond position sizes.
    pub total_bond_value: Decimal,

    /// Sum of CDS notionals.
    pub total_cds_notional: Decimal,

    /// Bond value plus CDS notional.
    pub total_exposure: Decimal,

    /// Bond exposure by sector.
    pub by_sector: BTreeMap<String, BucketExposure>,

    /// Bond exposure by rating, best first.
    pub by_rating: BTreeMap<CreditRating, BucketExposure>,

    /// Mean bond coupon, percent.
    pub avg_coupon: Option<f64>,

    /// Mean CDS spread, basis points.
    pub avg_cds_spread_bps: Option<f64>,

    /// Mean numeric rating of the bonds.
    pub avg_rating_numeric: Option<f64>,

    /// Approximate letter for `avg_rating_numeric`.
    pub avg_rating_letter: String,
}

impl PortfolioSummary {
    /// Summarises the reference data.
    #[must_use]
    pub fn calculate(reference: &ReferenceData, scale: &RatingScale) -> Self {
        let bonds = reference.bonds();
        let cds = reference.cds();

        let total_bond_value: Decimal = bonds.iter().map(|b| b.position_size).sum();
        let total_cds_notional: Decimal = cds.iter().map(|c| c.notional).sum();

        let avg_rating_numeric = mean(bonds.iter().map(|b| f64::from(b.rating_numeric)));
        let avg_rating_letter = avg_rating_numeric
            .map_or(NOT_AVAILABLE, |r| scale.letter_for(r, DEFAULT_TOLERANCE))
            .to_string();

        Self {
            valuation_date: reference.valuation_date(),
            risk_free_rate: reference.risk_free_rate(),
            num_bonds: bonds.len(),
            num_cds: cds.len(),
            total_bond_value,
            total_cds_notional,
            total_exposure: total_bond_value + total_cds_notional,
            by_sector: exposure_by_sector(bonds),
            by_rating: exposure_by_rating(bonds),
            avg_coupon: mean(bonds.iter().map(|b| b.coupon)),
            avg_cds_spread_bps: mean(cds.iter().map(|c| c.spread_bps)),
            avg_rating_numeric,
            avg_rating_letter,
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}
