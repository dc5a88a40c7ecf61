//! Value-weighted bond aggregates and CDS totals.

use creditfolio_core::{Date, RatingScale, DEFAULT_TOLERANCE};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{BondPosition, CdsPosition};
use crate::{PortfolioError, PortfolioResult};

/// Portfolio-level figures derived from the two books.
///
/// Bond averages are weighted by position size. CDS notional is reported as
/// its own total and never enters the bond averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioAggregates {
    /// Sum of bond position sizes.
    pub total_bond_value: Decimal,

    /// Sum of CDS notionals.
    pub total_cds_notional: Decimal,

    /// Position-weighted coupon, percent.
    pub weighted_avg_coupon: f64,

    /// Position-weighted years to maturity.
    pub weighted_avg_maturity: f64,

    /// Position-weighted numeric rating.
    pub weighted_avg_rating: f64,

    /// Approximate letter for `weighted_avg_rating`, or "N/A".
    pub weighted_avg_rating_letter: String,

    /// Number of bond positions.
    pub num_bonds: usize,

    /// Number of CDS positions.
    pub num_cds: usize,
}

/// Years from `valuation_date` to `maturity`: calendar days / 365.25.
///
/// Not clamped; matured bonds give a negative value.
#[must_use]
pub fn years_to_maturity(maturity: Date, valuation_date: Date) -> f64 {
    valuation_date.years_until(&maturity)
}

/// Computes the portfolio aggregates.
///
/// `weighted_avg_X = Σ X_i × size_i / Σ size_i` for coupon, years to
/// maturity and numeric rating. The weights are normalised in `Decimal`
/// first, so a single-bond book reproduces that bond's values exactly.
///
/// # Errors
///
/// Returns [`PortfolioError::EmptyPortfolio`] when the total bond value is
/// zero (including an empty bond book).
pub fn compute_portfolio_aggregates(
    bonds: &[BondPosition],
    cds: &[CdsPosition],
    valuation_date: Date,
    scale: &RatingScale,
) -> PortfolioResult<PortfolioAggregates> {
    let total_bond_value: Decimal = bonds.iter().map(|b| b.position_size).sum();
    if total_bond_value.is_zero() {
        return Err(PortfolioError::EmptyPortfolio);
    }
    let total_cds_notional: Decimal = cds.iter().map(|c| c.notional).sum();

    let mut coupon = 0.0;
    let mut maturity = 0.0;
    let mut rating = 0.0;
    for bond in bonds {
        let weight = (bond.position_size / total_bond_value)
            .to_f64()
            .unwrap_or(0.0);
        coupon += bond.coupon * weight;
        maturity += years_to_maturity(bond.maturity, valuation_date) * weight;
        rating += f64::from(bond.rating_numeric) * weight;
    }

    let aggregates = PortfolioAggregates {
        total_bond_value,
        total_cds_notional,
        weighted_avg_coupon: coupon,
        weighted_avg_maturity: maturity,
        weighted_avg_rating: rating,
        weighted_avg_rating_letter: scale.letter_for(rating, DEFAULT_TOLERANCE).to_string(),
        num_bonds: bonds.len(),
        num_cds: cds.len(),
    };

    log::debug!(
        "aggregates: {} bonds, value {}, wac {:.3}%, wam {:.2}y, rating {:.2} ({})",
        aggregates.num_bonds,
        aggregates.total_bond_value,
        aggregates.weighted_avg_coupon,
        aggregates.weighted_avg_maturity,
        aggregates.weighted_avg_rating,
        aggregates.weighted_avg_rating_letter
    );

    Ok(aggregates)
}
