//! Sector and rating exposure.

use std::collections::BTreeMap;

use creditfolio_core::CreditRating;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::BondPosition;

/// Aggregated exposure for one bucket of bonds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketExposure {
    /// Number of bonds in the bucket.
    pub count: usize,

    /// Sum of position sizes.
    pub value: Decimal,

    /// Share of total bond value, percent.
    pub weight_pct: f64,
}

impl BucketExposure {
    /// Returns true if no bond fell in this bucket.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Bond exposure by sector, sectors in name order.
#[must_use]
pub fn exposure_by_sector(bonds: &[BondPosition]) -> BTreeMap<String, BucketExposure> {
    group_by(bonds, |b| b.sector.clone())
}

/// Bond exposure by letter rating, best quality first.
#[must_use]
pub fn exposure_by_rating(bonds: &[BondPosition]) -> BTreeMap<CreditRating, BucketExposure> {
    group_by(bonds, |b| b.rating)
}

pub(crate) fn group_by<K: Ord>(
    bonds: &[BondPosition],
    key: impl Fn(&BondPosition) -> K,
) -> BTreeMap<K, BucketExposure> {
    let total: Decimal = bonds.iter().map(|b| b.position_size).sum();

    let mut grouped: BTreeMap<K, BucketExposure> = BTreeMap::new();
    for bond in bonds {
        let entry = grouped.entry(key(bond)).or_default();
        entry.count += 1;
        entry.value += bond.position_size;
    }

    if !total.is_zero() {
        for exposure in grouped.values_mut() {
            exposure.weight_pct = (exposure.value / total * Decimal::ONE_HUNDRED)
                .to_f64()
                .unwrap_or(0.0);
        }
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use creditfolio_core::{Date, RatingScale};
    use rust_decimal_macros::dec;

    fn bond(ticker: &str, sector: &str, rating: CreditRating, size: Decimal) -> BondPosition {
        BondPosition::builder()
            .ticker(ticker)
            .sector(sector)
            .position_size(size)
            .coupon(5.0)
            .maturity(Date::from_ymd(2028, 1, 1).unwrap())
            .rating(rating)
            .current_price(dec!(99))
            .build(&RatingScale::standard())
            .unwrap()
    }

    fn book() -> Vec<BondPosition> {
        vec![
            bond("M", "Retail", CreditRating::BBMinus, dec!(4_000_000)),
            bond("XOM", "Energy", CreditRating::AAMinus, dec!(5_000_000)),
            bond("CCL", "Retail", CreditRating::BMinus, dec!(3_000_000)),
            bond("CVX", "Energy", CreditRating::AAMinus, dec!(5_000_000)),
            bond("F", "Industrial", CreditRating::BBPlus, dec!(3_000_000)),
        ]
    }

    #[test]
    fn test_sector_exposure() {
        let by_sector = exposure_by_sector(&book());
        let sectors: Vec<&str> = by_sector.keys().map(String::as_str).collect();
        assert_eq!(sectors, vec!["Energy", "Industrial", "Retail"]);

        let energy = &by_sector["Energy"];
        assert_eq!(energy.count, 2);
        assert_eq!(energy.value, dec!(10_000_000));
        assert_relative_eq!(energy.weight_pct, 50.0);

        let total: f64 = by_sector.values().map(|e| e.weight_pct).sum();
        assert_relative_eq!(total, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rating_exposure_ordered_by_quality() {
        let by_rating = exposure_by_rating(&book());
        let ratings: Vec<CreditRating> = by_rating.keys().copied().collect();
        assert_eq!(
            ratings,
            vec![
                CreditRating::AAMinus,
                CreditRating::BBPlus,
                CreditRating::BBMinus,
                CreditRating::BMinus
            ]
        );
        assert_eq!(by_rating[&CreditRating::AAMinus].count, 2);
    }

    #[test]
    fn test_empty_book() {
        assert!(exposure_by_sector(&[]).is_empty());
    }
}
