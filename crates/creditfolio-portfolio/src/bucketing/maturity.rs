//! Maturity profile of the bond book.

use std::collections::BTreeMap;

use creditfolio_core::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::exposure::{group_by, BucketExposure};
use crate::types::{BondPosition, MaturityBucket};

/// Bond value by remaining-life bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaturityDistribution {
    /// Populated buckets, shortest first.
    pub by_bucket: BTreeMap<MaturityBucket, BucketExposure>,

    /// Sum of bond position sizes.
    pub total_bond_value: Decimal,
}

impl MaturityDistribution {
    /// Exposure in one bucket, if any bond fell in it.
    #[must_use]
    pub fn get(&self, bucket: MaturityBucket) -> Option<&BucketExposure> {
        self.by_bucket.get(&bucket)
    }

    /// Every bucket in order, with empty exposure for unpopulated ones.
    #[must_use]
    pub fn all_buckets(&self) -> Vec<(MaturityBucket, BucketExposure)> {
        MaturityBucket::ALL
            .iter()
            .map(|b| (*b, self.by_bucket.get(b).cloned().unwrap_or_default()))
            .collect()
    }

    /// Combined weight of buckets up to and including `bucket`, percent.
    #[must_use]
    pub fn cumulative_weight(&self, bucket: MaturityBucket) -> f64 {
        self.by_bucket
            .range(..=bucket)
            .map(|(_, e)| e.weight_pct)
            .sum()
    }
}

/// Buckets bonds by years to maturity from `valuation_date`.
#[must_use]
pub fn bucket_by_maturity(bonds: &[BondPosition], valuation_date: Date) -> MaturityDistribution {
    MaturityDistribution {
        by_bucket: group_by(bonds, |b| {
            MaturityBucket::from_years(b.years_to_maturity(valuation_date))
        }),
        total_bond_value: bonds.iter().map(|b| b.position_size).sum(),
    }
}
