//! Exposure bucketing of the bond book.
//!
//! Every distribution reports the count, value and percentage weight of the
//! bonds in each bucket. Weights are percent of total bond value (0-100).

mod exposure;
mod maturity;

pub use exposure::{exposure_by_rating, exposure_by_sector, BucketExposure};
pub use maturity::{bucket_by_maturity, MaturityDistribution};
