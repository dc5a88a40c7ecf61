//! # Creditfolio Portfolio
//!
//! Analytics for a book of corporate bonds and single-name CDS.
//!
//! ## Design Philosophy
//!
//! **Pure functions only.** Positions arrive validated in an immutable
//! [`ReferenceData`] table; every analytic is a function of that table, the
//! [`RatingScale`](creditfolio_core::RatingScale) and (for enrichment) a map
//! of per-issuer [`SecurityMetrics`](creditfolio_analytics::SecurityMetrics).
//! Nothing here performs I/O.
//!
//! ## Features
//!
//! - **Positions**: [`BondPosition`], [`CdsPosition`] with builder validation
//! - **Aggregates**: value-weighted coupon, maturity and rating; CDS totals
//! - **Bucketing**: sector, rating and maturity exposure
//! - **Summary**: simple averages and exposure tables for reporting
//! - **Enrichment**: left-outer join of positions with issuer metrics
//!
//! ## Example
//!
//! ```rust
//! use creditfolio_core::{CreditRating, Date, RatingScale};
//! use creditfolio_portfolio::prelude::*;
//! use rust_decimal::Decimal;
//!
//! let scale = RatingScale::standard();
//! let bond = BondPosition::builder()
//!     .ticker("F")
//!     .company("Ford Motor Co")
//!     .sector("Industrial")
//!     .position_size(Decimal::from(5_000_000))
//!     .coupon(7.40)
//!     .maturity(Date::from_ymd(2027, 11, 1).unwrap())
//!     .rating(CreditRating::BBPlus)
//!     .current_price(Decimal::new(988, 1))
//!     .build(&scale)
//!     .unwrap();
//!
//! let reference = ReferenceData::builder()
//!     .valuation_date(Date::from_ymd(2025, 1, 17).unwrap())
//!     .add_bond(bond)
//!     .build()
//!     .unwrap();
//!
//! let agg = compute_portfolio_aggregates(
//!     reference.bonds(),
//!     reference.cds(),
//!     reference.valuation_date(),
//!     &scale,
//! )
//! .unwrap();
//! assert_eq!(agg.weighted_avg_coupon, 7.40);
//! assert_eq!(agg.weighted_avg_rating_letter, "BB+");
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod analytics;
pub mod bucketing;
pub mod enrichment;
pub mod error;
pub mod reference;
pub mod types;

pub use error::{PortfolioError, PortfolioResult};

pub use types::{
    BondPosition, BondPositionBuilder, CdsPosition, CdsPositionBuilder, MaturityBucket,
    DEFAULT_TENOR_YEARS,
};

pub use reference::{MarketContext, ReferenceData, ReferenceDataBuilder};

pub use analytics::{
    compute_portfolio_aggregates, highest_risk_cds, years_to_maturity, PortfolioAggregates,
    PortfolioSummary,
};

pub use bucketing::{
    bucket_by_maturity, exposure_by_rating, exposure_by_sector, BucketExposure,
    MaturityDistribution,
};

pub use enrichment::{
    enrich_bonds, enrich_cds, EnrichedBondRecord, EnrichedCdsRecord, MetricsByTicker,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analytics::{
        compute_portfolio_aggregates, highest_risk_cds, years_to_maturity, PortfolioAggregates,
        PortfolioSummary,
    };
    pub use crate::bucketing::{bucket_by_maturity, BucketExposure, MaturityDistribution};
    pub use crate::enrichment::{enrich_bonds, enrich_cds, EnrichedBondRecord, EnrichedCdsRecord};
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::reference::{ReferenceData, ReferenceDataBuilder};
    pub use crate::types::{BondPosition, CdsPosition, MaturityBucket};
}
