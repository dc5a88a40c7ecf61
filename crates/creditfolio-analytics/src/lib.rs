//! # Creditfolio Analytics
//!
//! Price-history analytics for the issuers behind a credit portfolio.
//!
//! - [`PriceSeries`]: chronological closes with derived simple returns
//! - [`compute_security_metrics`]: current price, annualized volatility,
//!   trailing high/low and 1M/3M/1Y price changes
//! - [`compute_correlation_matrix`]: pairwise Pearson correlation of returns
//!
//! Statistics that need more observations than a series has are left as
//! `None`; they are never filled with zero.
//!
//! ```rust
//! use creditfolio_analytics::prelude::*;
//! use creditfolio_core::{Date, Ticker};
//!
//! let start = Date::from_ymd(2024, 1, 2).unwrap();
//! let closes = [100.0, 101.0, 99.5, 102.0];
//! let series = PriceSeries::from_closes(Ticker::from("F"), start, &closes);
//!
//! let metrics = compute_security_metrics(&series, &MetricsConfig::default());
//! assert_eq!(metrics.current_price, Some(102.0));
//! assert!(metrics.annual_volatility.is_some());
//! assert!(metrics.price_change_1m.is_none());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod correlation;
pub mod error;
pub mod metrics;
pub mod series;

pub use config::MetricsConfig;
pub use correlation::{compute_correlation_matrix, CorrelationMatrix};
pub use error::{AnalyticsError, AnalyticsResult};
pub use metrics::{
    average_volatility, compute_security_metrics, SecurityMetrics, PRICE_CHANGE_1M,
    PRICE_CHANGE_1Y, PRICE_CHANGE_3M,
};
pub use series::{PricePoint, PriceSeries};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::MetricsConfig;
    pub use crate::correlation::{compute_correlation_matrix, CorrelationMatrix};
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::metrics::{average_volatility, compute_security_metrics, SecurityMetrics};
    pub use crate::series::{PricePoint, PriceSeries};
}
