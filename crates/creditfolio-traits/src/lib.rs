//! # Creditfolio Traits
//!
//! Trait definitions for the data sources the analytics engine reads from.
//!
//! This crate holds the contracts only; file-backed implementations live in
//! `creditfolio-ext-file`, and tests supply their own.
//!
//! ## Module Structure
//!
//! - [`market_data`]: [`PriceHistorySource`] and the [`Fundamentals`] it returns
//! - [`lookback`]: [`LookbackPeriod`], how far back a history request reaches
//! - [`error`]: [`TraitError`], the common source error
//!
//! ## Dependency Injection
//!
//! ```ignore
//! AnalyticsEngine::builder()
//!     .with_source(Arc::new(impl PriceHistorySource))
//!     .build()
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod lookback;
pub mod market_data;

pub use error::TraitError;
pub use lookback::LookbackPeriod;
pub use market_data::{EmptyPriceHistorySource, Fundamentals, PriceHistorySource, SourceType};
