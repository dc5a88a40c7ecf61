//! # Creditfolio Ext File
//!
//! File-based adapters for the Creditfolio engine.
//!
//! This crate provides:
//! - [`CsvPriceHistorySource`]: daily closes and fundamentals from CSV
//! - [`load_reference_data`]: bond and CDS books from TOML
//! - [`CsvExporter`]: the four export tables (bonds, CDS, correlation, metrics)
//!
//! For live vendor data, implement
//! [`PriceHistorySource`](creditfolio_traits::PriceHistorySource) in a
//! separate extension.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod export;
mod market_data;
mod reference_data;

pub use error::*;
pub use export::*;
pub use market_data::*;
pub use reference_data::*;
