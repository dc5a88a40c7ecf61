//! # Creditfolio Core
//!
//! Core types shared by every Creditfolio crate.
//!
//! - **Types**: [`Date`] for valuation and maturity dates, [`Ticker`] for
//!   security identifiers
//! - **Ratings**: [`CreditRating`] letters and the [`RatingScale`] that maps
//!   them to ordinal scores (higher = better credit quality)
//!
//! ## Example
//!
//! ```rust
//! use creditfolio_core::prelude::*;
//!
//! let scale = RatingScale::standard();
//! assert_eq!(scale.numeric_for("BB+").unwrap(), 7);
//! assert_eq!(scale.letter_for(10.2, DEFAULT_TOLERANCE), "BBB+");
//! assert_eq!(scale.letter_for(30.0, DEFAULT_TOLERANCE), NOT_AVAILABLE);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod rating;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::rating::{CreditRating, RatingScale, DEFAULT_TOLERANCE, NOT_AVAILABLE};
    pub use crate::types::{Date, Ticker};
}

pub use error::{CoreError, CoreResult};
pub use rating::{CreditRating, RatingScale, DEFAULT_TOLERANCE, NOT_AVAILABLE};
pub use types::{Date, Ticker};
