//! Position and bucket types.

mod bond;
mod cds;
mod maturity;

pub use bond::{BondPosition, BondPositionBuilder};
pub use cds::{CdsPosition, CdsPositionBuilder, DEFAULT_TENOR_YEARS};
pub use maturity::MaturityBucket;
