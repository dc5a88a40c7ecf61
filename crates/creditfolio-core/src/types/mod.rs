//! Domain types.

mod date;
mod ticker;

pub use date::{Date, DAYS_PER_YEAR};
pub use ticker::Ticker;
