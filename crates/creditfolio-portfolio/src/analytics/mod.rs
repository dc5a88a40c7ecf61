//! Portfolio analytics over the reference data.

mod aggregates;
mod credit;
mod summary;

pub use aggregates::{compute_portfolio_aggregates, years_to_maturity, PortfolioAggregates};
pub use credit::highest_risk_cds;
pub use summary::PortfolioSummary;
