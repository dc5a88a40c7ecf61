//! Output of a full analytics run.

use creditfolio_analytics::{average_volatility, CorrelationMatrix};
use creditfolio_portfolio::{
    EnrichedBondRecord, EnrichedCdsRecord, MaturityDistribution, MetricsByTicker,
    PortfolioAggregates, PortfolioSummary,
};
use serde::Serialize;

use crate::fetch::FetchReport;

/// Everything one run produces.
///
/// Identifiers that failed to fetch are listed in `fetch.failures` and are
/// absent from `metrics` and `correlation`; their positions still appear in
/// the enriched tables with empty market fields.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Per-identifier fetch results.
    pub fetch: FetchReport,

    /// Metrics for every identifier with history.
    pub metrics: MetricsByTicker,

    /// Return correlation across identifiers with history.
    pub correlation: CorrelationMatrix,

    /// Value-weighted bond aggregates and CDS totals.
    pub aggregates: PortfolioAggregates,

    /// Reference-data summary.
    pub summary: PortfolioSummary,

    /// Bond maturity profile.
    pub maturity: MaturityDistribution,

    /// Bonds joined with issuer metrics.
    pub enriched_bonds: Vec<EnrichedBondRecord>,

    /// CDS joined with reference-entity metrics.
    pub enriched_cds: Vec<EnrichedCdsRecord>,
}

impl RunReport {
    /// Number of identifiers with metrics.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.metrics.len()
    }

    /// Number of identifiers that were requested.
    #[must_use]
    pub fn requested(&self) -> usize {
        self.fetch.requested()
    }

    /// Mean annualized volatility across identifiers that have one.
    #[must_use]
    pub fn average_volatility(&self) -> Option<f64> {
        average_volatility(self.metrics.values())
    }
}
