//! Per-identifier fetch results.

use std::collections::BTreeMap;
use std::fmt;

use creditfolio_analytics::PriceSeries;
use creditfolio_core::Ticker;
use creditfolio_traits::Fundamentals;
use serde::Serialize;

/// Why an identifier has no price history for this run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchFailure {
    /// The source returned an error.
    Source {
        /// Source error text.
        error: String,
    },
    /// The fetch did not finish within the per-identifier timeout.
    Timeout {
        /// Timeout that elapsed, in milliseconds.
        after_ms: u64,
    },
    /// The source answered with no usable closes.
    NoData,
    /// The fetch task panicked or was cancelled.
    Aborted {
        /// Join error text.
        error: String,
    },
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source { error } => write!(f, "source error: {error}"),
            Self::Timeout { after_ms } => write!(f, "timed out after {after_ms}ms"),
            Self::NoData => f.write_str("no data available"),
            Self::Aborted { error } => write!(f, "fetch aborted: {error}"),
        }
    }
}

/// Result of fetching one identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// History loaded, with whatever fundamentals the source had.
    Loaded {
        /// Price history.
        series: PriceSeries,
        /// Fundamentals; default when unavailable.
        fundamentals: Fundamentals,
    },
    /// Nothing usable was loaded.
    Failed(FetchFailure),
}

/// Fetch results for every requested identifier, split into the loaded
/// series and the failures.
///
/// Each identifier appears in exactly one of the two maps.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FetchReport {
    /// Loaded price histories.
    #[serde(skip)]
    pub series: BTreeMap<Ticker, PriceSeries>,

    /// Fundamentals for loaded identifiers.
    pub fundamentals: BTreeMap<Ticker, Fundamentals>,

    /// Identifiers with no history, and why.
    pub failures: BTreeMap<Ticker, FetchFailure>,
}

impl FetchReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome for one identifier.
    pub fn record(&mut self, ticker: Ticker, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Loaded {
                series,
                fundamentals,
            } => {
                self.failures.remove(&ticker);
                self.fundamentals.insert(ticker.clone(), fundamentals);
                self.series.insert(ticker, series);
            }
            FetchOutcome::Failed(failure) => {
                self.series.remove(&ticker);
                self.fundamentals.remove(&ticker);
                self.failures.insert(ticker, failure);
            }
        }
    }

    /// Number of identifiers with a loaded history.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.series.len()
    }

    /// Number of identifiers that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Number of identifiers requested.
    #[must_use]
    pub fn requested(&self) -> usize {
        self.succeeded() + self.failed()
    }
}
