//! CLI command implementations.

pub mod correlation;
pub mod export;
pub mod metrics;
pub mod rating;
pub mod run;
pub mod summary;

// Re-export submodules for convenience
pub use correlation::CorrelationArgs;
pub use export::ExportArgs;
pub use metrics::MetricsArgs;
pub use rating::RatingArgs;
pub use run::RunArgs;
pub use summary::SummaryArgs;

use std::sync::Arc;

use anyhow::{Context as _, Result};
use tracing::{debug, info};

use creditfolio_core::{Date, RatingScale};
use creditfolio_engine::AnalyticsEngine;
use creditfolio_ext_file::{load_reference_data, CsvPriceHistorySource};
use creditfolio_portfolio::ReferenceData;
use creditfolio_traits::LookbackPeriod;

use crate::cli::{Cli, OutputFormat};
use crate::config::RunConfig;
use crate::error::{CliError, CliResult};
use crate::output::print_warning;

/// Settings shared by every command.
pub struct Context {
    pub config: RunConfig,
    pub format: OutputFormat,
    pub quiet: bool,
    pub valuation_date: Option<Date>,
    pub scale: RatingScale,
}

impl Context {
    /// Resolves the configuration file and command-line overrides.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => {
                info!(path = %path.display(), "loading configuration");
                RunConfig::from_file(path)?
            }
            None => RunConfig::default(),
        };
        if let Some(path) = &cli.portfolio {
            config.reference_data = path.clone();
        }
        if let Some(path) = &cli.prices {
            config.price_history = path.clone();
        }

        let valuation_date = cli.valuation_date.as_deref().map(parse_date).transpose()?;

        Ok(Self {
            config,
            format: cli.format,
            quiet: cli.quiet,
            valuation_date,
            scale: RatingScale::standard(),
        })
    }

    /// Loads the portfolio, applying any valuation date override.
    pub fn load_reference(&self) -> Result<ReferenceData> {
        let path = &self.config.reference_data;
        let reference = load_reference_data(path, &self.scale)
            .with_context(|| format!("loading portfolio from {}", path.display()))?;
        debug!(
            bonds = reference.bonds().len(),
            cds = reference.cds().len(),
            "portfolio loaded"
        );
        Ok(match self.valuation_date {
            Some(date) => reference.with_valuation_date(date),
            None => reference,
        })
    }

    /// Builds the engine over the configured price files.
    pub fn build_engine(&self) -> Result<AnalyticsEngine> {
        let mut source = CsvPriceHistorySource::new(&self.config.price_history)
            .with_context(|| format!("loading prices from {}", self.config.price_history.display()))?;
        if let Some(path) = &self.config.fundamentals {
            source = source
                .with_fundamentals(path)
                .with_context(|| format!("loading fundamentals from {}", path.display()))?;
        }

        let engine = AnalyticsEngine::builder()
            .with_source(Arc::new(source))
            .with_metrics_config(self.config.metrics_config())
            .with_rating_scale(self.scale.clone())
            .with_fetch_timeout(self.config.fetch_timeout())
            .with_max_concurrency(self.config.max_concurrent_fetches)
            .build()?;
        Ok(engine)
    }

    /// Lookback from the command line, else from the configuration.
    pub fn lookback(&self, arg: Option<&str>) -> Result<LookbackPeriod> {
        match arg {
            Some(text) => Ok(text.parse()?),
            None => Ok(self.config.lookback),
        }
    }

    /// Prints a warning unless quiet.
    pub fn warn(&self, message: &str) {
        if !self.quiet {
            print_warning(message);
        }
    }
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2025-01-17").unwrap(), Date::from_ymd(2025, 1, 17).unwrap());
        assert!(matches!(parse_date("17/01/2025"), Err(CliError::InvalidDate(_))));
    }
}
