//! Run configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use creditfolio_analytics::MetricsConfig;
use creditfolio_traits::LookbackPeriod;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// Run configuration.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Portfolio TOML file
    #[serde(default = "default_reference_data")]
    pub reference_data: PathBuf,

    /// Price history CSV (`ticker,date,close`)
    #[serde(default = "default_price_history")]
    pub price_history: PathBuf,

    /// Fundamentals CSV (`ticker,market_cap`)
    pub fundamentals: Option<PathBuf>,

    /// History lookback
    #[serde(default)]
    pub lookback: LookbackPeriod,

    /// Trailing window for the 52-week high and low
    #[serde(default = "default_trading_days")]
    pub window: usize,

    /// Trading days used to annualize volatility
    #[serde(default = "default_trading_days_u32")]
    pub trading_days_per_year: u32,

    /// Per-identifier fetch timeout in milliseconds
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// Maximum concurrent fetches
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,

    /// Export directory
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Names in the highest-risk CDS list
    #[serde(default = "default_top_risk_count")]
    pub top_risk_count: usize,
}

fn default_reference_data() -> PathBuf {
    PathBuf::from("data/portfolio.toml")
}

fn default_price_history() -> PathBuf {
    PathBuf::from("data/prices.csv")
}

fn default_trading_days() -> usize {
    252
}

fn default_trading_days_u32() -> u32 {
    252
}

fn default_fetch_timeout_ms() -> u64 {
    5_000
}

fn default_max_concurrent_fetches() -> usize {
    8
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data/out")
}

fn default_top_risk_count() -> usize {
    3
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            reference_data: default_reference_data(),
            price_history: default_price_history(),
            fundamentals: None,
            lookback: LookbackPeriod::default(),
            window: default_trading_days(),
            trading_days_per_year: default_trading_days_u32(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
            output_dir: default_output_dir(),
            top_risk_count: default_top_risk_count(),
        }
    }
}

impl RunConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> CliResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> CliResult<Self> {
        toml::from_str(content).map_err(|e| CliError::Config(e.to_string()))
    }

    /// Metrics parameters.
    pub fn metrics_config(&self) -> MetricsConfig {
        MetricsConfig::new()
            .with_window(self.window)
            .with_trading_days_per_year(self.trading_days_per_year)
    }

    /// Per-identifier fetch timeout.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}
