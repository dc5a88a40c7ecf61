//! File-based price history and fundamentals.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;

use creditfolio_analytics::PricePoint;
use creditfolio_core::{Date, Ticker};
use creditfolio_traits::error::TraitError;
use creditfolio_traits::lookback::LookbackPeriod;
use creditfolio_traits::market_data::*;

// =============================================================================
// CSV PRICE HISTORY SOURCE
// =============================================================================

/// CSV record for daily closes.
#[derive(Debug, Deserialize)]
struct PriceRecord {
    ticker: String,
    date: String,
    close: Option<f64>,
}

/// CSV record for fundamentals.
#[derive(Debug, Deserialize)]
struct FundamentalsRecord {
    ticker: String,
    market_cap: Option<f64>,
}

/// CSV-backed price history.
///
/// Price file columns: `ticker,date,close` (dates `YYYY-MM-DD`, any row
/// order). Rows with an empty close are skipped. A lookback window ends at
/// the latest date anywhere in the file, so every identifier is cut at the
/// same point in time.
///
/// An optional fundamentals file has columns `ticker,market_cap`; an empty
/// `market_cap` cell means the value is unknown.
///
/// A missing file yields an empty source.
pub struct CsvPriceHistorySource {
    file_path: PathBuf,
    fundamentals_path: Option<PathBuf>,
    histories: DashMap<Ticker, Vec<PricePoint>>,
    fundamentals: DashMap<Ticker, Fundamentals>,
}

impl CsvPriceHistorySource {
    /// Create a new CSV price history source.
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self, TraitError> {
        let source = Self {
            file_path: file_path.as_ref().to_path_buf(),
            fundamentals_path: None,
            histories: DashMap::new(),
            fundamentals: DashMap::new(),
        };
        source.reload()?;
        Ok(source)
    }

    /// Attach a fundamentals file.
    pub fn with_fundamentals(mut self, file_path: impl AsRef<Path>) -> Result<Self, TraitError> {
        self.fundamentals_path = Some(file_path.as_ref().to_path_buf());
        self.reload_fundamentals()?;
        Ok(self)
    }

    /// Reload closes from file.
    pub fn reload(&self) -> Result<(), TraitError> {
        self.histories.clear();
        if !self.file_path.exists() {
            log::warn!("price file {} not found", self.file_path.display());
            return Ok(()); // Empty source
        }

        let mut reader = csv::Reader::from_path(&self.file_path)
            .map_err(|e| TraitError::IoError(e.to_string()))?;

        let mut rows = 0usize;
        for result in reader.deserialize() {
            let record: PriceRecord = result.map_err(|e| TraitError::ParseError(e.to_string()))?;
            let Some(close) = record.close else {
                continue;
            };
            let date = Date::parse(&record.date)
                .map_err(|e| TraitError::ParseError(format!("{}: {e}", record.ticker)))?;
            let ticker = Ticker::parse(&record.ticker)
                .map_err(|e| TraitError::ParseError(e.to_string()))?;

            self.histories
                .entry(ticker)
                .or_default()
                .push(PricePoint::new(date, close));
            rows += 1;
        }

        for mut history in self.histories.iter_mut() {
            history.sort_by_key(|p| p.date);
        }

        log::debug!(
            "loaded {rows} closes for {} identifiers from {}",
            self.histories.len(),
            self.file_path.display()
        );
        Ok(())
    }

    /// Reload fundamentals from file, if one is attached.
    pub fn reload_fundamentals(&self) -> Result<(), TraitError> {
        self.fundamentals.clear();
        let Some(path) = &self.fundamentals_path else {
            return Ok(());
        };
        if !path.exists() {
            log::warn!("fundamentals file {} not found", path.display());
            return Ok(());
        }

        let mut reader =
            csv::Reader::from_path(path).map_err(|e| TraitError::IoError(e.to_string()))?;

        for result in reader.deserialize() {
            let record: FundamentalsRecord =
                result.map_err(|e| TraitError::ParseError(e.to_string()))?;
            let ticker = Ticker::parse(&record.ticker)
                .map_err(|e| TraitError::ParseError(e.to_string()))?;
            self.fundamentals.insert(
                ticker,
                Fundamentals {
                    market_cap: record.market_cap.filter(|v| v.is_finite()),
                },
            );
        }

        Ok(())
    }

    /// Identifiers with at least one close.
    pub fn tickers(&self) -> Vec<Ticker> {
        let mut tickers: Vec<Ticker> = self.histories.iter().map(|e| e.key().clone()).collect();
        tickers.sort();
        tickers
    }

    /// Latest close date across the whole file.
    pub fn latest_date(&self) -> Option<Date> {
        self.histories
            .iter()
            .filter_map(|e| e.value().last().map(|p| p.date))
            .max()
    }
}

#[async_trait]
impl PriceHistorySource for CsvPriceHistorySource {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    async fn get_history(
        &self,
        ticker: &Ticker,
        lookback: LookbackPeriod,
    ) -> Result<Vec<PricePoint>, TraitError> {
        let Some(end) = self.latest_date() else {
            return Ok(Vec::new());
        };
        Ok(self
            .histories
            .get(ticker)
            .map(|history| {
                history
                    .iter()
                    .filter(|p| lookback.contains(p.date, end))
                    .copied()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get_fundamentals(&self, ticker: &Ticker) -> Result<Fundamentals, TraitError> {
        Ok(self
            .fundamentals
            .get(ticker)
            .map(|f| *f)
            .unwrap_or_default())
    }
}
