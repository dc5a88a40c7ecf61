//! CSV export of run results.
//!
//! Undefined values are written as empty cells, never zero.

use std::fs;
use std::path::{Path, PathBuf};

use creditfolio_analytics::{CorrelationMatrix, SecurityMetrics};
use creditfolio_portfolio::{EnrichedBondRecord, EnrichedCdsRecord};
use serde::Serialize;

use crate::error::{FileError, FileResult};

/// Enriched bond table file name.
pub const BOND_FILE: &str = "bond_portfolio.csv";

/// Enriched CDS table file name.
pub const CDS_FILE: &str = "cds_portfolio.csv";

/// Correlation matrix file name.
pub const CORRELATION_FILE: &str = "correlation_matrix.csv";

/// Per-security metrics file name.
pub const METRICS_FILE: &str = "financial_metrics.csv";

/// Writes export tables into one directory.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_dir: PathBuf,
}

impl CsvExporter {
    /// Creates an exporter, creating `output_dir` if needed.
    pub fn new(output_dir: impl AsRef<Path>) -> FileResult<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir).map_err(|e| FileError::io(&output_dir, e))?;
        Ok(Self { output_dir })
    }

    /// Directory files are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes the enriched bond table.
    pub fn write_bonds(&self, records: &[EnrichedBondRecord]) -> FileResult<PathBuf> {
        self.write_rows(BOND_FILE, records)
    }

    /// Writes the enriched CDS table.
    pub fn write_cds(&self, records: &[EnrichedCdsRecord]) -> FileResult<PathBuf> {
        self.write_rows(CDS_FILE, records)
    }

    /// Writes the per-security metrics table.
    pub fn write_metrics<'a>(
        &self,
        metrics: impl IntoIterator<Item = &'a SecurityMetrics>,
    ) -> FileResult<PathBuf> {
        let rows: Vec<&SecurityMetrics> = metrics.into_iter().collect();
        self.write_rows(METRICS_FILE, &rows)
    }

    /// Writes the correlation matrix with identifiers as header row and
    /// first column.
    pub fn write_correlation(&self, matrix: &CorrelationMatrix) -> FileResult<PathBuf> {
        let path = self.output_dir.join(CORRELATION_FILE);
        let mut writer = csv::Writer::from_path(&path).map_err(|e| FileError::io(&path, e))?;

        let header = std::iter::once(String::new())
            .chain(matrix.tickers().iter().map(ToString::to_string));
        writer
            .write_record(header)
            .map_err(|e| FileError::io(&path, e))?;

        for (i, ticker) in matrix.tickers().iter().enumerate() {
            let cells = matrix
                .row(i)
                .iter()
                .map(|c| c.map(|v| v.to_string()).unwrap_or_default());
            let record = std::iter::once(ticker.to_string()).chain(cells);
            writer
                .write_record(record)
                .map_err(|e| FileError::io(&path, e))?;
        }

        writer.flush().map_err(|e| FileError::io(&path, e))?;
        log::debug!("wrote {}", path.display());
        Ok(path)
    }

    fn write_rows<T: Serialize>(&self, name: &str, rows: &[T]) -> FileResult<PathBuf> {
        let path = self.output_dir.join(name);
        let mut writer = csv::Writer::from_path(&path).map_err(|e| FileError::io(&path, e))?;
        for row in rows {
            writer.serialize(row).map_err(|e| FileError::io(&path, e))?;
        }
        writer.flush().map_err(|e| FileError::io(&path, e))?;
        log::debug!("wrote {} rows to {}", rows.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use creditfolio_analytics::{compute_correlation_matrix, PriceSeries};
    use creditfolio_core::{Date, Ticker};

    fn series(ticker: &str, closes: &[f64]) -> (Ticker, PriceSeries) {
        let start = Date::from_ymd(2024, 1, 2).unwrap();
        (
            Ticker::from(ticker),
            PriceSeries::from_closes(Ticker::from(ticker), start, closes),
        )
    }

    #[test]
    fn test_correlation_layout() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path().join("out")).unwrap();

        let map: BTreeMap<Ticker, PriceSeries> = [
            series("A", &[1.0, 2.0, 1.5, 3.0]),
            series("B", &[5.0]),
        ]
        .into_iter()
        .collect();
        let path = exporter
            .write_correlation(&compute_correlation_matrix(&map))
            .unwrap();

        let text = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], ",A,B");
        assert_eq!(lines[1], "A,1,");
        assert_eq!(lines[2], "B,,");
    }
}
