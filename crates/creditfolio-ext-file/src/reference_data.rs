//! TOML reference data loading.
//!
//! ```toml
//! [market]
//! valuation_date = "2025-01-17"
//! risk_free_rate = 0.0425
//!
//! [[bonds]]
//! ticker = "TSLA"
//! company = "Tesla Inc"
//! sector = "Tech/TMT"
//! position_size = 5000000
//! coupon = 5.30
//! maturity = "2028-08-15"
//! rating = "BB+"
//! rating_numeric = 7      # optional, checked against the scale
//! issue_price = 100.0     # optional, defaults to par
//! current_price = 98.5
//!
//! [[cds]]
//! ticker = "TSLA"
//! company = "Tesla Inc"
//! notional = 5000000
//! tenor = 5
//! spread_bps = 280
//! recovery_rate = 0.40
//! contract_date = "2025-01-17"
//! ```

use std::path::Path;

use creditfolio_core::{CreditRating, Date, RatingScale, Ticker};
use creditfolio_portfolio::{BondPosition, CdsPosition, PortfolioError, ReferenceData};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{FileError, FileResult};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReferenceFile {
    market: MarketSection,
    #[serde(default)]
    bonds: Vec<BondRecord>,
    #[serde(default)]
    cds: Vec<CdsRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MarketSection {
    valuation_date: String,
    #[serde(default)]
    risk_free_rate: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BondRecord {
    ticker: String,
    company: Option<String>,
    sector: Option<String>,
    position_size: Decimal,
    coupon: f64,
    maturity: String,
    rating: String,
    rating_numeric: Option<u8>,
    issue_price: Option<Decimal>,
    current_price: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CdsRecord {
    ticker: String,
    company: Option<String>,
    notional: Decimal,
    tenor: Option<f64>,
    spread_bps: f64,
    recovery_rate: f64,
    contract_date: String,
}

/// Loads and validates a reference data file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if any
/// position fails validation against `scale`.
pub fn load_reference_data(path: impl AsRef<Path>, scale: &RatingScale) -> FileResult<ReferenceData> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| FileError::io(path, e))?;
    let data = parse_reference_data(&content, scale).map_err(|e| match e {
        FileError::Parse { message, .. } => FileError::parse(path, message),
        other => other,
    })?;

    log::info!(
        "loaded {} bonds and {} CDS from {}",
        data.bonds().len(),
        data.cds().len(),
        path.display()
    );
    Ok(data)
}

/// Parses reference data from TOML text.
///
/// # Errors
///
/// Returns an error if the text is not valid reference data TOML or a
/// position fails validation.
pub fn parse_reference_data(content: &str, scale: &RatingScale) -> FileResult<ReferenceData> {
    let file: ReferenceFile =
        toml::from_str(content).map_err(|e| FileError::parse(Path::new("<input>"), e))?;

    let valuation_date = Date::parse(&file.market.valuation_date).map_err(PortfolioError::from)?;

    let bonds = file
        .bonds
        .into_iter()
        .map(|r| bond_from_record(r, scale))
        .collect::<Result<Vec<_>, PortfolioError>>()?;

    let cds = file
        .cds
        .into_iter()
        .map(cds_from_record)
        .collect::<Result<Vec<_>, PortfolioError>>()?;

    Ok(ReferenceData::builder()
        .valuation_date(valuation_date)
        .risk_free_rate(file.market.risk_free_rate)
        .add_bonds(bonds)
        .add_cds_positions(cds)
        .build()?)
}

fn bond_from_record(record: BondRecord, scale: &RatingScale) -> Result<BondPosition, PortfolioError> {
    let rating: CreditRating = record.rating.parse()?;

    let mut builder = BondPosition::builder()
        .ticker(Ticker::parse(&record.ticker)?)
        .position_size(record.position_size)
        .coupon(record.coupon)
        .maturity(Date::parse(&record.maturity)?)
        .rating(rating)
        .current_price(record.current_price);

    if let Some(company) = record.company {
        builder = builder.company(company);
    }
    if let Some(sector) = record.sector {
        builder = builder.sector(sector);
    }
    if let Some(numeric) = record.rating_numeric {
        builder = builder.rating_numeric(numeric);
    }
    if let Some(price) = record.issue_price {
        builder = builder.issue_price(price);
    }

    builder.build(scale)
}

fn cds_from_record(record: CdsRecord) -> Result<CdsPosition, PortfolioError> {
    let mut builder = CdsPosition::builder()
        .ticker(Ticker::parse(&record.ticker)?)
        .notional(record.notional)
        .spread_bps(record.spread_bps)
        .recovery_rate(record.recovery_rate)
        .contract_date(Date::parse(&record.contract_date)?);

    if let Some(company) = record.company {
        builder = builder.company(company);
    }
    if let Some(tenor) = record.tenor {
        builder = builder.tenor(tenor);
    }

    builder.build()
}
