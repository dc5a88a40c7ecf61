//! Run command implementation.
//!
//! Runs the whole pipeline and prints aggregates plus the enriched books.

use anyhow::Result;
use clap::Args;
use tabled::Tabled;

use creditfolio_engine::RunReport;
use creditfolio_portfolio::{EnrichedBondRecord, EnrichedCdsRecord};

use crate::cli::OutputFormat;
use crate::commands::metrics::report_failures;
use crate::commands::summary::aggregate_rows;
use crate::commands::Context;
use crate::output::{
    format_billions, format_money, format_opt, format_opt_percent, print_csv, print_header,
    print_json_value, print_table, KeyValue,
};

/// Arguments for the run command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// History lookback such as 2y, 6m, 90d or max
    #[arg(short, long)]
    pub lookback: Option<String>,
}

#[derive(Tabled)]
struct BondRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Sector")]
    sector: String,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Coupon")]
    coupon: String,
    #[tabled(rename = "Maturity")]
    maturity: String,
    #[tabled(rename = "Years")]
    years: String,
    #[tabled(rename = "Stock")]
    stock_price: String,
    #[tabled(rename = "Volatility")]
    volatility: String,
    #[tabled(rename = "Market Cap")]
    market_cap: String,
}

impl From<&EnrichedBondRecord> for BondRow {
    fn from(r: &EnrichedBondRecord) -> Self {
        Self {
            ticker: r.ticker.to_string(),
            sector: r.sector.clone(),
            rating: r.rating.to_string(),
            size: format_money(r.position_size),
            coupon: format!("{:.3}%", r.coupon),
            maturity: r.maturity.to_string(),
            years: format!("{:.2}", r.years_to_maturity),
            stock_price: format_opt(r.stock_price, 2),
            volatility: format_opt_percent(r.volatility),
            market_cap: format_billions(r.market_cap),
        }
    }
}

#[derive(Tabled)]
struct CdsRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Notional")]
    notional: String,
    #[tabled(rename = "Tenor")]
    tenor: String,
    #[tabled(rename = "Spread (bps)")]
    spread_bps: String,
    #[tabled(rename = "Recovery")]
    recovery: String,
    #[tabled(rename = "Stock")]
    stock_price: String,
    #[tabled(rename = "Volatility")]
    volatility: String,
}

impl From<&EnrichedCdsRecord> for CdsRow {
    fn from(r: &EnrichedCdsRecord) -> Self {
        Self {
            ticker: r.ticker.to_string(),
            notional: format_money(r.notional),
            tenor: format!("{}Y", r.tenor),
            spread_bps: format!("{:.1}", r.spread_bps),
            recovery: format!("{:.0}%", r.recovery_rate * 100.0),
            stock_price: format_opt(r.stock_price, 2),
            volatility: format_opt_percent(r.volatility),
        }
    }
}

/// Loads the portfolio and runs every stage.
pub(crate) async fn run_pipeline(ctx: &Context, lookback: Option<&str>) -> Result<RunReport> {
    let reference = ctx.load_reference()?;
    let lookback = ctx.lookback(lookback)?;
    let engine = ctx.build_engine()?;

    let report = engine.run(&reference, lookback).await?;
    report_failures(ctx, &report.fetch);
    Ok(report)
}

/// Execute the run command.
pub async fn execute(args: RunArgs, ctx: &Context) -> Result<()> {
    let report = run_pipeline(ctx, args.lookback.as_deref()).await?;

    match ctx.format {
        OutputFormat::Table => {
            let mut results = vec![
                KeyValue::new("Valuation Date", report.summary.valuation_date.to_string()),
                KeyValue::new(
                    "Identifiers Loaded",
                    format!("{} of {}", report.succeeded(), report.requested()),
                ),
                KeyValue::new(
                    "Average Volatility",
                    format_opt_percent(report.average_volatility()),
                ),
            ];
            results.extend(aggregate_rows(&report.aggregates));

            print_header("Run Summary");
            print_table(&results)?;

            print_header("Bond Positions");
            let bonds: Vec<BondRow> = report.enriched_bonds.iter().map(BondRow::from).collect();
            print_table(&bonds)?;

            print_header("CDS Positions");
            let cds: Vec<CdsRow> = report.enriched_cds.iter().map(CdsRow::from).collect();
            print_table(&cds)?;
        }
        OutputFormat::Json => print_json_value(&report)?,
        OutputFormat::Csv => print_csv(&report.enriched_bonds)?,
        OutputFormat::Minimal => {
            println!(
                "succeeded={}/{} rating={} avg_vol={}",
                report.succeeded(),
                report.requested(),
                report.aggregates.weighted_avg_rating_letter,
                format_opt(report.average_volatility(), 4)
            );
        }
    }
    Ok(())
}
