//! Metrics command implementation.
//!
//! Fetches price histories and prints per-security statistics.

use std::collections::BTreeMap;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use creditfolio_analytics::{average_volatility, SecurityMetrics};
use creditfolio_core::Ticker;
use creditfolio_engine::{FetchFailure, FetchReport};
use creditfolio_portfolio::MetricsByTicker;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{
    format_billions, format_opt, format_opt_percent, print_csv, print_header, print_json_value,
    print_table,
};

/// Arguments for the metrics command.
#[derive(Args, Debug)]
pub struct MetricsArgs {
    /// History lookback such as 2y, 6m, 90d or max
    #[arg(short, long)]
    pub lookback: Option<String>,
}

#[derive(Tabled)]
struct MetricsRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Volatility")]
    volatility: String,
    #[tabled(rename = "Market Cap")]
    market_cap: String,
    #[tabled(rename = "52W High")]
    high: String,
    #[tabled(rename = "52W Low")]
    low: String,
    #[tabled(rename = "1M")]
    change_1m: String,
    #[tabled(rename = "3M")]
    change_3m: String,
    #[tabled(rename = "1Y")]
    change_1y: String,
}

impl From<&SecurityMetrics> for MetricsRow {
    fn from(m: &SecurityMetrics) -> Self {
        Self {
            ticker: m.ticker.to_string(),
            price: format_opt(m.current_price, 2),
            volatility: format_opt_percent(m.annual_volatility),
            market_cap: format_billions(m.market_cap),
            high: format_opt(m.high_52w, 2),
            low: format_opt(m.low_52w, 2),
            change_1m: format_opt_percent(m.price_change_1m),
            change_3m: format_opt_percent(m.price_change_3m),
            change_1y: format_opt_percent(m.price_change_1y),
        }
    }
}

#[derive(Serialize)]
struct MetricsOutput<'a> {
    metrics: Vec<&'a SecurityMetrics>,
    failures: &'a BTreeMap<Ticker, FetchFailure>,
    average_volatility: Option<f64>,
}

/// Reports every identifier that could not be loaded.
pub(crate) fn report_failures(ctx: &Context, fetch: &FetchReport) {
    for (ticker, failure) in &fetch.failures {
        ctx.warn(&format!("{ticker}: {failure}"));
    }
}

fn print_metrics(
    ctx: &Context,
    metrics: &MetricsByTicker,
    fetch: &FetchReport,
) -> Result<()> {
    let avg_vol = average_volatility(metrics.values());
    match ctx.format {
        OutputFormat::Table => {
            print_header("Security Metrics");
            let rows: Vec<MetricsRow> = metrics.values().map(MetricsRow::from).collect();
            print_table(&rows)?;
            println!(
                "Loaded {} of {} identifiers; average volatility {}",
                fetch.succeeded(),
                fetch.requested(),
                match avg_vol {
                    Some(v) => format!("{:.2}%", v * 100.0),
                    None => "n/a".to_string(),
                }
            );
        }
        OutputFormat::Json => {
            print_json_value(&MetricsOutput {
                metrics: metrics.values().collect(),
                failures: &fetch.failures,
                average_volatility: avg_vol,
            })?;
        }
        OutputFormat::Csv => {
            let rows: Vec<&SecurityMetrics> = metrics.values().collect();
            print_csv(&rows)?;
        }
        OutputFormat::Minimal => {
            println!(
                "loaded={}/{} avg_vol={}",
                fetch.succeeded(),
                fetch.requested(),
                format_opt(avg_vol, 4)
            );
        }
    }
    Ok(())
}

/// Execute the metrics command.
pub async fn execute(args: MetricsArgs, ctx: &Context) -> Result<()> {
    let reference = ctx.load_reference()?;
    let lookback = ctx.lookback(args.lookback.as_deref())?;
    let engine = ctx.build_engine()?;

    let fetch = engine.fetch_all(&reference.tickers(), lookback).await;
    let metrics = engine.compute_metrics(&fetch);

    report_failures(ctx, &fetch);
    print_metrics(ctx, &metrics, &fetch)
}
