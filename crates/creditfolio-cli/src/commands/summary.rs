//! Summary command implementation.
//!
//! Reports on the portfolio from reference data alone; no prices are read.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use creditfolio_portfolio::{
    bucket_by_maturity, compute_portfolio_aggregates, highest_risk_cds, BucketExposure,
    CdsPosition, MaturityDistribution, PortfolioAggregates, PortfolioSummary,
};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{format_money, format_opt, print_header, print_output, print_table, KeyValue};

/// Arguments for the summary command.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Number of CDS names in the highest-risk list
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Serialize)]
struct SummaryOutput<'a> {
    summary: &'a PortfolioSummary,
    aggregates: Option<&'a PortfolioAggregates>,
    maturity: &'a MaturityDistribution,
    highest_risk_cds: Vec<&'a CdsPosition>,
}

#[derive(Serialize, Tabled)]
pub(crate) struct ExposureRow {
    #[tabled(rename = "Bucket")]
    pub bucket: String,
    #[tabled(rename = "Bonds")]
    pub count: usize,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Weight")]
    pub weight: String,
}

impl ExposureRow {
    pub(crate) fn new(bucket: impl ToString, exposure: &BucketExposure) -> Self {
        Self {
            bucket: bucket.to_string(),
            count: exposure.count,
            value: format_money(exposure.value),
            weight: format!("{:.2}%", exposure.weight_pct),
        }
    }
}

#[derive(Serialize, Tabled)]
struct MaturityRow {
    #[tabled(rename = "Bucket")]
    bucket: String,
    #[tabled(rename = "Bonds")]
    count: usize,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Cumulative")]
    cumulative: String,
}

#[derive(Serialize, Tabled)]
struct RiskRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Company")]
    company: String,
    #[tabled(rename = "Spread (bps)")]
    spread_bps: String,
    #[tabled(rename = "Notional")]
    notional: String,
    #[tabled(rename = "Recovery")]
    recovery: String,
}

/// Key figures shared with the run command.
pub(crate) fn aggregate_rows(aggregates: &PortfolioAggregates) -> Vec<KeyValue> {
    vec![
        KeyValue::new("Total Bond Value", format_money(aggregates.total_bond_value)),
        KeyValue::new("Total CDS Notional", format_money(aggregates.total_cds_notional)),
        KeyValue::new(
            "Weighted Avg Coupon",
            format!("{:.2}%", aggregates.weighted_avg_coupon),
        ),
        KeyValue::new(
            "Weighted Avg Maturity",
            format!("{:.2} years", aggregates.weighted_avg_maturity),
        ),
        KeyValue::new(
            "Weighted Avg Rating",
            format!(
                "{} ({:.2})",
                aggregates.weighted_avg_rating_letter, aggregates.weighted_avg_rating
            ),
        ),
    ]
}

/// Execute the summary command.
pub fn execute(args: SummaryArgs, ctx: &Context) -> Result<()> {
    let reference = ctx.load_reference()?;
    let top = args.top.unwrap_or(ctx.config.top_risk_count);

    let summary = PortfolioSummary::calculate(&reference, &ctx.scale);
    let aggregates = match compute_portfolio_aggregates(
        reference.bonds(),
        reference.cds(),
        reference.valuation_date(),
        &ctx.scale,
    ) {
        Ok(aggregates) => Some(aggregates),
        Err(e) => {
            ctx.warn(&format!("No weighted averages: {e}"));
            None
        }
    };
    let maturity = bucket_by_maturity(reference.bonds(), reference.valuation_date());
    let risky = highest_risk_cds(reference.cds(), top);

    let mut results = vec![
        KeyValue::new("Valuation Date", summary.valuation_date.to_string()),
        KeyValue::new(
            "Risk-Free Rate",
            format!("{:.2}%", summary.risk_free_rate * 100.0),
        ),
        KeyValue::new("Bonds", summary.num_bonds.to_string()),
        KeyValue::new("CDS Contracts", summary.num_cds.to_string()),
        KeyValue::new("Total Exposure", format_money(summary.total_exposure)),
    ];
    if let Some(aggregates) = &aggregates {
        results.extend(aggregate_rows(aggregates));
    }
    results.push(KeyValue::new(
        "Average Coupon",
        format_opt(summary.avg_coupon, 2),
    ));
    results.push(KeyValue::new(
        "Average CDS Spread (bps)",
        format_opt(summary.avg_cds_spread_bps, 1),
    ));
    results.push(KeyValue::new(
        "Average Rating",
        format!(
            "{} ({})",
            summary.avg_rating_letter,
            format_opt(summary.avg_rating_numeric, 2)
        ),
    ));

    match ctx.format {
        OutputFormat::Table => {
            print_header("Portfolio Summary");
            print_table(&results)?;

            print_header("Exposure by Sector");
            let sectors: Vec<ExposureRow> = summary
                .by_sector
                .iter()
                .map(|(sector, e)| ExposureRow::new(sector, e))
                .collect();
            print_table(&sectors)?;

            print_header("Exposure by Rating");
            let ratings: Vec<ExposureRow> = summary
                .by_rating
                .iter()
                .map(|(rating, e)| ExposureRow::new(rating, e))
                .collect();
            print_table(&ratings)?;

            print_header("Maturity Profile");
            let buckets: Vec<MaturityRow> = maturity
                .all_buckets()
                .into_iter()
                .map(|(bucket, e)| MaturityRow {
                    bucket: bucket.to_string(),
                    count: e.count,
                    value: format_money(e.value),
                    weight: format!("{:.2}%", e.weight_pct),
                    cumulative: format!("{:.2}%", maturity.cumulative_weight(bucket)),
                })
                .collect();
            print_table(&buckets)?;

            print_header("Highest-Risk CDS");
            let rows: Vec<RiskRow> = risky
                .iter()
                .map(|c| RiskRow {
                    ticker: c.ticker.to_string(),
                    company: c.company.clone(),
                    spread_bps: format!("{:.1}", c.spread_bps),
                    notional: format_money(c.notional),
                    recovery: format!("{:.0}%", c.recovery_rate * 100.0),
                })
                .collect();
            print_table(&rows)?;
        }
        OutputFormat::Json => {
            let output = SummaryOutput {
                summary: &summary,
                aggregates: aggregates.as_ref(),
                maturity: &maturity,
                highest_risk_cds: risky,
            };
            crate::output::print_json_value(&output)?;
        }
        OutputFormat::Csv => {
            print_output(&results, ctx.format)?;
        }
        OutputFormat::Minimal => {
            println!(
                "bonds={} cds={} exposure={} rating={}",
                summary.num_bonds,
                summary.num_cds,
                summary.total_exposure,
                aggregates
                    .as_ref()
                    .map_or(summary.avg_rating_letter.as_str(), |a| {
                        a.weighted_avg_rating_letter.as_str()
                    })
            );
        }
    }

    Ok(())
}
