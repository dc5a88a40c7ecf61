//! Correlation command implementation.

use anyhow::Result;
use clap::Args;

use creditfolio_analytics::{compute_correlation_matrix, CorrelationMatrix};

use crate::cli::OutputFormat;
use crate::commands::metrics::report_failures;
use crate::commands::Context;
use crate::output::{format_opt, print_grid, print_header, print_json_value};

/// Arguments for the correlation command.
#[derive(Args, Debug)]
pub struct CorrelationArgs {
    /// History lookback such as 2y, 6m, 90d or max
    #[arg(short, long)]
    pub lookback: Option<String>,

    /// Decimal places in table output
    #[arg(long, default_value = "2")]
    pub precision: usize,
}

/// Execute the correlation command.
pub async fn execute(args: CorrelationArgs, ctx: &Context) -> Result<()> {
    let reference = ctx.load_reference()?;
    let lookback = ctx.lookback(args.lookback.as_deref())?;
    let engine = ctx.build_engine()?;

    let fetch = engine.fetch_all(&reference.tickers(), lookback).await;
    report_failures(ctx, &fetch);
    let matrix = compute_correlation_matrix(&fetch.series);

    match ctx.format {
        OutputFormat::Table => {
            print_header("Return Correlation");
            let (header, rows) = grid(&matrix, |c| format_opt(c, args.precision));
            print_grid(header, rows);
        }
        OutputFormat::Json => print_json_value(&matrix)?,
        OutputFormat::Csv => {
            let (header, rows) = grid(&matrix, |c| c.map(|v| v.to_string()).unwrap_or_default());
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(&header)?;
            for row in rows {
                wtr.write_record(&row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Minimal => {
            let n = matrix.len();
            let defined = (0..n)
                .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
                .filter(|&(i, j)| matrix.cell(i, j).is_some())
                .count();
            println!("identifiers={n} defined_pairs={defined}");
        }
    }
    Ok(())
}

/// Header row and one labelled row per identifier.
fn grid(
    matrix: &CorrelationMatrix,
    cell: impl Fn(Option<f64>) -> String,
) -> (Vec<String>, Vec<Vec<String>>) {
    let header = std::iter::once(String::new())
        .chain(matrix.tickers().iter().map(ToString::to_string))
        .collect();
    let rows = matrix
        .tickers()
        .iter()
        .enumerate()
        .map(|(i, ticker)| {
            std::iter::once(ticker.to_string())
                .chain(matrix.row(i).iter().map(|c| cell(*c)))
                .collect()
        })
        .collect();
    (header, rows)
}
