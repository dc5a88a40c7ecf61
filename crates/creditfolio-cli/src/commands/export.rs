//! Export command implementation.
//!
//! Writes the enriched bond and CDS tables, the correlation matrix and the
//! per-security metrics as CSV files.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use creditfolio_ext_file::CsvExporter;

use crate::cli::OutputFormat;
use crate::commands::run::run_pipeline;
use crate::commands::Context;
use crate::output::{print_json_value, print_success};

/// Arguments for the export command.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output directory, overriding the configuration
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// History lookback such as 2y, 6m, 90d or max
    #[arg(short, long)]
    pub lookback: Option<String>,
}

#[derive(Serialize)]
struct ExportOutput {
    files: Vec<PathBuf>,
    succeeded: usize,
    requested: usize,
}

/// Execute the export command.
pub async fn execute(args: ExportArgs, ctx: &Context) -> Result<()> {
    let report = run_pipeline(ctx, args.lookback.as_deref()).await?;

    let output_dir = args.output_dir.unwrap_or_else(|| ctx.config.output_dir.clone());
    let exporter = CsvExporter::new(&output_dir)?;
    let files = vec![
        exporter.write_bonds(&report.enriched_bonds)?,
        exporter.write_cds(&report.enriched_cds)?,
        exporter.write_correlation(&report.correlation)?,
        exporter.write_metrics(report.metrics.values())?,
    ];
    tracing::info!(dir = %output_dir.display(), files = files.len(), "export complete");

    match ctx.format {
        OutputFormat::Json => print_json_value(&ExportOutput {
            files,
            succeeded: report.succeeded(),
            requested: report.requested(),
        })?,
        OutputFormat::Minimal | OutputFormat::Csv => {
            for file in &files {
                println!("{}", file.display());
            }
        }
        OutputFormat::Table => {
            for file in &files {
                print_success(&format!("Wrote {}", file.display()));
            }
            println!(
                "Metrics for {} of {} identifiers",
                report.succeeded(),
                report.requested()
            );
        }
    }
    Ok(())
}
