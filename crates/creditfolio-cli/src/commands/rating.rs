//! Rating command implementation.
//!
//! Looks up a letter's score, the nearest letter for a score, or prints the
//! whole scale.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use creditfolio_core::{RatingScale, DEFAULT_TOLERANCE};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::error::CliError;
use crate::output::{print_header, print_output};

/// Arguments for the rating command.
#[derive(Args, Debug)]
pub struct RatingArgs {
    /// Rating letter (e.g. BBB-) or numeric score (e.g. 7.3); omit to list the scale
    pub value: Option<String>,

    /// Maximum distance from a score to the nearest letter
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
struct RatingRow {
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Score")]
    score: String,
}

fn lookup(scale: &RatingScale, value: &str, tolerance: f64) -> Result<RatingRow, CliError> {
    let value = value.trim();
    if let Ok(numeric) = value.parse::<f64>() {
        if !numeric.is_finite() {
            return Err(CliError::InvalidRating(value.to_string()));
        }
        return Ok(RatingRow {
            rating: scale.letter_for(numeric, tolerance).to_string(),
            score: value.to_string(),
        });
    }

    let letter = value.to_ascii_uppercase();
    let score = scale
        .numeric_for(&letter)
        .map_err(|_| CliError::InvalidRating(value.to_string()))?;
    Ok(RatingRow {
        rating: letter,
        score: score.to_string(),
    })
}

/// Execute the rating command.
pub fn execute(args: RatingArgs, ctx: &Context) -> Result<()> {
    let rows = match &args.value {
        Some(value) => vec![lookup(&ctx.scale, value, args.tolerance)?],
        None => ctx
            .scale
            .entries()
            .map(|(rating, score)| RatingRow {
                rating: rating.to_string(),
                score: score.to_string(),
            })
            .collect(),
    };

    match ctx.format {
        OutputFormat::Minimal => {
            for row in &rows {
                match &args.value {
                    Some(value) if value.trim().parse::<f64>().is_ok() => println!("{}", row.rating),
                    Some(_) => println!("{}", row.score),
                    None => println!("{} {}", row.rating, row.score),
                }
            }
        }
        OutputFormat::Table => {
            print_header("Rating Scale");
            print_output(&rows, ctx.format)?;
        }
        OutputFormat::Json | OutputFormat::Csv => print_output(&rows, ctx.format)?,
    }
    Ok(())
}
