#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the county-rank toolchain.
//!
//! `convert` turns the raw upstream downloads into canonical tables;
//! `analyze` ranks counties in those tables by climate risk per housing
//! dollar. Log verbosity is controlled with `RUST_LOG`.

mod thresholds;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use county_rank_analysis_models::AnalysisConfig;
use county_rank_loader::paths;
use county_rank_report::OutputFormat;

use crate::thresholds::ThresholdArgs;

#[derive(Parser)]
#[command(
    name = "county_rank",
    about = "Rank US counties by climate risk per housing dollar"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert raw upstream datasets into the canonical tables
    Convert {
        /// Directory holding the raw files (defaults to `data/orig`)
        #[arg(long)]
        input_dir: Option<PathBuf>,
        /// Directory to write canonical files to (defaults to `data/parsed`)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Filter and rank counties against thresholds
    Analyze {
        /// Directory holding the canonical files (defaults to `data/parsed`)
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// TOML file with threshold values; flags override it
        #[arg(long)]
        config: Option<PathBuf>,
        #[command(flatten)]
        thresholds: ThresholdArgs,
        /// Output format: `table` or `json`
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input_dir,
            output_dir,
        } => {
            let input_dir = input_dir.unwrap_or_else(paths::orig_dir);
            let output_dir = output_dir.unwrap_or_else(paths::parsed_dir);
            log::info!(
                "Converting {} -> {}",
                input_dir.display(),
                output_dir.display()
            );

            let counts = county_rank_ingest::convert_all(&input_dir, &output_dir)?;
            for (file, written) in counts {
                println!("{:<12} {written} rows", file.as_ref());
            }
        }
        Commands::Analyze {
            data_dir,
            config,
            thresholds,
            format,
        } => {
            let data_dir = data_dir.unwrap_or_else(paths::parsed_dir);
            let base = match config {
                Some(path) => county_rank_analysis::config::load_config(&path)?,
                None => AnalysisConfig::default(),
            };
            let config = thresholds.apply(base);

            let report = county_rank_analysis::analyze_dir(&data_dir, &config)?;

            if format == OutputFormat::Table {
                println!(
                    "Analyzed {} counties, {} matched every filter, showing {}",
                    report.analyzed_count,
                    report.summary.matching,
                    report.results.len()
                );
            }
            print!("{}", county_rank_report::render(&report, format)?);
        }
    }

    Ok(())
}
