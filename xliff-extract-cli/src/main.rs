mod report;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use xliff_extract::{Aggregation, Aggregator};

use crate::report::ConsoleReporter;

/// Parse XLIFF translation files into an intermediate JSON document.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory which contains the raw translation files
    raw_translations_directory: PathBuf,

    /// Path to save the parsed translations JSON file
    output_file: PathBuf,
}

fn main() {
    let args = Args::parse();

    ctrlc::set_handler(|| {
        eprintln!("\nProcess interrupted by user");
        std::process::exit(0);
    })
    .expect("failed to install interrupt handler");

    let reporter = ConsoleReporter::new();
    match run(&args, reporter.clone()) {
        Ok(aggregation) => {
            if !aggregation.warnings.is_empty() {
                eprintln!("{}", "⚠️  Warnings:".yellow());
                for warning in &aggregation.warnings {
                    eprintln!("  {warning}");
                }
            }
            println!(
                "{}",
                format!(
                    "✅ Parsed translations saved to {}",
                    args.output_file.display()
                )
                .green()
            );
        }
        Err(e) => {
            reporter.clear();
            eprintln!("{}", format!("❌ An error occurred: {e}").red());
            std::process::exit(1);
        }
    }
}

fn run(args: &Args, reporter: ConsoleReporter) -> Result<Aggregation, xliff_extract::Error> {
    let aggregation = Aggregator::new()
        .with_reporter(reporter)
        .aggregate(&args.raw_translations_directory)?;
    aggregation.result.write_to(&args.output_file)?;
    Ok(aggregation)
}
