use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use csv_quality::config::Config;
use csv_quality::logging;
use csv_quality::pipeline::{load, output, Pipeline};

#[derive(Parser)]
#[command(name = "csv_quality")]
#[command(about = "Fault-tolerant CSV loading, quality reporting and cleaning")]
#[command(version)]
struct Cli {
    /// TOML configuration file (field roles and output paths)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the result as JSON instead of a summary
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a CSV file and show what was read
    Read {
        input: PathBuf,
    },
    /// Generate a data-quality report for a CSV file
    Report {
        input: PathBuf,
        /// Report destination (defaults to output.report_path)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Field that must hold positive numbers (repeatable)
        #[arg(long = "numeric-field")]
        numeric_fields: Vec<String>,
    },
    /// Drop rows missing the required field and normalize the rest
    Clean {
        input: PathBuf,
        /// Cleaned CSV destination (defaults to output.clean_path)
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        required_field: Option<String>,
        #[arg(long)]
        numeric_field: Option<String>,
        #[arg(long)]
        normalize_field: Option<String>,
    },
    /// Load once and write both the report and the cleaned CSV
    Run {
        input: PathBuf,
    },
}

#[derive(Serialize)]
struct JsonOut<T: Serialize> {
    ok: bool,
    data: T,
}

fn print_json<T: Serialize>(data: T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&JsonOut { ok: true, data })?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load_or_default(cli.config.as_deref())?;

    let _guard = logging::init_logging(&config.output.log_dir);

    run_command(cli.command, cli.json, &mut config)
}

fn run_command(command: Commands, json: bool, config: &mut Config) -> anyhow::Result<()> {
    match command {
        Commands::Read { input } => {
            let document = load(&input)?;
            if json {
                print_json(&document)?;
            } else {
                println!("📄 {} rows from {}", document.row_count(), input.display());
                println!("   Columns: {}", document.columns().join(", "));
                if let Some(first) = document.rows().first() {
                    println!("   First row: {}", serde_json::to_string(first)?);
                }
            }
        }
        Commands::Report {
            input,
            output: destination,
            numeric_fields,
        } => {
            if !numeric_fields.is_empty() {
                config.audit.numeric_fields = numeric_fields;
            }
            let destination = destination.unwrap_or_else(|| config.output.report_path.clone());

            let report = Pipeline::new(config.clone()).report_file(&input)?;
            output::write_report(&report, &destination)
                .with_context(|| format!("writing report to {}", destination.display()))?;

            if json {
                print_json(&report)?;
            } else {
                println!("📊 Quality report for {}:", input.display());
                println!("   Rows: {}", report.row_count);
                for (column, count) in report.missing_values.iter() {
                    println!("   Missing {}: {}", column, count);
                }
                for (field, count) in report.invalid_values.iter() {
                    println!("   Invalid {}: {}", field, count);
                }
                println!("   Output file: {}", destination.display());
            }
        }
        Commands::Clean {
            input,
            output: destination,
            required_field,
            numeric_field,
            normalize_field,
        } => {
            if let Some(field) = required_field {
                config.clean.required_field = field;
            }
            if let Some(field) = numeric_field {
                config.clean.numeric_field = field;
            }
            if let Some(field) = normalize_field {
                config.clean.normalize_field = field;
            }
            let destination = destination.unwrap_or_else(|| config.output.clean_path.clone());

            let result = Pipeline::new(config.clone()).clean_file(&input, &destination)?;
            if json {
                print_json(&result)?;
            } else {
                println!("🧹 Cleaned {} rows ({} dropped)", result.retained, result.dropped);
                println!("   Output file: {}", destination.display());
            }
        }
        Commands::Run { input } => {
            let result = Pipeline::new(config.clone()).run(&input)?;
            if json {
                print_json(&result)?;
            } else {
                println!("🚀 Pipeline results for {}:", input.display());
                println!("   Rows read: {}", result.row_count);
                println!("   Retained: {}", result.retained_rows);
                println!("   Dropped: {}", result.dropped_rows);
                println!("   Report: {}", result.report_path.display());
                println!("   Cleaned CSV: {}", result.clean_path.display());
            }
        }
    }
    Ok(())
}
