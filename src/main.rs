// SPDX-License-Identifier: PMPL-1.0-or-later

//! tr-convert: translation table converter
//!
//! Splits a `key,en,de` CSV into per-language JSON documents, and merges
//! per-language `.properties` files back into a single CSV.

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;
use tr_convert::{csv_to_json, properties_to_csv, ConvertConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "tr-convert")]
#[command(version)]
#[command(about = "Convert translation tables between CSV, JSON and .properties files")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log progress to stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a key/value CSV into one JSON document per language
    CsvToJson {
        /// Source CSV (default: translations.csv)
        #[arg(short, long, value_name = "CSV")]
        input: Option<PathBuf>,

        /// Directory receiving <lang>.json files (default: current directory)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Language of each value column, in order (default: en, de)
        #[arg(short, long = "lang", value_name = "LANG")]
        languages: Vec<String>,
    },

    /// Merge translations_<lang>.properties files into one CSV
    PropertiesToCsv {
        /// Directory holding the .properties files (default: current directory)
        #[arg(short, long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Output CSV (default: translations_new.csv)
        #[arg(short, long, value_name = "CSV")]
        output: Option<PathBuf>,

        /// Order language columns by tag instead of directory order
        #[arg(long)]
        sort_languages: bool,
    },
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("tr_convert=debug"),
        _ => EnvFilter::new("tr_convert=trace"),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = ConvertConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::CsvToJson {
            input,
            output_dir,
            languages,
        } => {
            let settings = &mut config.csv_to_json;
            if let Some(input) = input {
                settings.input = input;
            }
            if let Some(output_dir) = output_dir {
                settings.output_dir = output_dir;
            }
            if !languages.is_empty() {
                settings.languages = languages;
            }

            let summary = csv_to_json::run(settings)?;
            tracing::info!(keys = summary.keys, "csv converted");
            println!("{}", summary.completion_message());
        }

        Commands::PropertiesToCsv {
            dir,
            output,
            sort_languages,
        } => {
            let settings = &mut config.properties_to_csv;
            if let Some(dir) = dir {
                settings.directory = dir;
            }
            if let Some(output) = output {
                settings.output = output;
            }
            settings.sort_languages |= sort_languages;

            let summary = properties_to_csv::run(settings)?;
            tracing::info!(
                languages = ?summary.languages,
                keys = summary.keys,
                path = %summary.output.display(),
                "properties converted"
            );
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
