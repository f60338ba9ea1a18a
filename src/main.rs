use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;

use vocab_weaver::compare::{compare_datasets, print_report};
use vocab_weaver::config;
use vocab_weaver::dataset_io::{load_raw_dataset, write_processed, write_run_log, write_stats};
use vocab_weaver::normalize::transform;
use vocab_weaver::stats::build_stats;
use vocab_weaver::types::dataset::ProcessedDataset;

#[derive(Parser, Debug)]
#[command(
    name = "vocab_weaver",
    about = "Vocabulary dataset cleaning, statistics, and version comparison"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize a raw dataset into courses and write the stats report
    Transform {
        /// Path to the tool configuration
        #[arg(long, default_value = "config.toml")]
        config: String,
        /// Override the configured input dataset
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Diff two versions (base, full) of the same dataset
    Compare {
        base: PathBuf,
        full: PathBuf,
    },
}

fn run_transform(config_path: &str, input_override: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let config = config::load_config_from_file(config_path)?;
    let input_file = input_override.unwrap_or_else(|| config.input_file.clone());

    let raw = load_raw_dataset(&input_file)?;
    let (courses, issues) = transform(&raw, &config.course_style);
    let stats = build_stats(&courses);

    let processed = ProcessedDataset { courses };
    write_processed(&config.processed_file, &processed)?;
    write_stats(&config.stats_file, &stats)?;
    write_run_log(
        &config.log_file,
        &input_file,
        &config.processed_file,
        &config.stats_file,
        &issues,
    )?;

    println!("Processed written: {}", config.processed_file.display());
    println!("Stats written: {}", config.stats_file.display());
    println!(
        "Log entries: {} (see {})",
        issues.len(),
        config.log_file.display()
    );
    Ok(())
}

fn run_compare(base_path: &PathBuf, full_path: &PathBuf) -> Result<(), Box<dyn Error>> {
    let base = load_raw_dataset(base_path)?;
    let full = load_raw_dataset(full_path)?;
    let report = compare_datasets(&base, &full);
    print_report(&report)?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let result = match &cli.command {
        Command::Transform { config, input } => run_transform(config, input.clone()),
        Command::Compare { base, full } => run_compare(base, full),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
