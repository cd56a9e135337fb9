mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::expectation::{ExpectArgs, HarmonicArgs};
use commands::simulate::{CompareArgs, SimulateArgs};

/// Coupon collector estimation from the command line
#[derive(Parser)]
#[command(
    name = "coupon",
    version,
    about = "Analytic and Monte Carlo estimates for the coupon collector problem",
    long_about = "Estimates the expected number of uniform-random draws (with \
                  replacement) needed to collect all n distinct item types, both \
                  in closed form (n * H_n) and empirically via repeated \
                  simulation with summary statistics and a distribution view."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the n-th harmonic number H_n
    Harmonic(HarmonicArgs),
    /// Closed-form expected draws to complete a collection (n * H_n)
    Expect(ExpectArgs),
    /// Run a Monte Carlo simulation batch
    Simulate(SimulateArgs),
    /// Analytic expectation and simulation estimate side by side
    Compare(CompareArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Harmonic(args) => commands::expectation::run_harmonic(args),
        Commands::Expect(args) => commands::expectation::run_expect(args),
        Commands::Simulate(args) => commands::simulate::run_simulate(args),
        Commands::Compare(args) => commands::simulate::run_compare(args),
        Commands::Version => {
            println!("coupon {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
