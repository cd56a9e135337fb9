use clap::Args;
use colored::Colorize;
use serde_json::Value;

use coupon_core::expectation::analytic_expected_time;
use coupon_core::monte_carlo::simulation::{self, SimulationInput, TrialProgress};

use crate::input;

const DEFAULT_TRIALS: u32 = 1_000;

/// Arguments for a Monte Carlo simulation batch
#[derive(Args)]
pub struct SimulateArgs {
    /// Number of distinct coupon types
    #[arg(long)]
    pub n: Option<u32>,

    /// Number of independent trials
    #[arg(long)]
    pub trials: Option<u32>,

    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stream per-trial progress to stderr
    #[arg(long)]
    pub progress: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the analytic-vs-simulation comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Number of distinct coupon types
    #[arg(long)]
    pub n: u32,

    /// Number of independent trials
    #[arg(long, default_value_t = DEFAULT_TRIALS)]
    pub trials: u32,

    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
}

fn resolve_input(args: &SimulateArgs) -> Result<SimulationInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return Ok(input::read_json(path)?);
    }
    if let Some(data) = input::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Ok(SimulationInput {
        n: args.n.ok_or("--n is required (or provide --input)")?,
        trials: args.trials.unwrap_or(DEFAULT_TRIALS),
        seed: args.seed,
    })
}

fn render_progress(p: TrialProgress) {
    // Throttle to roughly one update per percent
    let step = (p.total / 100).max(1);
    if p.completed % step == 0 || p.completed == p.total {
        eprint!(
            "\r{} {:>5.1}%",
            "simulating".dimmed(),
            p.fraction() * 100.0
        );
        if p.completed == p.total {
            eprintln!();
        }
    }
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sim_input = resolve_input(&args)?;
    let result = if args.progress {
        simulation::run_simulation_with_progress(&sim_input, render_progress)?
    } else {
        simulation::run_simulation(&sim_input)?
    };
    Ok(serde_json::to_value(result)?)
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let analytic = analytic_expected_time(args.n)?;
    let summary = simulation::simulate(&SimulationInput {
        n: args.n,
        trials: args.trials,
        seed: args.seed,
    })?;

    let absolute_error = (summary.mean - analytic).abs();
    Ok(serde_json::json!({
        "n": args.n,
        "trials": args.trials,
        "analytic_expected_draws": analytic,
        "simulated_mean": summary.mean,
        "simulated_std": summary.std,
        "min": summary.min,
        "max": summary.max,
        "absolute_error": absolute_error,
        "relative_error": absolute_error / analytic,
    }))
}
