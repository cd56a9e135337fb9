use clap::Args;
use serde_json::Value;

use coupon_core::expectation::{calculate_expectation, ExpectationInput};
use coupon_core::harmonic::harmonic_number;

/// Arguments for the harmonic number calculation
#[derive(Args)]
pub struct HarmonicArgs {
    /// Number of terms in the harmonic sum
    #[arg(long)]
    pub n: u32,
}

/// Arguments for the analytic expectation
#[derive(Args)]
pub struct ExpectArgs {
    /// Number of distinct coupon types
    #[arg(long)]
    pub n: u32,
}

pub fn run_harmonic(args: HarmonicArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let h = harmonic_number(args.n)?;
    Ok(serde_json::json!({
        "n": args.n,
        "harmonic": h,
    }))
}

pub fn run_expect(args: ExpectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let result = calculate_expectation(&ExpectationInput { n: args.n })?;
    Ok(serde_json::to_value(result)?)
}
