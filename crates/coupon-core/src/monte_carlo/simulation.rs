use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CollectorError;
use crate::types::{with_metadata, CollectionSize, ComputationOutput, DrawCount, TrialCount};
use crate::CollectorResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Top-level input for a simulation batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationInput {
    /// Number of distinct coupon types (minimum 1).
    pub n: CollectionSize,
    /// Number of independent trials (minimum 1).
    #[serde(default = "default_trials")]
    pub trials: TrialCount,
    /// Optional seed for reproducibility.
    pub seed: Option<u64>,
}

fn default_trials() -> TrialCount {
    1_000
}

/// Aggregate statistics over a batch of trials, plus the full ordered
/// result sequence so a caller can render the distribution without
/// re-running the simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub n: CollectionSize,
    pub trials: TrialCount,
    pub mean: f64,
    /// Sample standard deviation (divisor trials - 1); 0.0 for a single trial.
    pub std: f64,
    pub min: DrawCount,
    pub max: DrawCount,
    pub results: Vec<DrawCount>,
}

/// Progress notification delivered after each completed trial.
#[derive(Debug, Clone, Copy)]
pub struct TrialProgress {
    pub completed: TrialCount,
    pub total: TrialCount,
}

impl TrialProgress {
    /// Completed fraction in [0, 1].
    pub fn fraction(&self) -> f64 {
        self.completed as f64 / self.total as f64
    }
}

/// A single histogram bin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u32,
    pub frequency: f64,
}

// ---------------------------------------------------------------------------
// Single-trial procedure
// ---------------------------------------------------------------------------

/// Draw uniformly with replacement until every coupon type has been seen,
/// returning the number of draws taken. Direct sampling of the collection
/// process; the draw count validates the analytic formula rather than
/// assuming it.
fn collect_full_set(rng: &mut StdRng, n: CollectionSize) -> DrawCount {
    let mut seen = vec![false; n as usize];
    let mut missing = n;
    let mut draws: DrawCount = 0;

    while missing > 0 {
        draws += 1;
        let coupon = rng.gen_range(0..n) as usize;
        if !seen[coupon] {
            seen[coupon] = true;
            missing -= 1;
        }
    }

    draws
}

/// Run a single entropy-seeded trial.
pub fn simulate_one(n: CollectionSize) -> CollectorResult<DrawCount> {
    if n < 1 {
        return Err(CollectorError::InvalidInput {
            field: "n".into(),
            reason: "Collection size must be at least 1".into(),
        });
    }
    let mut rng = StdRng::from_entropy();
    Ok(collect_full_set(&mut rng, n))
}

// ---------------------------------------------------------------------------
// Batch procedure
// ---------------------------------------------------------------------------

fn validate(input: &SimulationInput) -> CollectorResult<()> {
    if input.n < 1 {
        return Err(CollectorError::InvalidInput {
            field: "n".into(),
            reason: "Collection size must be at least 1".into(),
        });
    }
    if input.trials < 1 {
        return Err(CollectorError::InvalidInput {
            field: "trials".into(),
            reason: "Trial count must be at least 1".into(),
        });
    }
    Ok(())
}

/// Run a batch of independent trials and aggregate descriptive statistics.
///
/// The RNG is owned by this call: seeded deterministically when a seed is
/// given, from entropy otherwise. A fixed (n, trials, seed) triple always
/// yields the identical results sequence.
pub fn simulate(input: &SimulationInput) -> CollectorResult<SimulationSummary> {
    simulate_with_progress(input, |_| {})
}

/// Same contract as [`simulate`], invoking `on_progress` after each trial.
/// The observer is the natural per-trial yield point for hosts that want to
/// poll a cancellation flag; it has no effect on the statistics.
pub fn simulate_with_progress<F>(
    input: &SimulationInput,
    mut on_progress: F,
) -> CollectorResult<SimulationSummary>
where
    F: FnMut(TrialProgress),
{
    validate(input)?;

    let mut rng = match input.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let mut results: Vec<DrawCount> = Vec::with_capacity(input.trials as usize);
    for completed in 1..=input.trials {
        results.push(collect_full_set(&mut rng, input.n));
        on_progress(TrialProgress {
            completed,
            total: input.trials,
        });
    }

    let count = results.len() as f64;
    let mean = results.iter().map(|&r| r as f64).sum::<f64>() / count;

    let std = if results.len() > 1 {
        let variance = results
            .iter()
            .map(|&r| (r as f64 - mean).powi(2))
            .sum::<f64>()
            / (count - 1.0);
        variance.sqrt()
    } else {
        0.0
    };

    // results is non-empty: trials >= 1
    let min = *results.iter().min().unwrap_or(&0);
    let max = *results.iter().max().unwrap_or(&0);

    Ok(SimulationSummary {
        n: input.n,
        trials: input.trials,
        mean,
        std,
        min,
        max,
        results,
    })
}

/// Run a simulation batch and wrap the summary in the standard envelope.
pub fn run_simulation(
    input: &SimulationInput,
) -> CollectorResult<ComputationOutput<SimulationSummary>> {
    run_simulation_with_progress(input, |_| {})
}

/// Envelope variant of [`simulate_with_progress`].
pub fn run_simulation_with_progress<F>(
    input: &SimulationInput,
    on_progress: F,
) -> CollectorResult<ComputationOutput<SimulationSummary>>
where
    F: FnMut(TrialProgress),
{
    let start = Instant::now();
    let summary = simulate_with_progress(input, on_progress)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Coupon Collector Monte Carlo Simulation",
        &serde_json::json!({
            "n": input.n,
            "trials": input.trials,
            "seed": input.seed,
            "sampling": "uniform_with_replacement",
        }),
        Vec::new(),
        elapsed,
        summary,
    ))
}

// ---------------------------------------------------------------------------
// Distribution view
// ---------------------------------------------------------------------------

/// Build an equal-width histogram over per-trial draw counts.
///
/// When every result is identical a single bin covering that value is
/// returned regardless of `num_bins`.
pub fn histogram(results: &[DrawCount], num_bins: usize) -> CollectorResult<Vec<HistogramBin>> {
    if results.is_empty() {
        return Err(CollectorError::InvalidInput {
            field: "results".into(),
            reason: "Histogram requires at least one result".into(),
        });
    }
    if num_bins < 1 {
        return Err(CollectorError::InvalidInput {
            field: "num_bins".into(),
            reason: "Bin count must be at least 1".into(),
        });
    }

    let min_val = *results.iter().min().unwrap_or(&0) as f64;
    let max_val = *results.iter().max().unwrap_or(&0) as f64;
    let n = results.len() as f64;

    if (max_val - min_val).abs() < f64::EPSILON {
        return Ok(vec![HistogramBin {
            lower: min_val,
            upper: max_val,
            count: results.len() as u32,
            frequency: 1.0,
        }]);
    }

    let bin_width = (max_val - min_val) / num_bins as f64;

    let mut bins: Vec<HistogramBin> = (0..num_bins)
        .map(|i| {
            let lower = min_val + i as f64 * bin_width;
            let upper = if i == num_bins - 1 {
                max_val
            } else {
                min_val + (i + 1) as f64 * bin_width
            };
            HistogramBin {
                lower,
                upper,
                count: 0,
                frequency: 0.0,
            }
        })
        .collect();

    for &val in results {
        let mut idx = ((val as f64 - min_val) / bin_width).floor() as usize;
        if idx >= num_bins {
            idx = num_bins - 1;
        }
        bins[idx].count += 1;
    }

    for bin in &mut bins {
        bin.frequency = bin.count as f64 / n;
    }

    Ok(bins)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
