use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::harmonic::{harmonic_number, EXACT_SUM_LIMIT};
use crate::types::{with_metadata, CollectionSize, ComputationOutput};
use crate::CollectorResult;

/// Expected number of draws to collect all `n` coupon types: n * H_n.
///
/// Deterministic given `n`; errors propagate from the harmonic estimator.
pub fn analytic_expected_time(n: CollectionSize) -> CollectorResult<f64> {
    Ok(n as f64 * harmonic_number(n)?)
}

/// Input for the analytic expectation operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectationInput {
    /// Number of distinct coupon types.
    pub n: CollectionSize,
}

/// Output of the analytic expectation operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectationOutput {
    pub n: CollectionSize,
    /// The harmonic number H_n used in the expectation.
    pub harmonic: f64,
    /// Expected draws to complete the collection: n * H_n.
    pub expected_draws: f64,
    /// Whether H_n came from the asymptotic form rather than the exact sum.
    pub asymptotic: bool,
}

/// Compute the closed-form expected collection time with full metadata.
pub fn calculate_expectation(
    input: &ExpectationInput,
) -> CollectorResult<ComputationOutput<ExpectationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let harmonic = harmonic_number(input.n)?;
    let expected_draws = input.n as f64 * harmonic;
    let asymptotic = input.n >= EXACT_SUM_LIMIT;

    if asymptotic {
        warnings.push(format!(
            "H_n approximated as ln(n) + gamma for n={} (exact summation starts costing above n={})",
            input.n,
            EXACT_SUM_LIMIT - 1
        ));
    }

    let output = ExpectationOutput {
        n: input.n,
        harmonic,
        expected_draws,
        asymptotic,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Coupon Collector Analytic Expectation",
        &serde_json::json!({
            "n": input.n,
            "exact_sum_limit": EXACT_SUM_LIMIT,
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_coupon_takes_one_draw() {
        assert_eq!(analytic_expected_time(1).unwrap(), 1.0);
    }

    #[test]
    fn test_two_coupons_expectation() {
        // 2 * H_2 = 2 * 1.5 = 3
        let e = analytic_expected_time(2).unwrap();
        assert!((e - 3.0).abs() < 1e-12, "E[T_2]={e}");
    }

    #[test]
    fn test_expectation_grows_superlinearly() {
        let e10 = analytic_expected_time(10).unwrap();
        let e100 = analytic_expected_time(100).unwrap();
        assert!(e100 > 10.0 * e10 / 2.0);
        assert!(e10 > 10.0 && e100 > 100.0);
    }

    #[test]
    fn test_envelope_reports_asymptotic_branch() {
        let small = calculate_expectation(&ExpectationInput { n: 50 }).unwrap();
        assert!(!small.result.asymptotic);
        assert!(small.warnings.is_empty());

        let large = calculate_expectation(&ExpectationInput { n: 5_000 }).unwrap();
        assert!(large.result.asymptotic);
        assert_eq!(large.warnings.len(), 1);
    }

    #[test]
    fn test_invalid_collection_size() {
        assert!(analytic_expected_time(0).is_err());
        assert!(calculate_expectation(&ExpectationInput { n: 0 }).is_err());
    }
}
