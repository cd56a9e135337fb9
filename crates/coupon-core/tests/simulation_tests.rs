use coupon_core::expectation::analytic_expected_time;
use coupon_core::monte_carlo::simulation::{
    histogram, simulate, simulate_with_progress, SimulationInput,
};
use statrs::statistics::Statistics;

const SEED: u64 = 42;

fn input(n: u32, trials: u32) -> SimulationInput {
    SimulationInput {
        n,
        trials,
        seed: Some(SEED),
    }
}

// ===========================================================================
// Spec scenarios
// ===========================================================================

#[test]
fn test_single_coupon_five_trials() {
    let summary = simulate(&input(1, 5)).unwrap();
    assert_eq!(summary.results, vec![1, 1, 1, 1, 1]);
    assert_eq!(summary.mean, 1.0);
    assert_eq!(summary.std, 0.0);
    assert_eq!(summary.min, 1);
    assert_eq!(summary.max, 1);
}

#[test]
fn test_two_coupons_converge_to_three() {
    // E[T_2] = 2 * H_2 = 3.0; sampling error over 1000 trials is well
    // inside +/- 0.2
    let summary = simulate(&input(2, 1_000)).unwrap();
    assert!(
        (summary.mean - 3.0).abs() < 0.2,
        "mean={} vs analytic 3.0",
        summary.mean
    );
}

#[test]
fn test_five_coupons_converge_to_analytic() {
    let analytic = analytic_expected_time(5).unwrap();
    let summary = simulate(&input(5, 2_000)).unwrap();
    assert!(
        (summary.mean - analytic).abs() < 1.0,
        "mean={} vs analytic {analytic}",
        summary.mean
    );
}

#[test]
fn test_determinism_across_calls() {
    let a = simulate(&input(25, 400)).unwrap();
    let b = simulate(&input(25, 400)).unwrap();
    assert_eq!(a.results, b.results);
}

#[test]
fn test_no_trial_finishes_early() {
    let summary = simulate(&input(30, 500)).unwrap();
    assert!(summary.results.iter().all(|&r| r >= 30));
}

#[test]
fn test_invalid_inputs_fail_upfront() {
    assert!(simulate(&input(0, 10)).is_err());
    assert!(simulate(&input(10, 0)).is_err());
}

// ===========================================================================
// Aggregation cross-checks
// ===========================================================================

#[test]
fn test_summary_statistics_match_statrs() {
    let summary = simulate(&input(12, 600)).unwrap();
    let data: Vec<f64> = summary.results.iter().map(|&r| r as f64).collect();

    let mean = Statistics::mean(&data);
    let std = Statistics::std_dev(&data);

    assert!((summary.mean - mean).abs() < 1e-9, "mean mismatch");
    assert!((summary.std - std).abs() < 1e-9, "std mismatch");
}

#[test]
fn test_progress_stream_is_complete_and_ordered() {
    let mut fractions: Vec<f64> = Vec::new();
    simulate_with_progress(&input(6, 120), |p| fractions.push(p.fraction())).unwrap();

    assert_eq!(fractions.len(), 120);
    assert!(fractions.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(*fractions.last().unwrap(), 1.0);
}

#[test]
fn test_histogram_covers_all_results() {
    let summary = simulate(&input(10, 800)).unwrap();
    let bins = histogram(&summary.results, 15).unwrap();

    assert_eq!(bins.iter().map(|b| b.count).sum::<u32>(), 800);
    assert!(bins.first().unwrap().lower <= summary.min as f64);
    assert!(bins.last().unwrap().upper >= summary.max as f64);
}
