use coupon_core::expectation::{analytic_expected_time, calculate_expectation, ExpectationInput};
use coupon_core::harmonic::{harmonic_number, EXACT_SUM_LIMIT};
use pretty_assertions::assert_eq;

// ===========================================================================
// Harmonic estimator
// ===========================================================================

#[test]
fn test_harmonic_reference_values() {
    // H_1 = 1, H_2 = 1.5, H_4 = 25/12, H_10 ~ 2.928968
    assert_eq!(harmonic_number(1).unwrap(), 1.0);
    assert!((harmonic_number(2).unwrap() - 1.5).abs() < 1e-12);
    assert!((harmonic_number(4).unwrap() - 25.0 / 12.0).abs() < 1e-12);
    assert!((harmonic_number(10).unwrap() - 2.9289682539682538).abs() < 1e-12);
}

#[test]
fn test_harmonic_five_term_sum() {
    // 1 + 1/2 + 1/3 + 1/4 + 1/5 = 2.28333...
    let h5 = harmonic_number(5).unwrap();
    assert!((h5 - 2.283333333333333).abs() < 1e-12, "H_5={h5}");
}

#[test]
fn test_asymptotic_matches_exact_sum_above_threshold() {
    for n in [EXACT_SUM_LIMIT, 5_000, 50_000] {
        let exact: f64 = (1..=n).rev().map(|k| 1.0 / k as f64).sum();
        let approx = harmonic_number(n).unwrap();
        let rel_err = ((approx - exact) / exact).abs();
        assert!(rel_err < 0.001, "n={n}: approx={approx} exact={exact}");
    }
}

#[test]
fn test_harmonic_rejects_zero() {
    assert!(harmonic_number(0).is_err());
}

// ===========================================================================
// Analytic expectation
// ===========================================================================

#[test]
fn test_expectation_single_coupon() {
    assert_eq!(analytic_expected_time(1).unwrap(), 1.0);
}

#[test]
fn test_expectation_reference_values() {
    // n * H_n: 2 * 1.5 = 3, 6 * H_6 = 14.7, 10 * H_10 ~ 29.28968
    assert!((analytic_expected_time(2).unwrap() - 3.0).abs() < 1e-12);
    assert!((analytic_expected_time(6).unwrap() - 14.7).abs() < 1e-9);
    assert!((analytic_expected_time(10).unwrap() - 29.289682539682538).abs() < 1e-9);
}

#[test]
fn test_expectation_envelope_round_trips_through_json() {
    let output = calculate_expectation(&ExpectationInput { n: 52 }).unwrap();
    let value = serde_json::to_value(&output).unwrap();
    assert_eq!(value["result"]["n"], serde_json::json!(52));
    assert_eq!(value["metadata"]["precision"], serde_json::json!("ieee754_f64"));
    // Collecting a full deck of cards takes about 236 draws on average
    let expected = value["result"]["expected_draws"].as_f64().unwrap();
    assert!((expected - 235.978).abs() < 0.01, "expected_draws={expected}");
}
