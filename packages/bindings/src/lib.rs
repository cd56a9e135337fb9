use napi::Result as NapiResult;
use napi_derive::napi;

use coupon_core::expectation::{self, ExpectationInput};
use coupon_core::harmonic;
use coupon_core::monte_carlo::simulation::{self, SimulationInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Analytic model
// ---------------------------------------------------------------------------

#[napi]
pub fn harmonic_number(n: u32) -> NapiResult<f64> {
    harmonic::harmonic_number(n).map_err(to_napi_error)
}

#[napi]
pub fn analytic_expected_time(n: u32) -> NapiResult<f64> {
    expectation::analytic_expected_time(n).map_err(to_napi_error)
}

#[napi]
pub fn calculate_expectation(input_json: String) -> NapiResult<String> {
    let input: ExpectationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = expectation::calculate_expectation(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Monte Carlo engine
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate_one(n: u32) -> NapiResult<i64> {
    simulation::simulate_one(n)
        .map(|draws| draws as i64)
        .map_err(to_napi_error)
}

#[napi]
pub fn simulate(input_json: String) -> NapiResult<String> {
    let input: SimulationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = simulation::run_simulation(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
