use crate::error::CollectorError;
use crate::types::CollectionSize;
use crate::CollectorResult;

/// Below this size the harmonic number is computed as the exact finite sum;
/// at or above it the O(1) asymptotic form ln(n) + gamma is used.
pub const EXACT_SUM_LIMIT: CollectionSize = 1_000;

/// The n-th harmonic number H_n = 1 + 1/2 + ... + 1/n.
///
/// Exact summation is O(n), so large collections switch to the asymptotic
/// approximation, whose relative error at the switchover is already below
/// 0.1%.
pub fn harmonic_number(n: CollectionSize) -> CollectorResult<f64> {
    if n < 1 {
        return Err(CollectorError::InvalidInput {
            field: "n".into(),
            reason: "Collection size must be at least 1".into(),
        });
    }

    if n >= EXACT_SUM_LIMIT {
        return Ok((n as f64).ln() + statrs::consts::EULER_MASCHERONI);
    }

    // Smallest terms first to limit rounding error.
    Ok((1..=n).rev().map(|k| 1.0 / k as f64).sum())
}
