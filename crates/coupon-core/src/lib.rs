pub mod error;
pub mod expectation;
pub mod harmonic;
pub mod types;

#[cfg(feature = "monte_carlo")]
pub mod monte_carlo;

pub use error::CollectorError;
pub use types::*;

/// Standard result type for all coupon-collector operations
pub type CollectorResult<T> = Result<T, CollectorError>;
