pub mod error;
pub mod scoring;
pub mod statements;
pub mod types;

#[cfg(feature = "benchmark")]
pub mod benchmark;

pub use error::HealthError;
pub use types::*;

/// Standard result type for all health-analysis operations
pub type HealthResult<T> = Result<T, HealthError>;
