use thiserror::Error;

/// Errors reported when validating a [`crate::Config`].
///
/// Only construction fails with an error; runtime degeneracies (silent
/// frames, empty sequences, zero-norm vectors) degrade to sentinel results
/// instead of propagating.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("sample rate must be non-zero")]
    ZeroSampleRate,

    #[error("frame size must be non-zero")]
    ZeroFrameSize,

    #[error("filter count must be non-zero")]
    NoFilters,

    #[error("coefficient count {coefficients} must be in 1..={filters}")]
    BadCoefficientCount { coefficients: usize, filters: usize },
}
