//! Error families for the hazprop workspace.
//!
//! One enum per area, aggregated into [`HazError`]. Numeric-tolerance
//! drift is NOT an error: it is logged by the component that detects it
//! and only escalates to [`DataError::MassDrift`] when the caller enables
//! strict tolerance in its config.

mod config_error;
mod data_error;
mod sampling_error;

pub use config_error::ConfigError;
pub use data_error::DataError;
pub use sampling_error::SamplingError;

/// Top-level error for the propagation engine.
#[derive(Debug, thiserror::Error)]
pub enum HazError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("data inconsistency: {0}")]
    Data(#[from] DataError),

    #[error("sampling weight error: {0}")]
    Sampling(#[from] SamplingError),
}

/// Result alias used across the workspace.
pub type HazResult<T> = Result<T, HazError>;
