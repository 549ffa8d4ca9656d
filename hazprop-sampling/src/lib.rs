//! # hazprop-sampling
//!
//! Correlation-preserving weighted Monte-Carlo sampling of per-source
//! realizations, with an explicit instance-owned RNG.

pub mod engine;
pub mod weights;

pub use engine::{SampleResult, SamplingEngine};
pub use weights::normalize_rounded_weights;
