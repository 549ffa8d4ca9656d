//! # hazprop-propagate
//!
//! Orchestrates one propagation run: clusters the sources, resolves the
//! correlated realization groups, then combines per-cluster
//! distributions by convolution or by correlation-preserving sampling.

pub mod propagator;
pub mod scenario;

pub use propagator::{PropagationOutput, Propagator};
pub use scenario::{admissible_indices, enumerate_scenarios, Scenario};
