//! # hazprop-core
//!
//! Foundation crate for the hazprop uncertainty-propagation engine.
//! Defines all types, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod model;

// Re-export the most commonly used types at the crate root.
pub use config::{AnalysisType, Mode, PropagationConfig};
pub use errors::{HazError, HazResult};
pub use model::{
    LogicTreeHalf, Pattern, Pmf, RealizationPath, SourceId, SourceResult, Uncertainty,
};
