//! # hazprop-analysis
//!
//! Setup and selection stage of the propagation engine:
//! - Analysis: validated, read-only owner of the per-source results and
//!   the declared correlated uncertainties
//! - Clusterer: partitions sources into correlation clusters
//! - Patterns: wildcard selectors over logic-tree paths and the
//!   realization-index groups they resolve to

pub mod analysis;
pub mod clusterer;
pub mod patterns;

pub use analysis::Analysis;
pub use clusterer::{cluster, Clusters};
pub use patterns::{
    get_patterns, get_realization_groups, GroupSet, PatternsBySource, RealizationGroups,
};
