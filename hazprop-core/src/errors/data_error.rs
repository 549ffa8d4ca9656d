/// Inconsistencies in the per-source input data or in intermediate
/// distributions. All fatal at detection.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("pattern {pattern} matched no realizations of source {source}")]
    EmptyPatternMatch { pattern: String, r#source: String },

    #[error(
        "investigation time of source {source} is {actual}, \
         other sources use {expected}"
    )]
    InvestigationTimeMismatch {
        r#source: String,
        expected: f64,
        actual: f64,
    },

    #[error("PMF has {actual} bins, expected num_powers * resolution = {expected}")]
    PmfLengthMismatch { expected: usize, actual: usize },

    #[error("PMF mass is {sum}, expected 1 within {tolerance}")]
    PmfMassNotUnit { sum: f64, tolerance: f64 },

    #[error("output mass drifted to {sum} (strict tolerance enabled)")]
    MassDrift { sum: f64 },

    #[error("PMF resolutions differ: {a} vs {b}")]
    ResolutionMismatch { a: usize, b: usize },

    #[error("realization path {path} has no '~' separator")]
    MalformedPath { path: String },

    #[error(
        "source {source} has {actual} {what}, other sources have {expected}"
    )]
    SourceShapeMismatch {
        r#source: String,
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error(
        "realization groups of uncertainty {index} for source {source} \
         do not partition its {n_rlzs} realizations"
    )]
    GroupsNotPartition {
        index: usize,
        r#source: String,
        n_rlzs: usize,
    },

    #[error(
        "no admissible realization for source {source}: the correlated \
         group choices intersect to the empty set"
    )]
    EmptyAdmissibleSet { r#source: String },

    #[error("propagation cancelled between cluster iterations")]
    Cancelled,
}
