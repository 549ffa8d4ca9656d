/// Analysis configuration errors. All fatal at detection.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("duplicated source id in analysis definition: {id}")]
    DuplicateSourceId { id: String },

    #[error(
        "uncertainty {index} has {actual} branches for source {source}, \
         expected {expected}"
    )]
    BranchCardinalityMismatch {
        index: usize,
        r#source: String,
        expected: usize,
        actual: usize,
    },

    #[error("uncertainty {index} names source {source}, which has no results")]
    UnknownSource { index: usize, r#source: String },

    #[error("unsupported bin scale: {scale} (only \"constant\" is supported)")]
    UnsupportedBinScale { scale: String },

    #[error("histogram resolution must be positive")]
    ZeroResolution,

    #[error("number of samples must be positive")]
    ZeroSamples,
}
