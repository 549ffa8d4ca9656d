/// Weight preparation errors raised before any sampling proceeds.
#[derive(Debug, thiserror::Error)]
pub enum SamplingError {
    #[error("group weights sum to {sum} after rounding correction, expected 1")]
    WeightSumMismatch { sum: f64 },

    #[error(
        "rounding correction of {correction} exceeds the worst-case \
         rounding error {bound}"
    )]
    CorrectionTooLarge { correction: f64, bound: f64 },

    #[error("rounding correction drove the last weight negative: {weight}")]
    NegativeWeight { weight: f64 },

    #[error("cannot normalize an empty weight vector")]
    EmptyWeights,

    #[error("invalid categorical weights: {reason}")]
    InvalidWeights { reason: String },
}
