//! Rounded-weight normalization for correlated group draws.

use hazprop_core::errors::SamplingError;

/// Round `weights` to `decimals` places and fold the remainder into the
/// last bucket so the result sums exactly to 1.
///
/// The correction is bounded by the worst-case accumulated rounding
/// error, `0.5 * 10^-decimals * len`; a larger correction means the
/// input weights were wrong upstream and is an error rather than
/// something to mask.
pub fn normalize_rounded_weights(
    weights: &[f64],
    decimals: u32,
) -> Result<Vec<f64>, SamplingError> {
    if weights.is_empty() {
        return Err(SamplingError::EmptyWeights);
    }
    let scale = 10f64.powi(decimals as i32);
    let mut rounded: Vec<f64> = weights.iter().map(|w| (w * scale).round() / scale).collect();

    let n = rounded.len();
    let sum_rest: f64 = rounded[..n - 1].iter().sum();
    let last = 1.0 - sum_rest;

    let correction = (last - rounded[n - 1]).abs();
    let bound = 0.5 / scale * n as f64;
    if correction > bound {
        return Err(SamplingError::CorrectionTooLarge { correction, bound });
    }
    if last < 0.0 {
        return Err(SamplingError::NegativeWeight { weight: last });
    }
    rounded[n - 1] = last;

    let sum: f64 = rounded.iter().sum();
    if (sum - 1.0).abs() > 1e-9 {
        return Err(SamplingError::WeightSumMismatch { sum });
    }
    Ok(rounded)
}
