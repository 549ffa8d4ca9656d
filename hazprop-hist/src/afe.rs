//! Probability-of-exceedance / annual-frequency-of-exceedance conversion.

use hazprop_core::constants::MAX_POE;
use ndarray::Array3;

/// Annual frequency of exceedance from a probability of exceedance over
/// `investigation_time` years. The poe is clipped to `MAX_POE` first;
/// `-ln(1 - poe)` diverges at 1.
pub fn poe_to_afe(poe: f64, investigation_time: f64) -> f64 {
    let poe = poe.min(MAX_POE);
    -(1.0 - poe).ln() / investigation_time
}

/// Inverse transform of [`poe_to_afe`].
pub fn afe_to_poe(afe: f64, investigation_time: f64) -> f64 {
    1.0 - (-afe * investigation_time).exp()
}

/// Element-wise [`poe_to_afe`] over a `[site, realization, level]` block.
pub fn poes_to_afes(poes: &Array3<f64>, investigation_time: f64) -> Array3<f64> {
    poes.mapv(|poe| poe_to_afe(poe, investigation_time))
}
