//! Log-scale binning primitives.

use hazprop_core::constants::NEGLIGIBLE_AFE;
use hazprop_core::errors::{ConfigError, HazResult};
use hazprop_core::model::Pmf;

/// Spacing scheme for histogram bin edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinScale {
    /// A fixed number of samples per decade.
    Constant,
}

impl BinScale {
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        match name {
            "constant" => Ok(Self::Constant),
            other => Err(ConfigError::UnsupportedBinScale {
                scale: other.to_string(),
            }),
        }
    }
}

/// Detect the decade range covered by `values`.
///
/// Values with `|v| < 1e-20` are negligible and do not drive the range.
/// Returns `None` when every value is negligible: there is no
/// distribution to bin.
pub fn bin_range(values: &[f64]) -> Option<(i32, usize)> {
    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;
    for &v in values {
        let v = v.abs();
        if v < NEGLIGIBLE_AFE {
            continue;
        }
        min_v = min_v.min(v);
        max_v = max_v.max(v);
    }
    if !min_v.is_finite() {
        return None;
    }
    let min_power = min_v.log10().floor() as i32;
    let num_powers = (max_v.log10().ceil() as i32 - min_power).max(1) as usize;
    Some((min_power, num_powers))
}

/// Log-spaced bin edges from `10^min_power` to `10^(min_power+num_powers)`
/// with exactly `resolution * num_powers + 1` points.
pub fn bin_edges(
    min_power: i32,
    resolution: usize,
    num_powers: usize,
    scale: BinScale,
) -> HazResult<Vec<f64>> {
    match scale {
        BinScale::Constant => {}
    }
    if resolution == 0 {
        return Err(ConfigError::ZeroResolution.into());
    }
    let n = resolution * num_powers;
    let lo = min_power as f64;
    let span = num_powers as f64;
    Ok((0..=n)
        .map(|i| 10f64.powf(lo + span * i as f64 / n as f64))
        .collect())
}

/// Arithmetic midpoints of consecutive log-spaced edges for the given
/// range.
pub fn midpoints(min_power: i32, resolution: usize, num_powers: usize) -> Vec<f64> {
    let n = resolution * num_powers;
    let lo = min_power as f64;
    let span = num_powers as f64;
    let edge = |i: usize| 10f64.powf(lo + span * i as f64 / n as f64);
    (0..n).map(|i| (edge(i) + edge(i + 1)) / 2.0).collect()
}

/// Bin index of `value` in `edges`. Out-of-range values clamp to the
/// boundary bins so no probability mass is dropped.
pub fn bin_index(edges: &[f64], value: f64) -> usize {
    let idx = edges.partition_point(|e| *e <= value);
    idx.saturating_sub(1).min(edges.len() - 2)
}

/// Weighted histogram of `values` over `edges`.
///
/// Returns one count per bin (`edges.len() - 1`); when the weights sum to
/// one the result is a valid PMF.
pub fn histogram(values: &[f64], weights: &[f64], edges: &[f64]) -> Vec<f64> {
    debug_assert_eq!(values.len(), weights.len());
    let mut bins = vec![0.0; edges.len() - 1];
    for (&v, &w) in values.iter().zip(weights) {
        bins[bin_index(edges, v)] += w;
    }
    bins
}

/// Bin weighted values into a [`Pmf`] over their detected decade range.
///
/// All-negligible values yield the empty sentinel.
pub fn pmf_from_values(values: &[f64], weights: &[f64], resolution: usize) -> HazResult<Pmf> {
    match bin_range(values) {
        None => Ok(Pmf::empty(resolution)),
        Some((min_power, num_powers)) => {
            let edges = bin_edges(min_power, resolution, num_powers, BinScale::Constant)?;
            let bins = histogram(values, weights, &edges);
            Ok(Pmf::new(min_power, num_powers, resolution, bins))
        }
    }
}
