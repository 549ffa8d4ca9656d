//! Exact discrete convolution of log-binned PMFs.

use hazprop_core::constants::PMF_MASS_TOLERANCE;
use hazprop_core::errors::HazResult;
use hazprop_core::model::Pmf;
use tracing::warn;

use crate::binning::{bin_edges, bin_index, midpoints, BinScale};

/// PMF of the sum of two independent random variables.
///
/// The output resolution is `min(res_a, res_b)` unless overridden. The
/// output range starts at `floor(log10(10^min_a + 10^min_b))` and covers
/// through `ceil(log10(10^max_a + 10^max_b))`, so the sum of any pair of
/// input midpoints falls inside it.
///
/// The full outer product of midpoint sums is re-digitized into the
/// output edges: log-spaced bins are non-uniform and the output range
/// differs from either input's, so neither a direct nor an FFT
/// convolution applies.
///
/// The empty sentinel acts as the identity: a source with no
/// distribution adds nothing to the sum.
pub fn convolve(a: &Pmf, b: &Pmf, resolution: Option<usize>) -> HazResult<Pmf> {
    a.validate()?;
    b.validate()?;

    if a.is_empty() {
        return Ok(b.clone());
    }
    if b.is_empty() {
        return Ok(a.clone());
    }

    let res_o = resolution.unwrap_or_else(|| a.resolution.min(b.resolution));

    // Output range from the sums of the input range endpoints.
    let lo_sum = 10f64.powi(a.min_power) + 10f64.powi(b.min_power);
    let hi_sum = 10f64.powi(a.max_power()) + 10f64.powi(b.max_power());
    let min_power_o = lo_sum.log10().floor() as i32;
    let num_powers_o = (hi_sum.log10().ceil() as i32 - min_power_o).max(1) as usize;

    let edges_o = bin_edges(min_power_o, res_o, num_powers_o, BinScale::Constant)?;
    let mid_a = midpoints(a.min_power, a.resolution, a.num_powers);
    let mid_b = midpoints(b.min_power, b.resolution, b.num_powers);

    let mut bins = vec![0.0; res_o * num_powers_o];
    for (i, &pa) in a.bins.iter().enumerate() {
        if pa == 0.0 {
            continue;
        }
        for (j, &pb) in b.bins.iter().enumerate() {
            if pb == 0.0 {
                continue;
            }
            bins[bin_index(&edges_o, mid_a[i] + mid_b[j])] += pa * pb;
        }
    }

    let out = Pmf::new(min_power_o, num_powers_o, res_o, bins);
    let mass = out.mass();
    if (mass - 1.0).abs() > PMF_MASS_TOLERANCE {
        warn!(
            min_power_a = a.min_power,
            num_powers_a = a.num_powers,
            min_power_b = b.min_power,
            num_powers_b = b.num_powers,
            output_mass = mass,
            "convolution output mass drifted from 1"
        );
    }
    Ok(out)
}
