//! Weighted mixture of alternative correlated scenarios.

use hazprop_core::constants::{DEFAULT_RESOLUTION, PMF_MASS_TOLERANCE};
use hazprop_core::errors::{DataError, HazResult};
use hazprop_core::model::Pmf;
use tracing::warn;

/// Weighted sum (not convolution) of PMFs representing mutually
/// exclusive correlated scenarios at the same level.
///
/// Inputs may cover different ranges; they are aligned on the overall
/// `[min(min_power), max(min_power + num_powers)]` span, each offset into
/// the shared output by `resolution * (min_power - overall_min_power)`.
/// Empty sentinel inputs contribute nothing. All non-empty inputs must
/// share one resolution.
pub fn mixture(weighted: &[(f64, Pmf)]) -> HazResult<Pmf> {
    let mut res: Option<usize> = None;
    let mut min_power = i32::MAX;
    let mut max_power = i32::MIN;

    for (_, pmf) in weighted {
        pmf.validate()?;
        if pmf.is_empty() {
            continue;
        }
        match res {
            None => res = Some(pmf.resolution),
            Some(r) if r != pmf.resolution => {
                return Err(DataError::ResolutionMismatch {
                    a: r,
                    b: pmf.resolution,
                }
                .into())
            }
            Some(_) => {}
        }
        min_power = min_power.min(pmf.min_power);
        max_power = max_power.max(pmf.max_power());
    }

    // Nothing but sentinels: the mixture is itself "no distribution".
    let Some(res) = res else {
        let res = weighted
            .first()
            .map(|(_, p)| p.resolution)
            .unwrap_or(DEFAULT_RESOLUTION);
        return Ok(Pmf::empty(res));
    };

    let num_powers = (max_power - min_power) as usize;
    let mut bins = vec![0.0; res * num_powers];
    let mut expected_mass = 0.0;
    for (weight, pmf) in weighted {
        if pmf.is_empty() {
            continue;
        }
        expected_mass += weight;
        let offset = res * (pmf.min_power - min_power) as usize;
        for (i, &p) in pmf.bins.iter().enumerate() {
            bins[offset + i] += weight * p;
        }
    }

    let out = Pmf::new(min_power, num_powers, res, bins);
    let mass = out.mass();
    if (mass - expected_mass).abs() > PMF_MASS_TOLERANCE {
        warn!(
            n_inputs = weighted.len(),
            expected_mass,
            output_mass = mass,
            "mixture output mass drifted from the summed weights"
        );
    }
    Ok(out)
}
