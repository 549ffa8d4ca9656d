//! Statistics computed directly from log-binned histogram sets.

use hazprop_core::model::Pmf;
use ndarray::Array2;

use crate::binning::midpoints;

/// A statistic of an AfE distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Statistic {
    Mean,
    /// Quantile level in (0, 1), e.g. `Quantile(0.5)` for the median.
    Quantile(f64),
}

/// Compute `stats` for each PMF in `pmfs` (one PMF per level).
///
/// Returns a `[level, statistic]` array. The mean is the
/// probability-weighted sum of the bin midpoints; a quantile is
/// the midpoint of the first bin where the cumulative mass reaches the
/// requested level. Empty sentinel PMFs yield 0.
pub fn get_stats(stats: &[Statistic], pmfs: &[Pmf]) -> Array2<f64> {
    let mut out = Array2::zeros((pmfs.len(), stats.len()));
    for (l, pmf) in pmfs.iter().enumerate() {
        if pmf.is_empty() {
            continue;
        }
        let mids = midpoints(pmf.min_power, pmf.resolution, pmf.num_powers);
        for (s, stat) in stats.iter().enumerate() {
            out[(l, s)] = match stat {
                Statistic::Mean => pmf
                    .bins
                    .iter()
                    .zip(&mids)
                    .map(|(p, m)| p * m)
                    .sum(),
                Statistic::Quantile(q) => quantile(pmf, &mids, *q),
            };
        }
    }
    out
}

fn quantile(pmf: &Pmf, mids: &[f64], q: f64) -> f64 {
    let mut cumulative = 0.0;
    for (p, m) in pmf.bins.iter().zip(mids) {
        cumulative += p;
        if cumulative >= q {
            return *m;
        }
    }
    // Mass tolerance can leave the cumulative sum marginally short.
    mids.last().copied().unwrap_or(0.0)
}
