//! Correlation-preserving Monte-Carlo sampling.

use hazprop_analysis::{Analysis, Clusters, RealizationGroups};
use hazprop_core::constants::WEIGHT_DECIMALS;
use hazprop_core::errors::{DataError, HazResult, SamplingError};
use hazprop_core::model::SourceId;
use hazprop_hist::afe::poes_to_afes;
use ndarray::{s, Array4};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::weights::normalize_rounded_weights;

/// Output of one sampling run.
#[derive(Debug, Clone)]
pub struct SampleResult {
    /// Intensity measure levels (or flattened disaggregation cells).
    pub imls: Vec<f64>,
    /// Sampled annual frequencies of exceedance,
    /// indexed `[site, source, sample, level]`.
    pub afes: Array4<f64>,
    /// Per-sample product of the drawn realizations' logic-tree weights.
    pub weights: Vec<f64>,
}

/// Draws weighted realization samples per source while keeping
/// correlated uncertainties identical across the sources they bind.
///
/// The RNG is owned by the instance and seeded once: identical inputs
/// and an identical seed reproduce the drawn index sequences exactly.
pub struct SamplingEngine {
    rng: StdRng,
}

impl SamplingEngine {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw `n_samples` correlation-preserving samples for every source.
    ///
    /// Uncorrelated sources draw independent weighted categorical
    /// realization indices. For a correlated cluster, each correlated
    /// uncertainty draws ONE group choice per sample, shared by every
    /// source in the cluster; per source and sample the admissible
    /// realizations are the intersection over its correlated group
    /// choices, and one is drawn by renormalized weight.
    pub fn sample(
        &mut self,
        clusters: &Clusters,
        groups: &RealizationGroups,
        analysis: &Analysis,
        n_samples: usize,
    ) -> HazResult<SampleResult> {
        let n_sites = analysis.n_sites();
        let n_levels = analysis.n_levels();
        let n_sources = analysis.sources().len();

        let mut afes = Array4::zeros((n_sites, n_sources, n_samples, n_levels));
        let mut weights = vec![1.0; n_samples];

        for (sset, uset) in clusters.iter() {
            match uset {
                None => {
                    self.sample_uncorrelated(&sset[0], analysis, &mut afes, &mut weights)?
                }
                Some(uset) => self.sample_correlated(
                    sset,
                    uset,
                    groups,
                    analysis,
                    &mut afes,
                    &mut weights,
                )?,
            }
        }

        Ok(SampleResult {
            imls: analysis.imls().to_vec(),
            afes,
            weights,
        })
    }

    fn sample_uncorrelated(
        &mut self,
        sid: &SourceId,
        analysis: &Analysis,
        afes: &mut Array4<f64>,
        weights: &mut [f64],
    ) -> HazResult<()> {
        let Some(source) = analysis.source(sid) else {
            debug!(source = %sid, "source missing from analysis, skipping");
            return Ok(());
        };
        let spos = analysis.source_index(sid).unwrap_or(0);
        let source_afes = poes_to_afes(&source.poes, source.investigation_time);
        let dist = categorical(&source.weights)?;
        for k in 0..weights.len() {
            let idx = dist.sample(&mut self.rng);
            weights[k] *= source.weights[idx];
            afes.slice_mut(s![.., spos, k, ..])
                .assign(&source_afes.slice(s![.., idx, ..]));
        }
        Ok(())
    }

    fn sample_correlated(
        &mut self,
        sset: &[SourceId],
        uset: &[usize],
        groups: &RealizationGroups,
        analysis: &Analysis,
        afes: &mut Array4<f64>,
        weights: &mut [f64],
    ) -> HazResult<()> {
        let n_samples = weights.len();

        // One shared group choice per correlated uncertainty per sample,
        // weighted by the rounded per-group summed realization weight.
        let mut choices: FxHashMap<usize, Vec<usize>> = FxHashMap::default();
        for &u in uset {
            let Some(set) = sset.iter().find_map(|sid| groups.get(u, sid)) else {
                continue;
            };
            let group_weights = normalize_rounded_weights(&set.weights, WEIGHT_DECIMALS)?;
            let dist = categorical(&group_weights)?;
            let drawn = (0..n_samples).map(|_| dist.sample(&mut self.rng)).collect();
            choices.insert(u, drawn);
        }

        for sid in sset {
            let Some(source) = analysis.source(sid) else {
                debug!(source = %sid, "source missing from analysis, skipping");
                continue;
            };
            let spos = analysis.source_index(sid).unwrap_or(0);
            let source_afes = poes_to_afes(&source.poes, source.investigation_time);
            let n_rlzs = source.n_realizations();

            // Membership masks per applicable uncertainty and group.
            let mut applicable: Vec<(Vec<Vec<bool>>, &[usize])> = Vec::new();
            for &u in uset {
                let (Some(set), Some(drawn)) = (groups.get(u, sid), choices.get(&u)) else {
                    continue;
                };
                let masks = membership_masks(set.indices.as_slice(), n_rlzs);
                applicable.push((masks, drawn.as_slice()));
            }

            for k in 0..n_samples {
                let mut admissible = vec![true; n_rlzs];
                for (masks, drawn) in &applicable {
                    for (a, m) in admissible.iter_mut().zip(&masks[drawn[k]]) {
                        *a &= m;
                    }
                }
                let idxs: Vec<usize> = admissible
                    .iter()
                    .enumerate()
                    .filter_map(|(i, &ok)| ok.then_some(i))
                    .collect();
                if idxs.is_empty() {
                    return Err(DataError::EmptyAdmissibleSet {
                        source: sid.to_string(),
                    }
                    .into());
                }
                let admissible_weights: Vec<f64> =
                    idxs.iter().map(|&i| source.weights[i]).collect();
                let dist = categorical(&admissible_weights)?;
                let idx = idxs[dist.sample(&mut self.rng)];
                weights[k] *= source.weights[idx];
                afes.slice_mut(s![.., spos, k, ..])
                    .assign(&source_afes.slice(s![.., idx, ..]));
            }
        }
        Ok(())
    }
}

/// Weighted categorical distribution over indices; `WeightedIndex`
/// renormalizes internally.
fn categorical(weights: &[f64]) -> Result<WeightedIndex<f64>, SamplingError> {
    WeightedIndex::new(weights.iter().copied()).map_err(|e| SamplingError::InvalidWeights {
        reason: e.to_string(),
    })
}

/// One boolean membership mask per group over the realization range.
fn membership_masks(groups: &[Vec<usize>], n_rlzs: usize) -> Vec<Vec<bool>> {
    groups
        .iter()
        .map(|group| {
            let mut mask = vec![false; n_rlzs];
            for &i in group {
                mask[i] = true;
            }
            mask
        })
        .collect()
}
