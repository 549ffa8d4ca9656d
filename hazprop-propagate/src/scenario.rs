//! Enumeration of correlated scenarios for one source cluster.
//!
//! A scenario is one combination of group choices, one choice per
//! correlated uncertainty of the cluster. Scenarios are mutually
//! exclusive alternatives: their per-level distributions are combined by
//! weighted mixture, not convolution.

use hazprop_analysis::RealizationGroups;
use hazprop_core::model::{SourceId, SourceResult};

/// One combination of correlated group choices, with its weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    /// Group choice per uncertainty, parallel to the cluster's `uset`.
    pub choices: Vec<usize>,
    pub weight: f64,
}

/// Enumerate every scenario of a correlated cluster: the Cartesian
/// product of per-uncertainty group choices.
///
/// The weight of a group under one uncertainty is the mean of its summed
/// realization weights over the sources the uncertainty covers, so the
/// per-uncertainty weights still sum to one and the scenario weights
/// (products across uncertainties) do too.
pub fn enumerate_scenarios(
    sset: &[SourceId],
    uset: &[usize],
    groups: &RealizationGroups,
) -> Vec<Scenario> {
    let mut per_unc: Vec<Vec<f64>> = Vec::with_capacity(uset.len());
    for &u in uset {
        let covered: Vec<_> = sset.iter().filter_map(|sid| groups.get(u, sid)).collect();
        if covered.is_empty() {
            per_unc.push(vec![1.0]);
            continue;
        }
        let mut weights = vec![0.0; covered[0].n_groups()];
        for set in &covered {
            for (w, gw) in weights.iter_mut().zip(&set.weights) {
                *w += gw;
            }
        }
        for w in &mut weights {
            *w /= covered.len() as f64;
        }
        per_unc.push(weights);
    }

    let mut scenarios = vec![Scenario {
        choices: Vec::new(),
        weight: 1.0,
    }];
    for weights in &per_unc {
        let mut next = Vec::with_capacity(scenarios.len() * weights.len());
        for scenario in &scenarios {
            for (g, &gw) in weights.iter().enumerate() {
                let mut choices = scenario.choices.clone();
                choices.push(g);
                next.push(Scenario {
                    choices,
                    weight: scenario.weight * gw,
                });
            }
        }
        scenarios = next;
    }
    scenarios
}

/// Realization indices of `source` admitted by a scenario: the
/// intersection of the chosen group of every uncertainty that applies to
/// the source. Uncertainties not covering the source do not constrain
/// it.
pub fn admissible_indices(
    source: &SourceResult,
    uset: &[usize],
    choices: &[usize],
    groups: &RealizationGroups,
) -> Vec<usize> {
    let n_rlzs = source.n_realizations();
    let mut admissible = vec![true; n_rlzs];
    for (&u, &choice) in uset.iter().zip(choices) {
        let Some(set) = groups.get(u, &source.id) else {
            continue;
        };
        let mut mask = vec![false; n_rlzs];
        for &i in &set.indices[choice] {
            mask[i] = true;
        }
        for (a, m) in admissible.iter_mut().zip(&mask) {
            *a &= m;
        }
    }
    admissible
        .iter()
        .enumerate()
        .filter_map(|(i, &ok)| ok.then_some(i))
        .collect()
}
