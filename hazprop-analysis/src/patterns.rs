//! Wildcard selection of realizations from logic-tree paths.

use hazprop_core::errors::{DataError, HazResult};
use hazprop_core::model::{LogicTreeHalf, Pattern, SourceId, SourceResult};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::analysis::Analysis;

/// Per-uncertainty, per-source pattern lists, in uncertainty declaration
/// order.
pub type PatternsBySource = Vec<FxHashMap<SourceId, Vec<Pattern>>>;

/// The distinct branch characters observed at one path position of one
/// source, sorted.
pub(crate) fn distinct_branches(
    source: &SourceResult,
    half: LogicTreeHalf,
    position: usize,
) -> Vec<char> {
    let mut seen: Vec<char> = source
        .paths
        .iter()
        .filter_map(|p| p.half(half).get(position).copied())
        .collect::<FxHashSet<char>>()
        .into_iter()
        .collect();
    seen.sort_unstable();
    seen
}

/// Build the wildcard patterns that select realizations per branch of
/// each declared uncertainty: one pattern per distinct branch character
/// observed at the uncertainty's path position, literal there, anything
/// elsewhere.
pub fn get_patterns(analysis: &Analysis) -> PatternsBySource {
    let mut out = Vec::with_capacity(analysis.uncertainties().len());
    for unc in analysis.uncertainties() {
        debug!(index = unc.index, utype = %unc.utype, "creating patterns");
        let mut per_source = FxHashMap::default();
        for (sid, &position) in &unc.ipath {
            let Some(source) = analysis.source(sid) else {
                continue; // unknown sources are rejected at Analysis::new
            };
            let patterns: Vec<Pattern> = distinct_branches(source, unc.half, position)
                .into_iter()
                .map(|literal| Pattern::new(unc.half, position, literal))
                .collect();
            per_source.insert(sid.clone(), patterns);
        }
        out.push(per_source);
    }
    out
}

/// Ordered realization-index groups for one `(uncertainty, source)`
/// pair: one group per branch pattern, with the summed realization
/// weight of each group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSet {
    pub indices: Vec<Vec<usize>>,
    pub weights: Vec<f64>,
}

impl GroupSet {
    pub fn n_groups(&self) -> usize {
        self.indices.len()
    }
}

/// Map from `(uncertainty index, source id)` to that source's ordered
/// realization-index groups. For every entry the groups partition the
/// source's full realization-index range — validated at construction.
#[derive(Debug, Clone, Default)]
pub struct RealizationGroups {
    groups: FxHashMap<(usize, SourceId), GroupSet>,
}

impl RealizationGroups {
    pub fn get(&self, uncertainty: usize, source: &SourceId) -> Option<&GroupSet> {
        self.groups.get(&(uncertainty, source.clone()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Resolve the patterns to realization-index groups.
///
/// Fails loudly on a pattern matching zero realizations — an empty group
/// must never pass silently downstream — and on groups that do not
/// partition a source's realization range.
pub fn get_realization_groups(
    analysis: &Analysis,
    patterns: &PatternsBySource,
) -> HazResult<RealizationGroups> {
    let mut groups = FxHashMap::default();
    for (unc, per_source) in analysis.uncertainties().iter().zip(patterns) {
        for (sid, source_patterns) in per_source {
            let Some(source) = analysis.source(sid) else {
                continue;
            };
            let mut set = GroupSet {
                indices: Vec::with_capacity(source_patterns.len()),
                weights: Vec::with_capacity(source_patterns.len()),
            };
            for pattern in source_patterns {
                let mut idxs = Vec::new();
                let mut weight = 0.0;
                for (i, path) in source.paths.iter().enumerate() {
                    if pattern.matches(path) {
                        idxs.push(i);
                        weight += source.weights[i];
                    }
                }
                if idxs.is_empty() {
                    return Err(DataError::EmptyPatternMatch {
                        pattern: pattern.to_string(),
                        source: sid.to_string(),
                    }
                    .into());
                }
                set.indices.push(idxs);
                set.weights.push(weight);
            }

            let n_rlzs = source.n_realizations();
            let covered: FxHashSet<usize> =
                set.indices.iter().flatten().copied().collect();
            let total: usize = set.indices.iter().map(|g| g.len()).sum();
            if covered.len() != n_rlzs || total != n_rlzs {
                return Err(DataError::GroupsNotPartition {
                    index: unc.index,
                    source: sid.to_string(),
                    n_rlzs,
                }
                .into());
            }
            groups.insert((unc.index, sid.clone()), set);
        }
    }
    Ok(RealizationGroups { groups })
}
