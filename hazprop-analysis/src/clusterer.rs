//! Correlation-aware source clustering.

use hazprop_core::model::{SourceId, Uncertainty};
use rustc_hash::FxHashSet;

/// The partition of the source-id universe into correlation clusters.
///
/// `ssets[i]` is a maximal group of sources sharing at least one
/// correlated uncertainty; `usets[i]` holds the indices of the
/// uncertainties associated with that group, or `None` for an
/// uncorrelated singleton. The two lists are parallel and the members
/// are kept sorted for deterministic iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clusters {
    pub ssets: Vec<Vec<SourceId>>,
    pub usets: Vec<Option<Vec<usize>>>,
}

impl Clusters {
    pub fn len(&self) -> usize {
        self.ssets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ssets.is_empty()
    }

    /// Iterate `(sset, uset)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&[SourceId], Option<&[usize]>)> {
        self.ssets
            .iter()
            .zip(&self.usets)
            .map(|(s, u)| (s.as_slice(), u.as_deref()))
    }
}

/// Partition `source_ids` into correlation clusters.
///
/// Uncertainties are walked in declaration order; each one's source set
/// is merged into the FIRST existing cluster it intersects, otherwise it
/// starts a new cluster. An uncertainty intersecting two
/// previously-disjoint clusters therefore does NOT union them — clusters
/// that only become connected through a later uncertainty stay separate.
/// Sources named by no uncertainty become singleton clusters with no
/// uncertainty set.
pub fn cluster(uncertainties: &[Uncertainty], source_ids: &[SourceId]) -> Clusters {
    let mut ssets: Vec<FxHashSet<SourceId>> = Vec::new();
    let mut usets: Vec<FxHashSet<usize>> = Vec::new();

    for unc in uncertainties {
        let sources = unc.source_set();
        let hit = ssets
            .iter()
            .position(|sset| !sset.is_disjoint(&sources));
        match hit {
            Some(i) => {
                ssets[i].extend(sources);
                usets[i].insert(unc.index);
            }
            None => {
                ssets.push(sources);
                usets.push(FxHashSet::from_iter([unc.index]));
            }
        }
    }

    let mut out = Clusters {
        ssets: Vec::with_capacity(ssets.len()),
        usets: Vec::with_capacity(usets.len()),
    };
    for (sset, uset) in ssets.into_iter().zip(usets) {
        let mut sset: Vec<SourceId> = sset.into_iter().collect();
        sset.sort();
        let mut uset: Vec<usize> = uset.into_iter().collect();
        uset.sort_unstable();
        out.ssets.push(sset);
        out.usets.push(Some(uset));
    }

    // Sources not covered by any correlated uncertainty.
    for sid in source_ids {
        if !out.ssets.iter().any(|sset| sset.contains(sid)) {
            out.ssets.push(vec![sid.clone()]);
            out.usets.push(None);
        }
    }
    out
}
