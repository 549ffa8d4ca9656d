use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::model::{LogicTreeHalf, SourceId};

/// One declared correlated branch set: an epistemic choice constrained to
/// be identical across the sources it names.
///
/// `ipath` gives, for every correlated source, the character position of
/// this uncertainty inside the relevant half of that source's realization
/// paths (the branch-set ordinal in the source's own logic tree).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Uncertainty {
    pub index: usize,
    pub utype: String,
    pub half: LogicTreeHalf,
    pub branch_ids: Vec<String>,
    pub ipath: FxHashMap<SourceId, usize>,
}

impl Uncertainty {
    /// The sources this uncertainty correlates.
    pub fn sources(&self) -> impl Iterator<Item = &SourceId> {
        self.ipath.keys()
    }

    pub fn source_set(&self) -> FxHashSet<SourceId> {
        self.ipath.keys().cloned().collect()
    }

    pub fn applies_to(&self, source: &SourceId) -> bool {
        self.ipath.contains_key(source)
    }
}
