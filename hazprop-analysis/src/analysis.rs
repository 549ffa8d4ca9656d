//! Validated, read-only owner of one analysis' inputs.

use hazprop_core::errors::{ConfigError, DataError, HazResult};
use hazprop_core::model::{SourceId, SourceResult, Uncertainty};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::patterns::distinct_branches;

/// Everything one propagation run reads: per-source results, the
/// declared correlated uncertainties, and the shared intensity measure
/// levels. Validated once at construction, immutable afterwards.
#[derive(Debug)]
pub struct Analysis {
    sources: Vec<SourceResult>,
    uncertainties: Vec<Uncertainty>,
    imls: Vec<f64>,
    by_id: FxHashMap<SourceId, usize>,
}

impl Analysis {
    /// Validate and take ownership of the inputs.
    ///
    /// Checks: unique source ids, internally consistent per-source
    /// shapes, one shared investigation time and site/level count, and
    /// for every uncertainty: known sources, in-range path positions,
    /// and one branch cardinality across all correlated sources.
    pub fn new(
        sources: Vec<SourceResult>,
        uncertainties: Vec<Uncertainty>,
        imls: Vec<f64>,
    ) -> HazResult<Self> {
        let mut by_id = FxHashMap::default();
        for (i, source) in sources.iter().enumerate() {
            source.validate()?;
            if by_id.insert(source.id.clone(), i).is_some() {
                return Err(ConfigError::DuplicateSourceId {
                    id: source.id.to_string(),
                }
                .into());
            }
        }

        if let Some(first) = sources.first() {
            for source in &sources[1..] {
                if source.investigation_time != first.investigation_time {
                    return Err(DataError::InvestigationTimeMismatch {
                        source: source.id.to_string(),
                        expected: first.investigation_time,
                        actual: source.investigation_time,
                    }
                    .into());
                }
                if source.n_sites() != first.n_sites() {
                    return Err(DataError::SourceShapeMismatch {
                        source: source.id.to_string(),
                        what: "sites",
                        expected: first.n_sites(),
                        actual: source.n_sites(),
                    }
                    .into());
                }
            }
            for source in &sources {
                if source.n_levels() != imls.len() {
                    return Err(DataError::SourceShapeMismatch {
                        source: source.id.to_string(),
                        what: "levels",
                        expected: imls.len(),
                        actual: source.n_levels(),
                    }
                    .into());
                }
            }
        }

        for unc in &uncertainties {
            let mut cardinality: Option<usize> = None;
            for (sid, &pos) in &unc.ipath {
                let Some(&i) = by_id.get(sid) else {
                    return Err(ConfigError::UnknownSource {
                        index: unc.index,
                        source: sid.to_string(),
                    }
                    .into());
                };
                let branches = distinct_branches(&sources[i], unc.half, pos);
                match cardinality {
                    None => cardinality = Some(branches.len()),
                    Some(expected) if expected != branches.len() => {
                        return Err(ConfigError::BranchCardinalityMismatch {
                            index: unc.index,
                            source: sid.to_string(),
                            expected,
                            actual: branches.len(),
                        }
                        .into())
                    }
                    Some(_) => {}
                }
            }
            if !unc.branch_ids.is_empty() {
                if let Some(actual) = cardinality {
                    if actual != unc.branch_ids.len() {
                        let sid = unc.sources().next().map(|s| s.to_string());
                        return Err(ConfigError::BranchCardinalityMismatch {
                            index: unc.index,
                            source: sid.unwrap_or_default(),
                            expected: unc.branch_ids.len(),
                            actual,
                        }
                        .into());
                    }
                }
            }
        }

        debug!(
            sources = sources.len(),
            uncertainties = uncertainties.len(),
            levels = imls.len(),
            "analysis validated"
        );
        Ok(Self {
            sources,
            uncertainties,
            imls,
            by_id,
        })
    }

    pub fn sources(&self) -> &[SourceResult] {
        &self.sources
    }

    pub fn source(&self, id: &SourceId) -> Option<&SourceResult> {
        self.by_id.get(id).map(|&i| &self.sources[i])
    }

    /// Position of a source in declaration order.
    pub fn source_index(&self, id: &SourceId) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn uncertainties(&self) -> &[Uncertainty] {
        &self.uncertainties
    }

    pub fn imls(&self) -> &[f64] {
        &self.imls
    }

    pub fn n_sites(&self) -> usize {
        self.sources.first().map(|s| s.n_sites()).unwrap_or(0)
    }

    pub fn n_levels(&self) -> usize {
        self.imls.len()
    }

    /// The shared investigation time, in years.
    pub fn investigation_time(&self) -> f64 {
        self.sources
            .first()
            .map(|s| s.investigation_time)
            .unwrap_or(1.0)
    }

    /// Source ids in declaration order.
    pub fn source_ids(&self) -> Vec<SourceId> {
        self.sources.iter().map(|s| s.id.clone()).collect()
    }

    /// Ids of the sources named by at least one correlated uncertainty.
    pub fn correlated_source_ids(&self) -> FxHashSet<SourceId> {
        self.uncertainties
            .iter()
            .flat_map(|u| u.sources().cloned())
            .collect()
    }
}
