use std::fmt;

use ndarray::Array3;
use serde::{Deserialize, Serialize};

use crate::errors::{DataError, HazResult};
use crate::model::RealizationPath;

/// Identifier of one independently computed seismic source.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SourceId(String);

impl SourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The result of one per-source hazard or disaggregation calculation:
/// the full set of logic-tree realizations with their weights, paths and
/// probabilities of exceedance.
///
/// `poes` is indexed `[site, realization, level]` where a level is an
/// intensity measure level for hazard curves, or one flattened
/// disaggregation cell. All arrays refer to a single intensity measure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceResult {
    pub id: SourceId,
    pub investigation_time: f64,
    pub weights: Vec<f64>,
    pub paths: Vec<RealizationPath>,
    pub poes: Array3<f64>,
}

impl SourceResult {
    pub fn n_sites(&self) -> usize {
        self.poes.shape()[0]
    }

    pub fn n_realizations(&self) -> usize {
        self.weights.len()
    }

    pub fn n_levels(&self) -> usize {
        self.poes.shape()[2]
    }

    /// Check that weights, paths and the realization axis of `poes` agree.
    pub fn validate(&self) -> HazResult<()> {
        let n = self.weights.len();
        if self.paths.len() != n {
            return Err(DataError::SourceShapeMismatch {
                source: self.id.to_string(),
                what: "paths",
                expected: n,
                actual: self.paths.len(),
            }
            .into());
        }
        if self.poes.shape()[1] != n {
            return Err(DataError::SourceShapeMismatch {
                source: self.id.to_string(),
                what: "poes realizations",
                expected: n,
                actual: self.poes.shape()[1],
            }
            .into());
        }
        Ok(())
    }
}
