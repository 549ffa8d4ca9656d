use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_RESOLUTION;
use crate::errors::{ConfigError, HazResult};

/// How per-source distributions are combined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Exact discrete convolution of log-binned PMFs.
    Convolution { resolution: usize },
    /// Correlation-preserving weighted Monte-Carlo sampling.
    Sampling { n_samples: usize, seed: u64 },
}

/// Shape of the per-source results being propagated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisType {
    #[serde(rename = "hcurves")]
    HCurves,
    #[serde(rename = "mag")]
    Mag,
    #[serde(rename = "mag-dist")]
    MagDist,
    #[serde(rename = "mag-dist-eps")]
    MagDistEps,
}

/// Configuration of one propagation run (one intensity measure).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropagationConfig {
    /// Intensity measure type the inputs were selected for.
    pub imt: String,
    pub analysis_type: AnalysisType,
    pub mode: Mode,
    /// Escalate numeric-tolerance drift from a logged warning to a fatal
    /// data error.
    pub strict_tolerance: bool,
}

impl PropagationConfig {
    pub fn validate(&self) -> HazResult<()> {
        match self.mode {
            Mode::Convolution { resolution } if resolution == 0 => {
                Err(ConfigError::ZeroResolution.into())
            }
            Mode::Sampling { n_samples, .. } if n_samples == 0 => {
                Err(ConfigError::ZeroSamples.into())
            }
            _ => Ok(()),
        }
    }
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            imt: "PGA".to_string(),
            analysis_type: AnalysisType::HCurves,
            mode: Mode::Convolution {
                resolution: DEFAULT_RESOLUTION,
            },
            strict_tolerance: false,
        }
    }
}
