use serde::{Deserialize, Serialize};

use crate::constants::PMF_MASS_TOLERANCE;
use crate::errors::DataError;

/// A discretized annual-frequency-of-exceedance distribution over
/// log-spaced bins: `resolution` bins per decade, `num_powers` decades
/// starting at `10^min_power`.
///
/// The empty sentinel (`bins.is_empty()`) means "no distribution": every
/// value that fed the histogram was negligible, and the PMF contributes
/// nothing when convolved or mixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pmf {
    pub min_power: i32,
    pub num_powers: usize,
    pub resolution: usize,
    pub bins: Vec<f64>,
}

impl Pmf {
    pub fn new(min_power: i32, num_powers: usize, resolution: usize, bins: Vec<f64>) -> Self {
        Self {
            min_power,
            num_powers,
            resolution,
            bins,
        }
    }

    /// The "no distribution" sentinel.
    pub fn empty(resolution: usize) -> Self {
        Self {
            min_power: 0,
            num_powers: 0,
            resolution,
            bins: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Total probability mass.
    pub fn mass(&self) -> f64 {
        self.bins.iter().sum()
    }

    /// Exclusive upper power of the covered range, `min_power + num_powers`.
    pub fn max_power(&self) -> i32 {
        self.min_power + self.num_powers as i32
    }

    /// Check the structural invariants: `bins.len() == num_powers *
    /// resolution` and unit mass within tolerance. The empty sentinel is
    /// always valid.
    pub fn validate(&self) -> Result<(), DataError> {
        if self.is_empty() {
            return Ok(());
        }
        let expected = self.num_powers * self.resolution;
        if self.bins.len() != expected {
            return Err(DataError::PmfLengthMismatch {
                expected,
                actual: self.bins.len(),
            });
        }
        let sum = self.mass();
        if (sum - 1.0).abs() > PMF_MASS_TOLERANCE {
            return Err(DataError::PmfMassNotUnit {
                sum,
                tolerance: PMF_MASS_TOLERANCE,
            });
        }
        Ok(())
    }
}
