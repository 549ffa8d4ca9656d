//! The propagation orchestrator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hazprop_analysis::{cluster, get_patterns, get_realization_groups};
use hazprop_analysis::{Analysis, Clusters, RealizationGroups};
use hazprop_core::config::{Mode, PropagationConfig};
use hazprop_core::constants::PMF_MASS_TOLERANCE;
use hazprop_core::errors::{DataError, HazResult};
use hazprop_core::model::{Pmf, SourceId};
use hazprop_hist::afe::poe_to_afe;
use hazprop_hist::binning::pmf_from_values;
use hazprop_hist::{convolve, mixture};
use hazprop_sampling::{SampleResult, SamplingEngine};
use tracing::{debug, info};

use crate::scenario::{admissible_indices, enumerate_scenarios};

/// Result of one propagation run for one intensity measure.
#[derive(Debug)]
pub enum PropagationOutput {
    /// Convolution mode: one aggregate PMF per `[site][level]`.
    Histograms(Vec<Vec<Pmf>>),
    /// Sampling mode: the shared sample matrix.
    Samples(SampleResult),
}

/// Sequences clustering, realization selection, and per-cluster
/// aggregation for one intensity measure (or disaggregation cell set).
///
/// Cluster results are statistically independent, so convolution mode
/// convolves them together while sampling mode concatenates them into
/// the shared sample matrix. The run is single-threaded and synchronous;
/// parallelism across (cluster, level) is a caller-side option.
#[derive(Debug)]
pub struct Propagator {
    analysis: Analysis,
    config: PropagationConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl Propagator {
    pub fn new(analysis: Analysis, config: PropagationConfig) -> HazResult<Self> {
        config.validate()?;
        Ok(Self {
            analysis,
            config,
            cancel: None,
        })
    }

    /// Install a cooperative cancellation flag. It is checked between
    /// cluster iterations only, never inside an in-progress convolution
    /// or sampling draw.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn analysis(&self) -> &Analysis {
        &self.analysis
    }

    pub fn config(&self) -> &PropagationConfig {
        &self.config
    }

    /// Run the full propagation.
    pub fn run(&self) -> HazResult<PropagationOutput> {
        let clusters = cluster(self.analysis.uncertainties(), &self.analysis.source_ids());
        let patterns = get_patterns(&self.analysis);
        let groups = get_realization_groups(&self.analysis, &patterns)?;
        info!(
            imt = %self.config.imt,
            clusters = clusters.len(),
            mode = ?self.config.mode,
            "propagating epistemic uncertainties"
        );

        match self.config.mode {
            Mode::Sampling { n_samples, seed } => {
                let mut engine = SamplingEngine::new(seed);
                let samples = engine.sample(&clusters, &groups, &self.analysis, n_samples)?;
                Ok(PropagationOutput::Samples(samples))
            }
            Mode::Convolution { resolution } => {
                let histograms = self.run_convolution(&clusters, &groups, resolution)?;
                Ok(PropagationOutput::Histograms(histograms))
            }
        }
    }

    fn run_convolution(
        &self,
        clusters: &Clusters,
        groups: &RealizationGroups,
        resolution: usize,
    ) -> HazResult<Vec<Vec<Pmf>>> {
        let n_sites = self.analysis.n_sites();
        let n_levels = self.analysis.n_levels();
        let mut out =
            vec![vec![Pmf::empty(resolution); n_levels]; n_sites];

        for (c, (sset, uset)) in clusters.iter().enumerate() {
            self.check_cancelled()?;
            debug!(cluster = c, sources = sset.len(), "convolving cluster");
            for site in 0..n_sites {
                for level in 0..n_levels {
                    let pmf = match uset {
                        None => self.direct_pmf(&sset[0], site, level, resolution)?,
                        Some(uset) => self
                            .correlated_pmf(sset, uset, groups, site, level, resolution)?,
                    };
                    // Empty operands act as the identity, so the first
                    // cluster seeds the accumulator.
                    let combined = convolve(&out[site][level], &pmf, Some(resolution))?;
                    self.enforce_mass(&combined)?;
                    out[site][level] = combined;
                }
            }
        }
        Ok(out)
    }

    /// PMF of a single uncorrelated source at one (site, level): its
    /// realization AfE values binned by logic-tree weight.
    fn direct_pmf(
        &self,
        sid: &SourceId,
        site: usize,
        level: usize,
        resolution: usize,
    ) -> HazResult<Pmf> {
        let Some(source) = self.analysis.source(sid) else {
            return Ok(Pmf::empty(resolution));
        };
        let t = source.investigation_time;
        let afes: Vec<f64> = (0..source.n_realizations())
            .map(|r| poe_to_afe(source.poes[[site, r, level]], t))
            .collect();
        pmf_from_values(&afes, &source.weights, resolution)
    }

    /// PMF of a correlated cluster at one (site, level): per scenario,
    /// convolve the sources' conditional distributions, then mix the
    /// scenarios by weight.
    fn correlated_pmf(
        &self,
        sset: &[SourceId],
        uset: &[usize],
        groups: &RealizationGroups,
        site: usize,
        level: usize,
        resolution: usize,
    ) -> HazResult<Pmf> {
        let scenarios = enumerate_scenarios(sset, uset, groups);
        let mut weighted = Vec::with_capacity(scenarios.len());

        for scenario in &scenarios {
            let mut acc = Pmf::empty(resolution);
            for sid in sset {
                let Some(source) = self.analysis.source(sid) else {
                    continue;
                };
                let idxs = admissible_indices(source, uset, &scenario.choices, groups);
                if idxs.is_empty() {
                    return Err(DataError::EmptyAdmissibleSet {
                        source: sid.to_string(),
                    }
                    .into());
                }
                let t = source.investigation_time;
                let afes: Vec<f64> = idxs
                    .iter()
                    .map(|&r| poe_to_afe(source.poes[[site, r, level]], t))
                    .collect();
                let total: f64 = idxs.iter().map(|&r| source.weights[r]).sum();
                let conditional: Vec<f64> = idxs
                    .iter()
                    .map(|&r| source.weights[r] / total)
                    .collect();
                let pmf = pmf_from_values(&afes, &conditional, resolution)?;
                acc = convolve(&acc, &pmf, Some(resolution))?;
                self.enforce_mass(&acc)?;
            }
            weighted.push((scenario.weight, acc));
        }
        // The mixture may legitimately carry less than unit mass when a
        // scenario contributed the empty sentinel, so strict tolerance
        // is not enforced on it.
        mixture(&weighted)
    }

    /// Escalate discretization drift to a fatal error under strict
    /// tolerance; otherwise the convolution/mixture warning suffices.
    fn enforce_mass(&self, pmf: &Pmf) -> HazResult<()> {
        if self.config.strict_tolerance && !pmf.is_empty() {
            let mass = pmf.mass();
            if (mass - 1.0).abs() > PMF_MASS_TOLERANCE {
                return Err(DataError::MassDrift { sum: mass }.into());
            }
        }
        Ok(())
    }

    fn check_cancelled(&self) -> HazResult<()> {
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Err(DataError::Cancelled.into());
            }
        }
        Ok(())
    }
}
