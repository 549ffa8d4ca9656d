//! # hazprop-hist
//!
//! Log-scale histogram primitives for annual-frequency-of-exceedance
//! distributions:
//! - Binning: decade-range detection, log-spaced edge generation,
//!   weighted histograms
//! - Convolution: PMF of the sum of two independent sources, with
//!   automatic rebinning
//! - Mixture: weighted sum of alternative correlated scenarios
//! - AfE: probability-of-exceedance conversions
//! - Stats: mean and quantiles computed directly from the histograms

pub mod afe;
pub mod binning;
pub mod convolve;
pub mod mixture;
pub mod stats;

pub use afe::{afe_to_poe, poe_to_afe};
pub use binning::{bin_edges, bin_range, histogram, midpoints, pmf_from_values, BinScale};
pub use convolve::convolve;
pub use mixture::mixture;
pub use stats::{get_stats, Statistic};
