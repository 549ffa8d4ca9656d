/// hazprop system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Annual frequencies of exceedance below this magnitude are negligible.
pub const NEGLIGIBLE_AFE: f64 = 1e-20;

/// Negligible values are nudged to `NEGLIGIBLE_AFE * NEGLIGIBLE_NUDGE`
/// so that logarithms stay finite.
pub const NEGLIGIBLE_NUDGE: f64 = 1.01;

/// Tolerance on the total probability mass of a PMF.
pub const PMF_MASS_TOLERANCE: f64 = 1e-6;

/// Probabilities of exceedance are clipped here before the AfE transform;
/// `-ln(1 - poe)` diverges at 1.
pub const MAX_POE: f64 = 0.99999;

/// Decimal places kept when rounding correlated group weights.
pub const WEIGHT_DECIMALS: u32 = 2;

/// Default samples per decade for log-binned histograms.
pub const DEFAULT_RESOLUTION: usize = 25;
