//! Mathematical constants and analysis defaults

/// 0.5 ln(2π)
pub const HALF_LN_2PI: f64 = 0.918_938_533_204_672_7;

/// Default significance level
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Expected cell counts below this value make the χ² approximation suspect
pub const MIN_EXPECTED_COUNT: f64 = 5.0;

/// Cochran's rule: at most this share of cells may fall below
/// [`MIN_EXPECTED_COUNT`]
pub const MAX_LOW_EXPECTED_SHARE: f64 = 0.2;

/// Tables with fewer observations than this are treated as small samples
/// by the method recommender
pub const SMALL_SAMPLE_SIZE: u64 = 20;

/// Relative tolerance used when collecting tables that are no more probable
/// than the observed one in the two-sided Fisher test. Guards against
/// floating point ties.
pub const FISHER_REL_TOL: f64 = 1.0 + 1E-7;

/// Yates' continuity correction
pub const YATES_CORRECTION: f64 = 0.5;
