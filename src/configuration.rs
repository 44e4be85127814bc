
//! This file contains the deafult values and other value choices used trough the library.
//!

/// Tolerance used when checking that the probabilities of a discrete outcome
/// table sum to 1.
///
/// If the sum differs from 1 by more than this amount, the table is
/// renormalized (each probability is divided by the sum). This is a silent
/// correction, not an error: relative weights are preserved and the last
/// cumulative bound is forced to exactly `1.0` afterwards.
pub static PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

/// The deafult significance level (alpha) for the chi-square goodness-of-fit
/// test when the caller does not provide one.
///
/// The decision rule is `Accept` iff `significance < p_value`, wich for this
/// value is equivalent to comparing the statistic against the 0.95 quantile of
/// the null chi-square distribution.
pub static DEFAULT_SIGNIFICANCE: f64 = 0.05;

/// Relative-error threshold (in percent) under wich a discrepancy report is
/// classified as [Good](crate::discrepancy::Classification::Good).
///
/// All the compared moments must be under the threshold.
pub static GOOD_RELATIVE_ERROR_PERCENT: f64 = 5.0;

/// Relative-error threshold (in percent) under wich a discrepancy report is
/// classified as [Acceptable](crate::discrepancy::Classification::Acceptable)
/// (when it did not already qualify as `Good`). Anything worse is
/// [Poor](crate::discrepancy::Classification::Poor).
pub static ACCEPTABLE_RELATIVE_ERROR_PERCENT: f64 = 10.0;

/// Maximum number of outcomes for wich the discrete sampler scans the
/// cumulative table linearly.
///
/// Beyond this many outcomes a binary search over the cumulative bounds is
/// used instead. Both strategies implement the exact same tie-break rule
/// (`u < c_i` selects outcome `i`), so the results are identical.
pub static LINEAR_SCAN_MAX_OUTCOMES: usize = 32;

/// Numerical parameters for the special functions in [crate::euclid].
pub mod numerics {

    /// Convergence criterion for the incomplete-gamma series and continued
    /// fraction expansions.
    pub static INCOMPLETE_GAMMA_EPS: f64 = 1e-14;

    /// Maximum number of iterations for the incomplete-gamma series and
    /// continued fraction expansions. Convergence is normally reached in
    /// well under 100 iterations for any realistic degrees of freedom.
    pub static INCOMPLETE_GAMMA_MAX_ITERS: usize = 256;

    /// Number of Newton refinement steps applied to the Wilson-Hilferty
    /// starting point when inverting the chi-square CDF.
    pub static CHI_SQUARED_QUANTILE_NEWTON_STEPS: usize = 24;
}
