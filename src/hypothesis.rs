//! The [Pearson chi-square goodness-of-fit test](https://en.wikipedia.org/wiki/Pearson%27s_chi-squared_test):
//! does a sample plausibly come from a given [DistributionSpec](crate::spec::DistributionSpec)?
//!
//! The test is a pure function of its inputs: calling it twice with the same
//! sample, spec and binning produces bit-identical results.
//!

use crate::configuration;
use crate::errors::StatError;
use crate::euclid;
use crate::histogram::{Binning, Histogram};
use crate::sampler::Sample;
use crate::spec::DistributionSpec;

/// The decision of a [chi_square_test] at its significance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The sample is consistent with the spec (the null hypothesis is **not**
    /// rejected). It does not prove the sample comes from the spec.
    Accept,
    /// The sample deviates from the spec more than chance alone explains at
    /// the chosen significance level.
    Reject,
}

/// Everything a [chi_square_test] concluded.
#[derive(Debug, Clone, PartialEq)]
pub struct GofTestResult {
    /// The Pearson statistic `sum((observed - expected)^2 / expected)` over
    /// the bins with positive expected frequency.
    pub statistic: f64,
    /// `k - 1` where `k` is the number of bins. The null here is allways
    /// fully specified, so no degrees are subtracted for estimated
    /// parameters.
    pub degrees_of_freedom: f64,
    /// `P(X >= statistic)` under the null chi-square distribution.
    pub p_value: f64,
    /// The `1 - significance` quantile of the null distribution: the largest
    /// statistic that would still be accepted.
    pub critical_value: f64,
    /// The significance level the decision was taken at.
    pub significance: f64,
    /// `Accept` iff `significance < p_value`.
    pub decision: Decision,
    /// Per-bin terms `(observed - expected)^2 / expected`, aligned with the
    /// histogram's bins (`0.0` for bins with zero expected frequency). Their
    /// sum equals `statistic` exactly.
    pub contributions: Vec<f64>,
    /// The binned data the statistic was computed from.
    pub histogram: Histogram,
}

/// Performs the Pearson chi-square goodness-of-fit test of `sample` against
/// `spec`.
///
/// `sample`: the observed values. \
/// `spec`: the hypothesised distribution. If missing, the spec the sample
/// was drawn from is tested (a self-consistency check). \
/// `binning`: how to partition the range ([Binning::EqualWidth] over the
/// sample range, or explicit [Binning::Edges]). Ignored for discrete specs,
/// wich bin per outcome. \
/// `significance`: the probability of rejecting a true null. If missing, the
/// deafult ([DEFAULT_SIGNIFICANCE](crate::configuration::DEFAULT_SIGNIFICANCE))
/// is used.
///
/// The statistic sums `(o - e)^2 / e` over the bins with `e > 0`; expected
/// frequencies come from CDF differences (or outcome probabilities) rescaled
/// to the observed total. The p value is the null probability of a statistic
/// at least as large; the decision is `Accept` iff `significance < p_value`.
///
/// # Errors
///
/// Will return an error if:
///  - `significance` is not within `0.0 < significance < 1.0` or is not
///    finite ([StatError::InvalidSignificance]).
///  - the binning is degenerate ([StatError::InsufficientBins], see
///    [Histogram::build]).
///  - a bin edge is a NaN ([StatError::NanErr]).
#[bon::builder]
pub fn chi_square_test(
    sample: &Sample,
    spec: Option<&DistributionSpec>,
    binning: &Binning,
    significance: Option<f64>,
) -> Result<GofTestResult, StatError> {
    let significance: f64 = significance.unwrap_or(configuration::DEFAULT_SIGNIFICANCE);
    if !significance.is_finite() || !(0.0 < significance && significance < 1.0) {
        return Err(StatError::InvalidSignificance);
    }

    let spec: &DistributionSpec = spec.unwrap_or_else(|| sample.spec());

    let histogram: Histogram = Histogram::build(sample.values(), spec, binning)?;

    let mut statistic: f64 = 0.0;
    let mut contributions: Vec<f64> = Vec::with_capacity(histogram.bin_count());
    for (&observed, &expected) in histogram.observed().iter().zip(histogram.expected().iter()) {
        if expected <= 0.0 {
            contributions.push(0.0);
            continue;
        }

        let deviation: f64 = observed as f64 - expected;
        let contribution: f64 = deviation * deviation / expected;
        contributions.push(contribution);
        statistic += contribution;
    }

    let degrees_of_freedom: f64 = (histogram.bin_count() - 1) as f64;

    let p_value: f64 = 1.0 - euclid::chi_squared_cdf(statistic, degrees_of_freedom);
    let critical_value: f64 = euclid::chi_squared_quantile(1.0 - significance, degrees_of_freedom);

    let decision: Decision = if significance < p_value {
        Decision::Accept
    } else {
        Decision::Reject
    };

    return Ok(GofTestResult {
        statistic: statistic,
        degrees_of_freedom: degrees_of_freedom,
        p_value: p_value,
        critical_value: critical_value,
        significance: significance,
        decision: decision,
        contributions: contributions,
        histogram: histogram,
    });
}
