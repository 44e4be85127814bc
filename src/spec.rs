//! The distribution specifications that drive the engine.
//!
//! A [DistributionSpec] is a tagged value: either a [ContinuousModel] with a
//! closed-form inverse CDF, or a [DiscreteSpec] with a finite outcome table.
//! There is no trait object and no shared mutable state: every method is a
//! pure function of the specification and its argument, so a spec can be
//! evaluated from many threads at once.
//!
//! The closed-form models all satisfy the same contract: `inverse_cdf` is a
//! monotone (non-decreasing) map from `(0, 1)` onto the support, and `cdf` is
//! its inverse.
//!

use std::num::FpCategory;

use crate::configuration;
use crate::errors::SpecError;

/// A closed real interval `[lower, upper]` used as the support of a
/// distribution. Infinite endpoints are allowed (the normal distribution has
/// support `[-inf, inf]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    /// Returns true if `x` belongs to the interval (endpoints included).
    ///
    /// Inverse CDF values can land exactly on an endpoint after rounding
    /// (`u = 0` or `u` very close to 1), so the check is inclusive.
    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        return self.lower <= x && x <= self.upper;
    }
}

/// A continuous distribution with a closed-form inverse CDF.
///
/// The concrete variants cover the models of the simulation exercises this
/// engine was built for; [ContinuousModel::Custom] is the escape hatch for
/// anything else with a closed form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContinuousModel {
    /// The [continuous uniform distribution](https://en.wikipedia.org/wiki/Continuous_uniform_distribution)
    /// on `[a, b]`.
    Uniform { a: f64, b: f64 },
    /// The [normal distribution](https://en.wikipedia.org/wiki/Normal_distribution)
    /// with mean `mean` and standard deviation `std_dev`.
    ///
    /// Note that the sampler does **not** invert the CDF for this variant: it
    /// delegates to [RandomSource::normal](crate::random_source::RandomSource::normal).
    /// The [inverse_cdf](ContinuousModel::inverse_cdf) implementation (Acklam's
    /// approximation) is still provided so the variant honors the common
    /// contract.
    Normal { mean: f64, std_dev: f64 },
    /// The distribution with density `3*x^2` on `(0, 1]`.
    ///
    /// CDF `x^3`, inverse CDF `u^(1/3)`, mean `3/4`, variance `3/80`.
    Cubic,
    /// The distribution with density `6/(pi*sqrt(1-x^2))` on `(1/2, sqrt(3)/2)`.
    ///
    /// A slice of the [arcsine-type](https://en.wikipedia.org/wiki/Arcsine_distribution)
    /// density: CDF `(6/pi)*(asin(x) - pi/6)`, inverse CDF `sin(pi*(1+u)/6)`,
    /// mean `(3/pi)*(sqrt(3) - 1)`, second moment `1/2`.
    Arcsine,
    /// The [reciprocal distribution](https://en.wikipedia.org/wiki/Reciprocal_distribution)
    /// with density `1/(x*ln(b/a))` on `(a, b)`, where `0 < a < b`.
    ///
    /// CDF `ln(x/a)/ln(b/a)`, inverse CDF `a*(b/a)^u`, mean `(b-a)/ln(b/a)`,
    /// second moment `(b^2 - a^2)/(2*ln(b/a))`.
    Reciprocal { a: f64, b: f64 },
    /// A user-provided closed form.
    ///
    /// `inverse_cdf` must be a monotone (non-decreasing) map from `(0, 1)`
    /// onto `support` and `cdf` must be its inverse; `mean` and `variance`
    /// are the theoretical moments. The functions must be pure: the sampler
    /// will call them many times and assumes no internal state.
    Custom {
        inverse_cdf: fn(f64) -> f64,
        cdf: fn(f64) -> f64,
        support: Interval,
        mean: f64,
        variance: f64,
    },
}

impl ContinuousModel {
    /// Creates a new [ContinuousModel::Uniform] on `[a, b]`.
    ///
    /// # Errors
    ///
    /// Will return an error if:
    ///  - `a` or `b` is a NaN ([SpecError::NanErr]).
    ///  - `a` or `b` is `+-inf`, or `b <= a` ([SpecError::InvalidParameter]).
    pub fn new_uniform(a: f64, b: f64) -> Result<ContinuousModel, SpecError> {
        match a.classify() {
            FpCategory::Nan => return Err(SpecError::NanErr),
            FpCategory::Infinite => return Err(SpecError::InvalidParameter),
            _ => {}
        }
        match b.classify() {
            FpCategory::Nan => return Err(SpecError::NanErr),
            FpCategory::Infinite => return Err(SpecError::InvalidParameter),
            _ => {}
        }

        if b <= a {
            return Err(SpecError::InvalidParameter);
        }

        return Ok(ContinuousModel::Uniform { a: a, b: b });
    }

    /// Creates a new [ContinuousModel::Normal] with the given mean and
    /// standard deviation.
    ///
    /// # Errors
    ///
    /// Will return an error if:
    ///  - `mean` or `std_dev` is a NaN ([SpecError::NanErr]).
    ///  - `mean` or `std_dev` is `+-inf`, or `std_dev <= 0`
    ///    ([SpecError::InvalidParameter]).
    pub fn new_normal(mean: f64, std_dev: f64) -> Result<ContinuousModel, SpecError> {
        match mean.classify() {
            FpCategory::Nan => return Err(SpecError::NanErr),
            FpCategory::Infinite => return Err(SpecError::InvalidParameter),
            _ => {}
        }
        match std_dev.classify() {
            FpCategory::Nan => return Err(SpecError::NanErr),
            FpCategory::Infinite => return Err(SpecError::InvalidParameter),
            FpCategory::Zero => return Err(SpecError::InvalidParameter),
            _ => {}
        }

        if std_dev < 0.0 {
            return Err(SpecError::InvalidParameter);
        }

        return Ok(ContinuousModel::Normal {
            mean: mean,
            std_dev: std_dev,
        });
    }

    /// Creates a new [ContinuousModel::Reciprocal] on `(a, b)`.
    ///
    /// # Errors
    ///
    /// Will return an error if:
    ///  - `a` or `b` is a NaN ([SpecError::NanErr]).
    ///  - `a` or `b` is `+-inf`, `a <= 0` or `b <= a`
    ///    ([SpecError::InvalidParameter]).
    pub fn new_reciprocal(a: f64, b: f64) -> Result<ContinuousModel, SpecError> {
        match a.classify() {
            FpCategory::Nan => return Err(SpecError::NanErr),
            FpCategory::Infinite => return Err(SpecError::InvalidParameter),
            _ => {}
        }
        match b.classify() {
            FpCategory::Nan => return Err(SpecError::NanErr),
            FpCategory::Infinite => return Err(SpecError::InvalidParameter),
            _ => {}
        }

        if a <= 0.0 || b <= a {
            return Err(SpecError::InvalidParameter);
        }

        return Ok(ContinuousModel::Reciprocal { a: a, b: b });
    }

    /// Creates a new [ContinuousModel::Custom].
    ///
    /// The function contract (monotonicity, bijection onto `support`) cannot
    /// be checked here; the sampler will panic if `inverse_cdf` ever produces
    /// a value outside `support`.
    ///
    /// # Errors
    ///
    /// Will return an error if:
    ///  - `mean`, `variance` or a support endpoint is a NaN ([SpecError::NanErr]).
    ///  - `mean` or `variance` is `+-inf`, `variance < 0` or the support is
    ///    empty (`upper <= lower`) ([SpecError::InvalidParameter]).
    pub fn new_custom(
        inverse_cdf: fn(f64) -> f64,
        cdf: fn(f64) -> f64,
        support: Interval,
        mean: f64,
        variance: f64,
    ) -> Result<ContinuousModel, SpecError> {
        if support.lower.is_nan() || support.upper.is_nan() {
            return Err(SpecError::NanErr);
        }
        if support.upper <= support.lower {
            return Err(SpecError::InvalidParameter);
        }

        match mean.classify() {
            FpCategory::Nan => return Err(SpecError::NanErr),
            FpCategory::Infinite => return Err(SpecError::InvalidParameter),
            _ => {}
        }
        match variance.classify() {
            FpCategory::Nan => return Err(SpecError::NanErr),
            FpCategory::Infinite => return Err(SpecError::InvalidParameter),
            _ => {}
        }
        if variance < 0.0 {
            return Err(SpecError::InvalidParameter);
        }

        return Ok(ContinuousModel::Custom {
            inverse_cdf: inverse_cdf,
            cdf: cdf,
            support: support,
            mean: mean,
            variance: variance,
        });
    }

    /// Evaluates the inverse CDF (quantile function) of the model at `u`.
    ///
    /// Values of `u` outside `[0, 1]` are clamped to it before evaluating.
    ///
    /// **Panicks** if `u` is a NaN.
    #[must_use]
    pub fn inverse_cdf(&self, u: f64) -> f64 {
        if u.is_nan() {
            std::panic!("Tried to evaluate the inverse CDF with a NaN value. \n");
        }

        let u: f64 = u.clamp(0.0, 1.0);

        match self {
            ContinuousModel::Uniform { a, b } => {
                return a + u * (b - a);
            }
            ContinuousModel::Normal { mean, std_dev } => {
                return mean + std_dev * crate::euclid::std_normal_quantile(u);
            }
            ContinuousModel::Cubic => {
                return u.cbrt();
            }
            ContinuousModel::Arcsine => {
                return (std::f64::consts::PI * (1.0 + u) / 6.0).sin();
            }
            ContinuousModel::Reciprocal { a, b } => {
                return a * (b / a).powf(u);
            }
            ContinuousModel::Custom { inverse_cdf, .. } => {
                return inverse_cdf(u);
            }
        }
    }

    /// Evaluates the CDF of the model at `x`.
    ///
    /// Values below the support map to `0.0` and values above it to `1.0`.
    ///
    /// **Panicks** if `x` is a NaN.
    #[must_use]
    pub fn cdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            std::panic!("Tried to evaluate the CDF with a NaN value. \n");
        }

        let support: Interval = self.support();
        if x <= support.lower {
            return 0.0;
        }
        if support.upper <= x {
            return 1.0;
        }

        match self {
            ContinuousModel::Uniform { a, b } => {
                return (x - a) / (b - a);
            }
            ContinuousModel::Normal { mean, std_dev } => {
                return crate::euclid::std_normal_cdf((x - mean) / std_dev);
            }
            ContinuousModel::Cubic => {
                return x * x * x;
            }
            ContinuousModel::Arcsine => {
                return (6.0 / std::f64::consts::PI) * (x.asin() - std::f64::consts::PI / 6.0);
            }
            ContinuousModel::Reciprocal { a, b } => {
                return (x / a).ln() / (b / a).ln();
            }
            ContinuousModel::Custom { cdf, .. } => {
                return cdf(x).clamp(0.0, 1.0);
            }
        }
    }

    /// Returns the support of the model.
    #[must_use]
    pub fn support(&self) -> Interval {
        match self {
            ContinuousModel::Uniform { a, b } => {
                return Interval { lower: *a, upper: *b };
            }
            ContinuousModel::Normal { .. } => {
                return Interval {
                    lower: f64::NEG_INFINITY,
                    upper: f64::INFINITY,
                };
            }
            ContinuousModel::Cubic => {
                return Interval { lower: 0.0, upper: 1.0 };
            }
            ContinuousModel::Arcsine => {
                return Interval {
                    lower: 0.5,
                    upper: 3.0_f64.sqrt() * 0.5,
                };
            }
            ContinuousModel::Reciprocal { a, b } => {
                return Interval { lower: *a, upper: *b };
            }
            ContinuousModel::Custom { support, .. } => {
                return *support;
            }
        }
    }

    /// Returns the theoretical mean (expectation) of the model.
    #[must_use]
    pub fn theoretical_mean(&self) -> f64 {
        match self {
            ContinuousModel::Uniform { a, b } => {
                return (a + b) * 0.5;
            }
            ContinuousModel::Normal { mean, .. } => {
                return *mean;
            }
            ContinuousModel::Cubic => {
                return 0.75;
            }
            ContinuousModel::Arcsine => {
                return (3.0 / std::f64::consts::PI) * (3.0_f64.sqrt() - 1.0);
            }
            ContinuousModel::Reciprocal { a, b } => {
                return (b - a) / (b / a).ln();
            }
            ContinuousModel::Custom { mean, .. } => {
                return *mean;
            }
        }
    }

    /// Returns the theoretical variance of the model.
    #[must_use]
    pub fn theoretical_variance(&self) -> f64 {
        match self {
            ContinuousModel::Uniform { a, b } => {
                let width: f64 = b - a;
                return width * width / 12.0;
            }
            ContinuousModel::Normal { std_dev, .. } => {
                return std_dev * std_dev;
            }
            ContinuousModel::Cubic => {
                // E[X^2] = 3/5, mean = 3/4 => var = 3/5 - 9/16 = 3/80
                return 3.0 / 80.0;
            }
            ContinuousModel::Arcsine => {
                // E[X^2] = 1/2
                let mean: f64 = self.theoretical_mean();
                return 0.5 - mean * mean;
            }
            ContinuousModel::Reciprocal { a, b } => {
                // E[X^2] = (b^2 - a^2)/(2*ln(b/a))
                let second_moment: f64 = (b * b - a * a) / (2.0 * (b / a).ln());
                let mean: f64 = self.theoretical_mean();
                return second_moment - mean * mean;
            }
            ContinuousModel::Custom { variance, .. } => {
                return *variance;
            }
        }
    }

    /// Returns the theoretical standard deviation of the model.
    #[must_use]
    pub fn theoretical_std_dev(&self) -> f64 {
        return self.theoretical_variance().sqrt();
    }
}

/// A discrete distribution given by a finite ordered table of
/// `(value, probability)` outcomes.
///
/// The probabilities are renormalized at construction if they do not sum to 1
/// (within [PROBABILITY_SUM_TOLERANCE](crate::configuration::PROBABILITY_SUM_TOLERANCE)).
/// The correction is silent and ratio-preserving: every probability is divided
/// by the sum.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteSpec {
    /// The outcome table, in the caller's order. Probabilities sum to 1
    /// (up to floating point rounding) after construction.
    outcomes: Vec<(f64, f64)>,
}

impl DiscreteSpec {
    /// Creates a new [DiscreteSpec] from an ordered outcome table.
    ///
    /// # Errors
    ///
    /// Will return an error if:
    ///  - any value or probability is a NaN ([SpecError::NanErr]).
    ///  - any value or probability is `+-inf`, or any probability is
    ///    negative ([SpecError::InvalidParameter]).
    ///  - the table is empty or all its probabilities are zero
    ///    ([SpecError::EmptyOutcomeTable]).
    pub fn new(outcomes: Vec<(f64, f64)>) -> Result<DiscreteSpec, SpecError> {
        if outcomes.is_empty() {
            return Err(SpecError::EmptyOutcomeTable);
        }

        let mut probability_sum: f64 = 0.0;
        for &(value, probability) in &outcomes {
            if value.is_nan() || probability.is_nan() {
                return Err(SpecError::NanErr);
            }
            if value.is_infinite() || probability.is_infinite() {
                return Err(SpecError::InvalidParameter);
            }
            if probability < 0.0 {
                return Err(SpecError::InvalidParameter);
            }
            probability_sum += probability;
        }

        if probability_sum <= 0.0 {
            return Err(SpecError::EmptyOutcomeTable);
        }

        let mut outcomes: Vec<(f64, f64)> = outcomes;
        if configuration::PROBABILITY_SUM_TOLERANCE < (probability_sum - 1.0).abs() {
            for (_, probability) in &mut outcomes {
                *probability = *probability / probability_sum;
            }
        }

        return Ok(DiscreteSpec { outcomes: outcomes });
    }

    /// Returns the (possibly renormalized) outcome table.
    #[must_use]
    pub fn outcomes(&self) -> &[(f64, f64)] {
        return &self.outcomes;
    }

    /// Returns the number of outcomes of the table.
    #[must_use]
    pub fn len(&self) -> usize {
        return self.outcomes.len();
    }

    /// Returns true if the table has no outcomes. Construction rejects empty
    /// tables, so this is always false; provided for completness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        return self.outcomes.is_empty();
    }

    /// Returns the theoretical mean `sum(x_i * p_i)`.
    #[must_use]
    pub fn theoretical_mean(&self) -> f64 {
        let mut mean: f64 = 0.0;
        for &(value, probability) in &self.outcomes {
            mean += value * probability;
        }
        return mean;
    }

    /// Returns the theoretical variance `sum(x_i^2 * p_i) - mean^2`.
    #[must_use]
    pub fn theoretical_variance(&self) -> f64 {
        let mut second_moment: f64 = 0.0;
        for &(value, probability) in &self.outcomes {
            second_moment += value * value * probability;
        }
        let mean: f64 = self.theoretical_mean();
        return second_moment - mean * mean;
    }

    /// Returns the theoretical standard deviation of the table.
    #[must_use]
    pub fn theoretical_std_dev(&self) -> f64 {
        return self.theoretical_variance().sqrt();
    }

    /// Builds the [CumulativeTable] of partial probability sums used by the
    /// discrete sampler.
    #[must_use]
    pub fn cumulative_table(&self) -> CumulativeTable {
        return CumulativeTable::from_spec(self);
    }
}

/// The cumulative bounds `c_i = p_0 + ... + p_i` of a [DiscreteSpec].
///
/// The last bound is forced to exactly `1.0` so that accumulated rounding can
/// never leave a gap at the top of the unit interval. The table is immutable:
/// it is rebuilt from its spec on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeTable {
    bounds: Vec<f64>,
}

impl CumulativeTable {
    fn from_spec(spec: &DiscreteSpec) -> CumulativeTable {
        let mut bounds: Vec<f64> = Vec::with_capacity(spec.len());
        let mut running_sum: f64 = 0.0;
        for &(_, probability) in spec.outcomes() {
            running_sum += probability;
            bounds.push(running_sum);
        }

        // force the last bound so `u < c_last` always holds for u in [0, 1)
        if let Some(last) = bounds.last_mut() {
            *last = 1.0;
        }

        return CumulativeTable { bounds: bounds };
    }

    /// Returns the cumulative bounds.
    #[must_use]
    pub fn bounds(&self) -> &[f64] {
        return &self.bounds;
    }

    /// Maps a uniform draw `u` in `[0, 1)` to an outcome index.
    ///
    /// The selected index is the first one whose bound **strictly** exceeds
    /// `u`: when `u` equals a bound exactly, the next outcome is selected.
    /// If `u` reaches or exceeds the last bound (only possible trough
    /// rounding), the last outcome is returned.
    ///
    /// Small tables are scanned linearly; above
    /// [LINEAR_SCAN_MAX_OUTCOMES](crate::configuration::LINEAR_SCAN_MAX_OUTCOMES)
    /// outcomes a binary search is used instead. Both paths implement the
    /// exact same rule.
    #[must_use]
    pub fn lookup(&self, u: f64) -> usize {
        if self.bounds.len() <= configuration::LINEAR_SCAN_MAX_OUTCOMES {
            for (index, &bound) in self.bounds.iter().enumerate() {
                if u < bound {
                    return index;
                }
            }
            return self.bounds.len() - 1;
        }

        // first index with `u < bounds[index]`
        let index: usize = self.bounds.partition_point(|&bound| bound <= u);
        if index == self.bounds.len() {
            return self.bounds.len() - 1;
        }
        return index;
    }
}

/// A full distribution specification: the input of the samplers and the null
/// hypothesis of the goodness-of-fit test.
#[derive(Debug, Clone, PartialEq)]
pub enum DistributionSpec {
    Continuous(ContinuousModel),
    Discrete(DiscreteSpec),
}

impl DistributionSpec {
    /// Returns the theoretical mean of the specified distribution.
    #[must_use]
    pub fn theoretical_mean(&self) -> f64 {
        match self {
            DistributionSpec::Continuous(model) => return model.theoretical_mean(),
            DistributionSpec::Discrete(spec) => return spec.theoretical_mean(),
        }
    }

    /// Returns the theoretical variance of the specified distribution.
    #[must_use]
    pub fn theoretical_variance(&self) -> f64 {
        match self {
            DistributionSpec::Continuous(model) => return model.theoretical_variance(),
            DistributionSpec::Discrete(spec) => return spec.theoretical_variance(),
        }
    }

    /// Returns the theoretical standard deviation of the specified
    /// distribution.
    #[must_use]
    pub fn theoretical_std_dev(&self) -> f64 {
        return self.theoretical_variance().sqrt();
    }
}
