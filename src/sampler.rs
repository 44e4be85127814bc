//! The sampling stage of the engine.
//!
//! [draw_continuous] implements the
//! [inverse transform method](https://en.wikipedia.org/wiki/Inverse_transform_sampling):
//! a uniform draw `u` in `[0, 1)` is mapped trough the model's inverse CDF.
//! [draw_discrete] implements cumulative-table sampling: `u` is located in the
//! table of partial probability sums.
//!
//! Both return an immutable [Sample] that remembers the seed and the
//! specification it was drawn from, so a run can allways be reproduced.
//!

use crate::errors::SpecError;
use crate::random_source::RandomSource;
use crate::spec::{ContinuousModel, CumulativeTable, DiscreteSpec, DistributionSpec, Interval};

/// An immutable batch of drawn values together with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    values: Vec<f64>,
    seed: u64,
    spec: DistributionSpec,
}

impl Sample {
    /// Creates a new [Sample].
    ///
    /// # Errors
    ///
    /// Will return an error if:
    ///  - any value is a NaN ([SpecError::NanErr]).
    ///  - any value is `+-inf` or `values` is empty
    ///    ([SpecError::InvalidParameter]).
    pub fn new(values: Vec<f64>, seed: u64, spec: DistributionSpec) -> Result<Sample, SpecError> {
        if values.is_empty() {
            return Err(SpecError::InvalidParameter);
        }

        for &value in &values {
            if value.is_nan() {
                return Err(SpecError::NanErr);
            }
            if value.is_infinite() {
                return Err(SpecError::InvalidParameter);
            }
        }

        return Ok(Sample {
            values: values,
            seed: seed,
            spec: spec,
        });
    }

    /// Returns the drawn values, in draw order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        return &self.values;
    }

    /// Returns the number of drawn values.
    #[must_use]
    pub fn count(&self) -> usize {
        return self.values.len();
    }

    /// Returns the seed of the source the sample was drawn with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        return self.seed;
    }

    /// Returns the specification the sample was drawn from.
    #[must_use]
    pub fn spec(&self) -> &DistributionSpec {
        return &self.spec;
    }
}

/// The result of [draw_discrete]: the sample plus the per-outcome hit counts.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteDraw {
    /// The drawn outcome values, in draw order.
    pub sample: Sample,
    /// `hit_counts[i]` is the number of draws that selected outcome `i`.
    /// The counts sum to the sample size.
    pub hit_counts: Vec<u64>,
}

/// Draws `count` values from a [ContinuousModel] using the inverse transform
/// method.
///
/// For [ContinuousModel::Normal] the draw delegates to
/// [RandomSource::normal] instead of inverting the CDF (the native generator
/// is both faster and more accurate in the tails).
///
/// # Errors
///
/// Will return an error if `count == 0` ([SpecError::InvalidParameter]).
///
/// # Panics
///
/// Panicks if the model's inverse CDF produces a value outside the model's
/// support. That can only happen with a [ContinuousModel::Custom] that
/// violates its contract; it is a bug in the caller's closed form, so it is
/// never silently clamped.
pub fn draw_continuous(
    model: &ContinuousModel,
    count: usize,
    source: &mut dyn RandomSource,
) -> Result<Sample, SpecError> {
    if count == 0 {
        return Err(SpecError::InvalidParameter);
    }

    let support: Interval = model.support();
    let mut values: Vec<f64> = Vec::with_capacity(count);

    match model {
        ContinuousModel::Normal { mean, std_dev } => {
            for _ in 0..count {
                values.push(source.normal(*mean, *std_dev));
            }
        }
        _ => {
            for _ in 0..count {
                let u: f64 = source.uniform();
                let x: f64 = model.inverse_cdf(u);

                if !support.contains(x) {
                    std::panic!(
                        "The inverse CDF produced the value {} wich is outside the support [{}, {}]. The model violates the monotone bijection contract. \n",
                        x, support.lower, support.upper
                    );
                }

                values.push(x);
            }
        }
    }

    let seed: u64 = source.seed();
    return Sample::new(values, seed, DistributionSpec::Continuous(*model));
}

/// Draws `count` values from a [DiscreteSpec] using cumulative-table
/// sampling.
///
/// Each uniform draw is mapped to the first outcome whose cumulative bound
/// strictly exceeds it (ties go to the **next** outcome; see
/// [CumulativeTable::lookup]). The returned [DiscreteDraw] also carries the
/// per-outcome hit counts, wich the frequency-convergence checks and the
/// goodness-of-fit binning can reuse directly.
///
/// # Errors
///
/// Will return an error if `count == 0` ([SpecError::InvalidParameter]).
pub fn draw_discrete(
    spec: &DiscreteSpec,
    count: usize,
    source: &mut dyn RandomSource,
) -> Result<DiscreteDraw, SpecError> {
    if count == 0 {
        return Err(SpecError::InvalidParameter);
    }

    let table: CumulativeTable = spec.cumulative_table();
    let mut values: Vec<f64> = Vec::with_capacity(count);
    let mut hit_counts: Vec<u64> = vec![0; spec.len()];

    for _ in 0..count {
        let u: f64 = source.uniform();
        let index: usize = table.lookup(u);

        values.push(spec.outcomes()[index].0);
        hit_counts[index] += 1;
    }

    let seed: u64 = source.seed();
    let sample: Sample = Sample::new(values, seed, DistributionSpec::Discrete(spec.clone()))?;

    return Ok(DiscreteDraw {
        sample: sample,
        hit_counts: hit_counts,
    });
}
