//! The moment estimation stage of the engine.
//!
//! [Samples] wraps a batch of values and computes its empirical moments
//! lazily, caching every result: asking for the variance twice only pays for
//! it once, and asking for the skewness reuses the cached mean.
//!
//! All the estimators use the **population** convention (divide by `N`, not
//! by `N - 1`), matching the convention of the discrepancy reports: for the
//! sample sizes this engine is used with (`10^4` and up) the difference is
//! negligible.
//!

use crate::errors::StatError;
use crate::sampler::Sample;

/// The moments of a sample in a single struct, as produced by
/// [Samples::moments].
///
/// `skewness` and `excess_kurtosis` are `None` when the sample has zero
/// variance (they would be a division by zero).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentResult {
    pub mean: f64,
    pub variance: f64,
    pub skewness: Option<f64>,
    pub excess_kurtosis: Option<f64>,
}

/// The cached values of the properties of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct SampleProperties {
    mean: Option<f64>,
    variance: Option<f64>,
    skewness: Option<f64>,
    excess_kurtosis: Option<f64>,
    minimum: Option<f64>,
    maximum: Option<f64>,
}

/// A batch of values together with the (lazily computed) cache of its
/// empirical moments.
#[derive(Debug, Clone, PartialEq)]
pub struct Samples {
    values: Vec<f64>,
    properties: SampleProperties,
}

impl Samples {
    /// Creates a new [Samples] from raw values.
    ///
    /// An empty vector is accepted here; the estimators themselves will
    /// return [StatError::DegenerateSample] when asked for a moment of
    /// nothing.
    ///
    /// # Errors
    ///
    /// Will return an error if any value is a NaN or `+-inf`
    /// ([StatError::NanErr]).
    pub fn new(values: Vec<f64>) -> Result<Samples, StatError> {
        for &value in &values {
            if !value.is_finite() {
                return Err(StatError::NanErr);
            }
        }

        return Ok(Samples {
            values: values,
            properties: SampleProperties::default(),
        });
    }

    /// Creates a new [Samples] from a drawn [Sample].
    ///
    /// The values of a [Sample] are already guaranteed to be finite and
    /// non-empty, so this cannot fail.
    #[must_use]
    pub fn from_sample(sample: &Sample) -> Samples {
        return Samples {
            values: sample.values().to_vec(),
            properties: SampleProperties::default(),
        };
    }

    /// Returns the values of the sample.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        return &self.values;
    }

    /// Returns the number of values in the sample.
    #[must_use]
    pub fn count(&self) -> usize {
        return self.values.len();
    }

    /// Returns the empirical mean `sum(x_i) / N` of the sample.
    ///
    /// # Errors
    ///
    /// Will return [StatError::DegenerateSample] if the sample is empty.
    pub fn mean(&mut self) -> Result<f64, StatError> {
        if let Some(mean) = self.properties.mean {
            return Ok(mean);
        }

        if self.values.is_empty() {
            return Err(StatError::DegenerateSample);
        }

        let n: f64 = self.values.len() as f64;
        let mean: f64 = self.values.iter().sum::<f64>() / n;

        self.properties.mean = Some(mean);
        return Ok(mean);
    }

    /// Returns the empirical (population) variance of the sample, computed
    /// with the second-moment identity `sum(x_i^2)/N - mean^2`.
    ///
    /// The identity can suffer catastrophic cancellation when the mean is
    /// huge compared to the spread; in that regime the result is clamped at
    /// `0.0` so the standard deviation stays real. No algorithm switching
    /// happens behind the caller's back.
    ///
    /// # Errors
    ///
    /// Will return [StatError::DegenerateSample] if the sample is empty.
    pub fn variance(&mut self) -> Result<f64, StatError> {
        if let Some(variance) = self.properties.variance {
            return Ok(variance);
        }

        let mean: f64 = self.mean()?;
        let n: f64 = self.values.len() as f64;

        let second_moment: f64 = self.values.iter().map(|&x| x * x).sum::<f64>() / n;
        let variance: f64 = (second_moment - mean * mean).max(0.0);

        self.properties.variance = Some(variance);
        return Ok(variance);
    }

    /// Returns the empirical (population) standard deviation of the sample.
    ///
    /// # Errors
    ///
    /// Will return [StatError::DegenerateSample] if the sample is empty.
    pub fn std_dev(&mut self) -> Result<f64, StatError> {
        return Ok(self.variance()?.sqrt());
    }

    /// Returns the empirical (population) skewness of the sample: the third
    /// standardized central moment.
    ///
    /// # Errors
    ///
    /// Will return an error if:
    ///  - the sample is empty ([StatError::DegenerateSample]).
    ///  - the sample has zero variance ([StatError::NumericalError]): the
    ///    skewness of a constant is a division by zero.
    pub fn skewness(&mut self) -> Result<f64, StatError> {
        if let Some(skewness) = self.properties.skewness {
            return Ok(skewness);
        }

        let mean: f64 = self.mean()?;
        let variance: f64 = self.variance()?;
        if variance <= 0.0 {
            return Err(StatError::NumericalError);
        }

        let n: f64 = self.values.len() as f64;
        let third_central: f64 = self
            .values
            .iter()
            .map(|&x| {
                let d: f64 = x - mean;
                d * d * d
            })
            .sum::<f64>()
            / n;

        let skewness: f64 = third_central / variance.powf(1.5);

        self.properties.skewness = Some(skewness);
        return Ok(skewness);
    }

    /// Returns the empirical (population) excess kurtosis of the sample: the
    /// fourth standardized central moment minus 3 (so a normal sample gives
    /// a value near `0.0`).
    ///
    /// # Errors
    ///
    /// Will return an error if:
    ///  - the sample is empty ([StatError::DegenerateSample]).
    ///  - the sample has zero variance ([StatError::NumericalError]).
    pub fn excess_kurtosis(&mut self) -> Result<f64, StatError> {
        if let Some(excess_kurtosis) = self.properties.excess_kurtosis {
            return Ok(excess_kurtosis);
        }

        let mean: f64 = self.mean()?;
        let variance: f64 = self.variance()?;
        if variance <= 0.0 {
            return Err(StatError::NumericalError);
        }

        let n: f64 = self.values.len() as f64;
        let fourth_central: f64 = self
            .values
            .iter()
            .map(|&x| {
                let d: f64 = x - mean;
                let d2: f64 = d * d;
                d2 * d2
            })
            .sum::<f64>()
            / n;

        let excess_kurtosis: f64 = fourth_central / (variance * variance) - 3.0;

        self.properties.excess_kurtosis = Some(excess_kurtosis);
        return Ok(excess_kurtosis);
    }

    /// Returns the smallest value of the sample.
    ///
    /// # Errors
    ///
    /// Will return [StatError::DegenerateSample] if the sample is empty.
    pub fn minimum(&mut self) -> Result<f64, StatError> {
        if let Some(minimum) = self.properties.minimum {
            return Ok(minimum);
        }

        if self.values.is_empty() {
            return Err(StatError::DegenerateSample);
        }

        // values are finite, so a plain fold is enough
        let minimum: f64 = self.values.iter().fold(f64::INFINITY, |acc, &x| acc.min(x));

        self.properties.minimum = Some(minimum);
        return Ok(minimum);
    }

    /// Returns the largest value of the sample.
    ///
    /// # Errors
    ///
    /// Will return [StatError::DegenerateSample] if the sample is empty.
    pub fn maximum(&mut self) -> Result<f64, StatError> {
        if let Some(maximum) = self.properties.maximum {
            return Ok(maximum);
        }

        if self.values.is_empty() {
            return Err(StatError::DegenerateSample);
        }

        let maximum: f64 = self
            .values
            .iter()
            .fold(f64::NEG_INFINITY, |acc, &x| acc.max(x));

        self.properties.maximum = Some(maximum);
        return Ok(maximum);
    }

    /// Computes all the moments at once and returns them in a
    /// [MomentResult].
    ///
    /// `skewness` and `excess_kurtosis` are `None` when the sample has zero
    /// variance; every other failure propagates.
    ///
    /// # Errors
    ///
    /// Will return [StatError::DegenerateSample] if the sample is empty.
    pub fn moments(&mut self) -> Result<MomentResult, StatError> {
        let mean: f64 = self.mean()?;
        let variance: f64 = self.variance()?;

        let skewness: Option<f64> = match self.skewness() {
            Ok(s) => Some(s),
            Err(StatError::NumericalError) => None,
            Err(e) => return Err(e),
        };
        let excess_kurtosis: Option<f64> = match self.excess_kurtosis() {
            Ok(k) => Some(k),
            Err(StatError::NumericalError) => None,
            Err(e) => return Err(e),
        };

        return Ok(MomentResult {
            mean: mean,
            variance: variance,
            skewness: skewness,
            excess_kurtosis: excess_kurtosis,
        });
    }
}
