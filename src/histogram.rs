//! The binning stage of the goodness-of-fit test.
//!
//! A [Histogram] pairs the observed bin counts of a sample with the expected
//! frequencies under a [DistributionSpec]. Continuous specs are binned over
//! interval edges (half-open bins, last bin closed); discrete specs get one
//! category per outcome.
//!
//! The expected frequencies are allways rescaled so their sum equals the sum
//! of the observed counts: the chi-square statistic compares shapes, and the
//! rescale keeps it meaningfull even when part of the sample falls outside
//! the caller's edges.
//!

use crate::errors::StatError;
use crate::spec::{ContinuousModel, DiscreteSpec, DistributionSpec};

/// How to partition the sample range into bins.
#[derive(Debug, Clone, PartialEq)]
pub enum Binning {
    /// `EqualWidth(k)`: `k` bins of equal width spanning `[min, max]` of the
    /// observed sample.
    EqualWidth(usize),
    /// Caller-provided bin edges (must be strictly increasing). Useful for
    /// integer-valued data where the sample range alone would produce
    /// degenerate bins.
    Edges(Vec<f64>),
}

/// Observed vs expected bin frequencies of a sample under a spec.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// The bin edges (`k + 1` values for `k` bins). Empty for categorical
    /// histograms, where bins are outcome categories rather than intervals.
    edges: Vec<f64>,
    /// Observed count per bin. Sums to the number of sample values that
    /// landed inside the binned range.
    observed: Vec<u64>,
    /// Expected frequency per bin, rescaled so that
    /// `sum(expected) == sum(observed)`.
    expected: Vec<f64>,
}

impl Histogram {
    /// Builds the [Histogram] of `values` under `spec`.
    ///
    /// Continuous specs use `binning`; discrete specs allways bin per
    /// outcome category (the `binning` argument is ignored for them).
    ///
    /// # Errors
    ///
    /// Will return an error if:
    ///  - a bin edge is a NaN ([StatError::NanErr]).
    ///  - less than 2 bins were requested, the edges are not strictly
    ///    increasing, the sample range is a single point, or every bin has
    ///    zero expected frequency ([StatError::InsufficientBins]).
    pub fn build(
        values: &[f64],
        spec: &DistributionSpec,
        binning: &Binning,
    ) -> Result<Histogram, StatError> {
        match spec {
            DistributionSpec::Continuous(model) => {
                return Histogram::continuous(values, model, binning);
            }
            DistributionSpec::Discrete(discrete) => {
                return Histogram::categorical(values, discrete);
            }
        }
    }

    /// Builds an interval histogram of `values` under a [ContinuousModel].
    pub fn continuous(
        values: &[f64],
        model: &ContinuousModel,
        binning: &Binning,
    ) -> Result<Histogram, StatError> {
        let edges: Vec<f64> = match binning {
            Binning::EqualWidth(bin_count) => {
                let bin_count: usize = *bin_count;
                if bin_count < 2 {
                    return Err(StatError::InsufficientBins);
                }
                if values.is_empty() {
                    return Err(StatError::DegenerateSample);
                }

                let minimum: f64 = values.iter().fold(f64::INFINITY, |acc, &x| acc.min(x));
                let maximum: f64 = values.iter().fold(f64::NEG_INFINITY, |acc, &x| acc.max(x));

                if maximum <= minimum {
                    // every value is identical: equal-width bins over the
                    // sample range are degenerate. The caller must provide
                    // explicit edges for this sample.
                    return Err(StatError::InsufficientBins);
                }

                let width: f64 = (maximum - minimum) / bin_count as f64;
                let mut edges: Vec<f64> = Vec::with_capacity(bin_count + 1);
                for i in 0..bin_count {
                    edges.push(minimum + width * i as f64);
                }
                // push the exact maximum, not `minimum + width * k`, so the
                // closed last bin is guaranteed to contain it
                edges.push(maximum);
                edges
            }
            Binning::Edges(edges) => {
                for &edge in edges {
                    if edge.is_nan() {
                        return Err(StatError::NanErr);
                    }
                }
                if edges.len() < 3 {
                    return Err(StatError::InsufficientBins);
                }
                for window in edges.windows(2) {
                    if window[1] <= window[0] {
                        return Err(StatError::InsufficientBins);
                    }
                }
                edges.clone()
            }
        };

        let bin_count: usize = edges.len() - 1;
        let mut observed: Vec<u64> = vec![0; bin_count];

        for &value in values {
            if let Some(index) = locate_bin(&edges, value) {
                observed[index] += 1;
            }
            // values outside the edges are left out; the expected
            // frequencies are rescaled to the observed total below
        }

        let observed_total: u64 = observed.iter().sum();
        if observed_total == 0 {
            return Err(StatError::InsufficientBins);
        }

        // expected probability mass per bin, from CDF differences
        let mut probabilities: Vec<f64> = Vec::with_capacity(bin_count);
        let mut probability_total: f64 = 0.0;
        for window in edges.windows(2) {
            let mass: f64 = (model.cdf(window[1]) - model.cdf(window[0])).max(0.0);
            probabilities.push(mass);
            probability_total += mass;
        }

        if probability_total <= 0.0 {
            // the spec's support and the sample range do not overlap
            return Err(StatError::InsufficientBins);
        }

        let expected: Vec<f64> = probabilities
            .iter()
            .map(|&mass| observed_total as f64 * mass / probability_total)
            .collect();

        return Ok(Histogram {
            edges: edges,
            observed: observed,
            expected: expected,
        });
    }

    /// Builds a categorical histogram of `values` under a [DiscreteSpec]:
    /// one bin per outcome.
    ///
    /// A value is assigned to the outcome it equals exactly (drawn values are
    /// bitwise copies of the table entries); values matching no outcome are
    /// left out.
    pub fn categorical(values: &[f64], spec: &DiscreteSpec) -> Result<Histogram, StatError> {
        if spec.len() < 2 {
            return Err(StatError::InsufficientBins);
        }

        let mut observed: Vec<u64> = vec![0; spec.len()];
        for &value in values {
            for (index, &(outcome_value, _)) in spec.outcomes().iter().enumerate() {
                if value == outcome_value {
                    observed[index] += 1;
                    break;
                }
            }
        }

        let observed_total: u64 = observed.iter().sum();
        if observed_total == 0 {
            return Err(StatError::InsufficientBins);
        }

        // probabilities within the renormalization tolerance may sum to
        // slightly off 1, so the expected frequencies are rescaled by the
        // actual sum (same as the continuous path)
        let mut probability_total: f64 = 0.0;
        for &(_, probability) in spec.outcomes() {
            probability_total += probability;
        }

        let expected: Vec<f64> = spec
            .outcomes()
            .iter()
            .map(|&(_, probability)| observed_total as f64 * probability / probability_total)
            .collect();

        return Ok(Histogram {
            edges: Vec::new(),
            observed: observed,
            expected: expected,
        });
    }

    /// Returns the bin edges (`k + 1` values for `k` bins; empty for
    /// categorical histograms).
    #[must_use]
    pub fn edges(&self) -> &[f64] {
        return &self.edges;
    }

    /// Returns the observed count per bin.
    #[must_use]
    pub fn observed(&self) -> &[u64] {
        return &self.observed;
    }

    /// Returns the expected frequency per bin.
    #[must_use]
    pub fn expected(&self) -> &[f64] {
        return &self.expected;
    }

    /// Returns the number of bins.
    #[must_use]
    pub fn bin_count(&self) -> usize {
        return self.observed.len();
    }
}

/// Locates the bin of `value` in a strictly increasing `edges` vector:
/// half-open bins `[l, r)`, except the last one wich is closed `[l, r]`.
/// Returns `None` for values outside `[edges[0], edges[last]]`.
fn locate_bin(edges: &[f64], value: f64) -> Option<usize> {
    let last_edge: f64 = edges[edges.len() - 1];
    if value < edges[0] || last_edge < value {
        return None;
    }
    if value == last_edge {
        // closed last bin
        return Some(edges.len() - 2);
    }

    // first edge strictly greater than `value`, minus one
    let index: usize = edges.partition_point(|&edge| edge <= value);
    return Some(index - 1);
}
