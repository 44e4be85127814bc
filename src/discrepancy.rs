//! The reporting stage of the engine: how far are the empirical moments of a
//! sample from the theoretical moments of its spec?
//!
//! A [DiscrepancyReport] is descriptive, not inferential: it quantifies the
//! deviations, it does not decide anything about the null hypothesis (that is
//! the job of [chi_square_test](crate::hypothesis::chi_square_test)).
//!

use crate::configuration;
use crate::errors::StatError;
use crate::spec::DistributionSpec;

/// The deviation of one empirical moment from its theoretical value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discrepancy {
    pub empirical: f64,
    pub theoretical: f64,
    /// `|empirical - theoretical|`
    pub absolute: f64,
    /// `absolute / |theoretical| * 100`. When the theoretical value is
    /// exactly `0.0` the ratio is undefined, so the absolute deviation scaled
    /// by 100 is reported instead.
    pub relative_percent: f64,
}

impl Discrepancy {
    fn new(empirical: f64, theoretical: f64) -> Discrepancy {
        let absolute: f64 = (empirical - theoretical).abs();
        let relative_percent: f64 = if theoretical == 0.0 {
            absolute * 100.0
        } else {
            absolute / theoretical.abs() * 100.0
        };

        return Discrepancy {
            empirical: empirical,
            theoretical: theoretical,
            absolute: absolute,
            relative_percent: relative_percent,
        };
    }
}

/// The overall verdict of a [DiscrepancyReport].
///
/// The thresholds are
/// [GOOD_RELATIVE_ERROR_PERCENT](crate::configuration::GOOD_RELATIVE_ERROR_PERCENT)
/// and
/// [ACCEPTABLE_RELATIVE_ERROR_PERCENT](crate::configuration::ACCEPTABLE_RELATIVE_ERROR_PERCENT).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Every compared moment has a relative error under 5%.
    Good,
    /// Every compared moment has a relative error under 10% (and at least one
    /// is 5% or more).
    Acceptable,
    /// Some compared moment has a relative error of 10% or more.
    Poor,
}

/// The discrepancies of the compared moments plus the overall verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscrepancyReport {
    pub mean: Discrepancy,
    pub variance: Discrepancy,
    /// `None` when the std-dev comparison was not requested.
    pub std_dev: Option<Discrepancy>,
    pub classification: Classification,
}

/// Compares the empirical moments of a sample against the theoretical
/// moments of `spec` and classifies the agreement.
///
/// `empirical_mean`, `empirical_variance`: the estimated moments (population
/// convention, see [Samples](crate::samples::Samples)). \
/// `spec`: the distribution whose theoretical moments are the reference. \
/// `include_std_dev`: also compare the standard deviations (the square roots
/// of the variances). On by deafult.
///
/// The classification takes the **worst** compared moment: all under 5% is
/// [Classification::Good], all under 10% is [Classification::Acceptable],
/// anything else is [Classification::Poor].
///
/// # Errors
///
/// Will return [StatError::NanErr] if an empirical moment is a NaN or
/// `+-inf`.
#[bon::builder]
pub fn compare_moments(
    empirical_mean: f64,
    empirical_variance: f64,
    spec: &DistributionSpec,
    include_std_dev: Option<bool>,
) -> Result<DiscrepancyReport, StatError> {
    if !empirical_mean.is_finite() || !empirical_variance.is_finite() {
        return Err(StatError::NanErr);
    }

    let include_std_dev: bool = include_std_dev.unwrap_or(true);

    let mean: Discrepancy = Discrepancy::new(empirical_mean, spec.theoretical_mean());
    let variance: Discrepancy = Discrepancy::new(empirical_variance, spec.theoretical_variance());

    let std_dev: Option<Discrepancy> = if include_std_dev {
        Some(Discrepancy::new(
            empirical_variance.max(0.0).sqrt(),
            spec.theoretical_std_dev(),
        ))
    } else {
        None
    };

    let mut worst_relative: f64 = mean.relative_percent.max(variance.relative_percent);
    if let Some(ref std_dev) = std_dev {
        worst_relative = worst_relative.max(std_dev.relative_percent);
    }

    let classification: Classification = if worst_relative < configuration::GOOD_RELATIVE_ERROR_PERCENT
    {
        Classification::Good
    } else if worst_relative < configuration::ACCEPTABLE_RELATIVE_ERROR_PERCENT {
        Classification::Acceptable
    } else {
        Classification::Poor
    };

    return Ok(DiscrepancyReport {
        mean: mean,
        variance: variance,
        std_dev: std_dev,
        classification: classification,
    });
}
