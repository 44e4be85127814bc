use DistributionSampling::errors::StatError;
use DistributionSampling::euclid;
use DistributionSampling::histogram::{Binning, Histogram};
use DistributionSampling::hypothesis::{Decision, GofTestResult, chi_square_test};
use DistributionSampling::random_source::SeededSource;
use DistributionSampling::sampler::{Sample, draw_continuous, draw_discrete};
use DistributionSampling::spec::{ContinuousModel, DiscreteSpec, DistributionSpec};

#[inline]
fn assert_approx_eq_eps(a: f64, b: f64, eps: f64) {
    assert!(
        (a - b).abs() < eps,
        "assertion failed: `(left !== right)` \
         (left: `{:?}`, right: `{:?}`, expect diff: `{:?}`, real diff: `{:?}`)",
        a,
        b,
        eps,
        (a - b).abs()
    );
}

#[cfg(test)]
mod special_function_tests {
    use super::*;

    #[test]
    fn ln_gamma_known_values() {
        // gamma(5) = 24, gamma(0.5) = sqrt(pi)
        assert_approx_eq_eps(euclid::ln_gamma(5.0), 24.0_f64.ln(), 1.0e-10);
        assert_approx_eq_eps(
            euclid::ln_gamma(0.5),
            std::f64::consts::PI.sqrt().ln(),
            1.0e-10,
        );
        assert_approx_eq_eps(euclid::ln_gamma(1.0), 0.0, 1.0e-10);
        assert_approx_eq_eps(euclid::ln_gamma(2.0), 0.0, 1.0e-10);
    }

    #[test]
    fn incomplete_gamma_at_a_equal_one_is_exponential() {
        // P(1, x) = 1 - exp(-x)
        for &x in &[0.1, 0.5, 1.0, 2.0, 5.0, 10.0] {
            assert_approx_eq_eps(
                euclid::lower_incomplete_gamma(1.0, x),
                1.0 - (-x).exp(),
                1.0e-12,
            );
        }
        assert_eq!(euclid::lower_incomplete_gamma(1.0, 0.0), 0.0);
    }

    #[test]
    fn chi_squared_cdf_with_two_degrees_is_exponential() {
        // with df = 2 the chi-square is an exponential with mean 2:
        // CDF(x) = 1 - exp(-x/2)
        for &x in &[0.5, 1.0, 2.0, 5.991464547107979] {
            assert_approx_eq_eps(
                euclid::chi_squared_cdf(x, 2.0),
                1.0 - (-x / 2.0).exp(),
                1.0e-12,
            );
        }
    }

    #[test]
    fn chi_squared_quantile_known_values() {
        // 0.95 quantiles from standard tables
        assert_approx_eq_eps(euclid::chi_squared_quantile(0.95, 2.0), 5.991464547, 1.0e-6);
        assert_approx_eq_eps(euclid::chi_squared_quantile(0.95, 4.0), 9.487729037, 1.0e-6);
        assert_approx_eq_eps(euclid::chi_squared_quantile(0.95, 9.0), 16.918977605, 1.0e-6);

        assert_eq!(euclid::chi_squared_quantile(0.0, 4.0), 0.0);
        assert_eq!(euclid::chi_squared_quantile(1.0, 4.0), f64::INFINITY);
    }

    #[test]
    fn chi_squared_quantile_inverts_the_cdf() {
        for &p in &[0.05, 0.25, 0.5, 0.9, 0.95, 0.99] {
            for &df in &[1.0, 2.0, 4.0, 9.0, 30.0] {
                let x: f64 = euclid::chi_squared_quantile(p, df);
                assert_approx_eq_eps(euclid::chi_squared_cdf(x, df), p, 1.0e-8);
            }
        }
    }

    #[test]
    fn std_normal_cdf_known_values() {
        assert_approx_eq_eps(euclid::std_normal_cdf(0.0), 0.5, 1.0e-7);
        assert_approx_eq_eps(euclid::std_normal_cdf(1.959963985), 0.975, 1.0e-6);
        assert_approx_eq_eps(euclid::std_normal_cdf(-1.959963985), 0.025, 1.0e-6);
    }

    #[test]
    fn std_normal_quantile_known_values() {
        assert_approx_eq_eps(euclid::std_normal_quantile(0.5), 0.0, 1.0e-9);
        assert_approx_eq_eps(euclid::std_normal_quantile(0.975), 1.959963985, 1.0e-7);
        assert_approx_eq_eps(euclid::std_normal_quantile(0.025), -1.959963985, 1.0e-7);
        assert_eq!(euclid::std_normal_quantile(0.0), f64::NEG_INFINITY);
        assert_eq!(euclid::std_normal_quantile(1.0), f64::INFINITY);
    }
}

#[cfg(test)]
mod chi_square_test_tests {
    use super::*;

    #[test]
    fn invalid_significance_is_rejected() {
        let model: ContinuousModel = ContinuousModel::new_uniform(2.0, 5.0).unwrap();
        let mut source: SeededSource = SeededSource::new(42);
        let sample: Sample = draw_continuous(&model, 1000, &mut source).unwrap();

        for &alpha in &[0.0, 1.0, -0.5, 2.0, f64::NAN, f64::INFINITY] {
            let result = chi_square_test()
                .sample(&sample)
                .binning(&Binning::EqualWidth(10))
                .significance(alpha)
                .call();
            assert_eq!(result, Err(StatError::InvalidSignificance));
        }
    }

    #[test]
    fn too_few_bins_is_rejected() {
        let model: ContinuousModel = ContinuousModel::new_uniform(2.0, 5.0).unwrap();
        let mut source: SeededSource = SeededSource::new(42);
        let sample: Sample = draw_continuous(&model, 1000, &mut source).unwrap();

        for binning in [
            Binning::EqualWidth(0),
            Binning::EqualWidth(1),
            Binning::Edges(vec![0.0, 1.0]),
            // non increasing edges
            Binning::Edges(vec![0.0, 2.0, 1.0]),
        ] {
            let result = chi_square_test().sample(&sample).binning(&binning).call();
            assert_eq!(result, Err(StatError::InsufficientBins));
        }
    }

    #[test]
    fn correct_null_is_not_rejected_at_tiny_significance() {
        let model: ContinuousModel = ContinuousModel::new_uniform(2.0, 5.0).unwrap();
        let mut source: SeededSource = SeededSource::new(42);
        let sample: Sample = draw_continuous(&model, 10_000, &mut source).unwrap();

        let result: GofTestResult = chi_square_test()
            .sample(&sample)
            .binning(&Binning::EqualWidth(10))
            .significance(1.0e-4)
            .call()
            .unwrap();

        assert_eq!(result.degrees_of_freedom, 9.0);
        assert!(result.statistic.is_finite());
        // under the true null a statistic this extreme is (almost) impossible
        assert!(result.statistic < 60.0);
        assert_eq!(result.decision, Decision::Accept);
    }

    #[test]
    fn wrong_null_is_rejected() {
        // cubic data (density 3x^2) tested against a flat uniform on [0, 1]:
        // with 10^4 samples the shapes are unmistakably different
        let mut source: SeededSource = SeededSource::new(42);
        let sample: Sample = draw_continuous(&ContinuousModel::Cubic, 10_000, &mut source).unwrap();

        let wrong_spec: DistributionSpec =
            DistributionSpec::Continuous(ContinuousModel::new_uniform(0.0, 1.0).unwrap());

        let result: GofTestResult = chi_square_test()
            .sample(&sample)
            .spec(&wrong_spec)
            .binning(&Binning::EqualWidth(10))
            .call()
            .unwrap();

        assert_eq!(result.decision, Decision::Reject);
        assert!(result.critical_value < result.statistic);
        assert!(result.p_value < 0.05);
    }

    #[test]
    fn decision_is_consistent_with_the_p_value() {
        let model: ContinuousModel = ContinuousModel::new_reciprocal(2.0, 5.0).unwrap();
        let mut source: SeededSource = SeededSource::new(7);
        let sample: Sample = draw_continuous(&model, 5000, &mut source).unwrap();

        for &alpha in &[0.01, 0.05, 0.2, 0.5] {
            let result: GofTestResult = chi_square_test()
                .sample(&sample)
                .binning(&Binning::EqualWidth(8))
                .significance(alpha)
                .call()
                .unwrap();

            let expected_decision: Decision = if alpha < result.p_value {
                Decision::Accept
            } else {
                Decision::Reject
            };
            assert_eq!(result.decision, expected_decision);
        }
    }

    #[test]
    fn contributions_decompose_the_statistic() {
        let model: ContinuousModel = ContinuousModel::new_uniform(2.0, 5.0).unwrap();
        let mut source: SeededSource = SeededSource::new(11);
        let sample: Sample = draw_continuous(&model, 5000, &mut source).unwrap();

        let result: GofTestResult = chi_square_test()
            .sample(&sample)
            .binning(&Binning::EqualWidth(10))
            .call()
            .unwrap();

        assert_eq!(result.contributions.len(), 10);
        // the decomposition is exact: the statistic is accumulated from the
        // very same terms, in the very same order
        let recomposed: f64 = result.contributions.iter().sum();
        assert_eq!(recomposed, result.statistic);
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let model: ContinuousModel = ContinuousModel::new_uniform(2.0, 5.0).unwrap();
        let mut source: SeededSource = SeededSource::new(42);
        let sample: Sample = draw_continuous(&model, 5000, &mut source).unwrap();

        let first: GofTestResult = chi_square_test()
            .sample(&sample)
            .binning(&Binning::EqualWidth(10))
            .call()
            .unwrap();
        let second: GofTestResult = chi_square_test()
            .sample(&sample)
            .binning(&Binning::EqualWidth(10))
            .call()
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn all_identical_sample_needs_explicit_edges() {
        let spec: DistributionSpec =
            DistributionSpec::Continuous(ContinuousModel::new_uniform(0.0, 5.0).unwrap());
        let sample: Sample = Sample::new(vec![2.0; 5], 0, spec).unwrap();

        // equal-width binning over a single-point range is degenerate
        let equal_width = chi_square_test()
            .sample(&sample)
            .binning(&Binning::EqualWidth(5))
            .call();
        assert_eq!(equal_width, Err(StatError::InsufficientBins));

        // explicit unit edges keep the test well defined: observed
        // [0, 0, 5, 0, 0], expected [1, 1, 1, 1, 1]
        let result: GofTestResult = chi_square_test()
            .sample(&sample)
            .binning(&Binning::Edges(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]))
            .call()
            .unwrap();

        // chi^2 = 4 * (0-1)^2 + (5-1)^2 = 20
        assert_approx_eq_eps(result.statistic, 20.0, 1.0e-9);
        assert_eq!(result.degrees_of_freedom, 4.0);
        assert_eq!(result.decision, Decision::Reject);
    }

    #[test]
    fn discrete_specs_bin_per_outcome() {
        let spec: DiscreteSpec =
            DiscreteSpec::new(vec![(1.0, 0.2), (2.0, 0.3), (3.0, 0.5)]).unwrap();
        let mut source: SeededSource = SeededSource::new(7);
        let draw = draw_discrete(&spec, 100_000, &mut source).unwrap();

        let result: GofTestResult = chi_square_test()
            .sample(&draw.sample)
            // the binning is ignored for discrete specs
            .binning(&Binning::EqualWidth(50))
            .significance(1.0e-4)
            .call()
            .unwrap();

        assert_eq!(result.histogram.bin_count(), 3);
        assert_eq!(result.degrees_of_freedom, 2.0);
        assert_eq!(result.decision, Decision::Accept);

        // expected frequencies are N * p_i
        assert_approx_eq_eps(result.histogram.expected()[0], 20_000.0, 1.0e-6);
        assert_approx_eq_eps(result.histogram.expected()[1], 30_000.0, 1.0e-6);
        assert_approx_eq_eps(result.histogram.expected()[2], 50_000.0, 1.0e-6);
    }
}

#[cfg(test)]
mod histogram_tests {
    use super::*;

    #[test]
    fn observed_counts_cover_the_whole_sample() {
        let model: ContinuousModel = ContinuousModel::new_uniform(2.0, 5.0).unwrap();
        let mut source: SeededSource = SeededSource::new(42);
        let sample: Sample = draw_continuous(&model, 5000, &mut source).unwrap();

        let histogram: Histogram = Histogram::build(
            sample.values(),
            sample.spec(),
            &Binning::EqualWidth(10),
        )
        .unwrap();

        // equal-width bins span [min, max], so nothing is left out (the
        // maximum lands in the closed last bin)
        assert_eq!(histogram.observed().iter().sum::<u64>(), 5000);
        assert_eq!(histogram.bin_count(), 10);
        assert_eq!(histogram.edges().len(), 11);
    }

    #[test]
    fn expected_sum_matches_observed_sum() {
        let model: ContinuousModel = ContinuousModel::new_reciprocal(2.0, 5.0).unwrap();
        let mut source: SeededSource = SeededSource::new(42);
        let sample: Sample = draw_continuous(&model, 5000, &mut source).unwrap();

        let histogram: Histogram = Histogram::build(
            sample.values(),
            sample.spec(),
            &Binning::EqualWidth(12),
        )
        .unwrap();

        let observed_total: f64 = histogram.observed().iter().sum::<u64>() as f64;
        let expected_total: f64 = histogram.expected().iter().sum();
        assert_approx_eq_eps(expected_total, observed_total, 1.0e-6);
    }

    #[test]
    fn values_on_inner_edges_go_to_the_right_bin() {
        let spec: DistributionSpec =
            DistributionSpec::Continuous(ContinuousModel::new_uniform(0.0, 4.0).unwrap());
        // half-open bins: 1.0 belongs to [1, 2), not [0, 1); the final 4.0
        // belongs to the closed last bin
        let sample_values: Vec<f64> = vec![0.0, 1.0, 1.5, 2.0, 4.0];

        let histogram: Histogram = Histogram::build(
            &sample_values,
            &spec,
            &Binning::Edges(vec![0.0, 1.0, 2.0, 3.0, 4.0]),
        )
        .unwrap();

        assert_eq!(histogram.observed(), &[1, 2, 1, 1][..]);
    }

    #[test]
    fn categorical_expected_sum_matches_observed_sum() {
        // within the renormalization tolerance: the probabilities are kept
        // as given, summing to 1 + 5e-7 rather than exactly 1
        let spec: DistributionSpec = DistributionSpec::Discrete(
            DiscreteSpec::new(vec![(1.0, 0.3), (2.0, 0.3), (3.0, 0.4 + 5.0e-7)]).unwrap(),
        );
        let sample_values: Vec<f64> = vec![1.0, 1.0, 2.0, 3.0, 3.0, 3.0];

        let histogram: Histogram =
            Histogram::build(&sample_values, &spec, &Binning::EqualWidth(2)).unwrap();

        let observed_total: f64 = histogram.observed().iter().sum::<u64>() as f64;
        let expected_total: f64 = histogram.expected().iter().sum();
        assert_approx_eq_eps(expected_total, observed_total, 1.0e-9);
    }

    #[test]
    fn disjoint_support_is_an_error() {
        // all the probability mass of uniform(10, 20) lies outside the edges
        let spec: DistributionSpec =
            DistributionSpec::Continuous(ContinuousModel::new_uniform(10.0, 20.0).unwrap());
        let sample_values: Vec<f64> = vec![1.0, 2.0, 3.0];

        let result = Histogram::build(
            &sample_values,
            &spec,
            &Binning::Edges(vec![0.0, 2.0, 4.0]),
        );
        assert_eq!(result, Err(StatError::InsufficientBins));
    }
}
