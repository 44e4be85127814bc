#![allow(
    non_snake_case,
    clippy::needless_return,
    clippy::assign_op_pattern,
    clippy::excessive_precision
)]

#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
)]
// ^Disable warning "crate `DistributionSampling` should have a snake case name
// convert the identifier to snake case: `distribution_sampling`".
// The rest of the names will follow the snake_case convention.

//! # Distribution Sampling
//!
//!
//! This library is a simulation engine that provides:
//!
//! - [x] Inverse-CDF sampling of continuous distributions
//! - [x] Cumulative-table sampling of discrete distributions
//! - [x] Sample moment estimation (mean, variance, skewness, excess kurtosis)
//! - [x] Chi-square goodness-of-fit validation
//! - [x] Theoretical vs empirical discrepancy reports
//! - [x] Loss-system throughput metrics (Erlang B)
//! - [ ] Parameter estimation (out of scope, validation only)
//! - [ ] Any kind of rendering (tables/charts are the caller's job)
//! - [x] Updated to rust 2024 version
//!
//! ## Distributions
//!
//! Every distribution is a variant of the tagged [DistributionSpec](spec::DistributionSpec):
//! either a [ContinuousModel](spec::ContinuousModel) with a closed-form inverse CDF or a
//! [DiscreteSpec](spec::DiscreteSpec) with a finite outcome table.
//!
//! ### Continuous models:
//!
//!  - [x] [Uniform](spec::ContinuousModel::Uniform) on `[a, b]` ([Wiki](https://en.wikipedia.org/wiki/Continuous_uniform_distribution))
//!  - [x] [Normal](spec::ContinuousModel::Normal) `N(mu, sigma^2)` ([Wiki](https://en.wikipedia.org/wiki/Normal_distribution))
//!  - [x] [Cubic](spec::ContinuousModel::Cubic): density `3x^2` on `(0, 1]`
//!  - [x] [Arcsine](spec::ContinuousModel::Arcsine): density `6/(pi*sqrt(1-x^2))` on `(1/2, sqrt(3)/2)`
//!  - [x] [Reciprocal](spec::ContinuousModel::Reciprocal): density `1/(x ln(b/a))` on `(a, b)` ([Wiki](https://en.wikipedia.org/wiki/Reciprocal_distribution))
//!  - [x] [Custom](spec::ContinuousModel::Custom): bring your own closed-form inverse CDF
//!
//! ### Discrete:
//!
//!  - [x] Arbitrary finite outcome tables ([DiscreteSpec](spec::DiscreteSpec)),
//!    renormalized when the probabilities do not sum to 1.
//!
//! ## Pipeline
//!
//! A typical simulation run:
//!
//!  1. Build a spec ([spec]) and a seeded [SeededSource](random_source::SeededSource).
//!  2. Draw a [Sample](sampler::Sample) with [draw_continuous](sampler::draw_continuous)
//!     or [draw_discrete](sampler::draw_discrete).
//!  3. Estimate moments with [Samples](samples::Samples).
//!  4. Validate with [chi_square_test](hypothesis::chi_square_test) and report
//!     discrepancies with [compare_moments](discrepancy::compare_moments).
//!
//! Every run owns its data: nothing is shared, so independent runs can go on
//! separate threads as long as each one has its own source.
//!
//! ***
//!

pub mod configuration;
pub mod discrepancy;
pub mod errors;
pub mod euclid;
pub mod histogram;
pub mod hypothesis;
pub mod queueing;
pub mod random_source;
pub mod sampler;
pub mod samples;
pub mod spec;
