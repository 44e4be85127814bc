//! The source of randomness of the engine.
//!
//! The samplers never talk to [rand] directly: they only see the
//! [RandomSource] trait. This keeps the sampling algorithms deterministic and
//! testable (a scripted implementation can feed them hand-picked values) and
//! concentrates the PRNG choice in a single place.
//!

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A deterministic stream of random variates.
///
/// The 2 sampling primitives the engine needs:
///  - [RandomSource::uniform]: a uniform draw on `[0, 1)`.
///  - [RandomSource::normal]: a normal draw with the given mean and
///    standard deviation.
///
/// An implementation must be deterministic: the same seed and the same call
/// sequence must produce the same values. A source is owned by a single
/// simulation run; it is **not** meant to be shared between threads.
pub trait RandomSource {
    /// Returns a uniformly distributed value in `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Returns a normally distributed value with mean `mean` and standard
    /// deviation `std_dev`.
    fn normal(&mut self, mean: f64, std_dev: f64) -> f64;

    /// Returns the seed this source was created with.
    fn seed(&self) -> u64;
}

/// The deafult [RandomSource]: a seeded [StdRng].
///
/// Normal variates are generated with the
/// [Box-Muller transform](https://en.wikipedia.org/wiki/Box%E2%80%93Muller_transform)
/// on top of the uniform stream. Each transform produces 2 independent
/// standard normal values; the second one is cached and returned by the next
/// call, so consecutive calls consume the uniform stream in a predictable way.
pub struct SeededSource {
    rng: StdRng,
    seed: u64,
    /// The spare standard normal value left over from the last Box-Muller
    /// transform, if any.
    spare_standard_normal: Option<f64>,
}

impl SeededSource {
    /// Creates a new [SeededSource] from the given seed.
    #[must_use]
    pub fn new(seed: u64) -> SeededSource {
        return SeededSource {
            rng: StdRng::seed_from_u64(seed),
            seed: seed,
            spare_standard_normal: None,
        };
    }

    /// Returns a standard normal value (mean 0, standard deviation 1).
    fn standard_normal(&mut self) -> f64 {
        if let Some(spare) = self.spare_standard_normal.take() {
            return spare;
        }

        // Box-Muller: u1 is mapped to (0, 1] so the logarithm is finite.
        let u1: f64 = 1.0 - self.rng.random::<f64>();
        let u2: f64 = self.rng.random::<f64>();

        let radius: f64 = (-2.0 * u1.ln()).sqrt();
        let angle: f64 = 2.0 * std::f64::consts::PI * u2;

        self.spare_standard_normal = Some(radius * angle.sin());
        return radius * angle.cos();
    }
}

impl RandomSource for SeededSource {
    fn uniform(&mut self) -> f64 {
        return self.rng.random::<f64>();
    }

    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        return mean + std_dev * self.standard_normal();
    }

    fn seed(&self) -> u64 {
        return self.seed;
    }
}
