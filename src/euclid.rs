//! Euclid contains the special functions needed by the engine.
//!
//! Everything here is a plain `f64 -> f64` computation with no state:
//!  - [ln_gamma]: log-gamma trough the Lanczos approximation.
//!  - [lower_incomplete_gamma]: the regularized lower incomplete gamma
//!    function `P(a, x)`, the building block of the chi-square CDF.
//!  - [chi_squared_pdf] / [chi_squared_cdf] / [chi_squared_quantile]: the
//!    null distribution of the goodness-of-fit statistic.
//!  - [std_normal_cdf] / [std_normal_quantile]: used for the expected bin
//!    frequencies of a normal model and for its inverse CDF.
//!

use std::f64::consts;

use crate::configuration::numerics;

/// Computes the natural logarithm of the [gamma function](https://en.wikipedia.org/wiki/Gamma_function)
/// using the [Lanczos approximation](https://en.wikipedia.org/wiki/Lanczos_approximation)
/// (g = 7, 9 coefficients).
///
/// For `x < 0.5` the [reflection formula](https://en.wikipedia.org/wiki/Reflection_formula)
/// is used. The absolute error is arround `10^-13` for the arguments this
/// library needs (positive half-integers).
#[must_use]
pub fn ln_gamma(x: f64) -> f64 {
    const LANCZOS_COEFFICIENTS: [f64; 9] = [
        0.99999999999980993,
        676.5203681218851,
        -1259.1392167224028,
        771.32342877765313,
        -176.61502916214059,
        12.507343278686905,
        -0.13857109526572012,
        9.9843695780195716e-6,
        1.5056327351493116e-7,
    ];

    if x < 0.5 {
        // Reflection formula: gamma(x) * gamma(1-x) = pi / sin(pi*x)
        let ln_pi_sin: f64 = (consts::PI * x).sin().abs().ln();
        return consts::PI.ln() - ln_pi_sin - ln_gamma(1.0 - x);
    }

    let z: f64 = x - 1.0;
    let mut accumulator: f64 = LANCZOS_COEFFICIENTS[0];
    for (i, &coefficient) in LANCZOS_COEFFICIENTS[1..].iter().enumerate() {
        accumulator += coefficient / (z + i as f64 + 1.0);
    }

    let t: f64 = z + 7.5;
    return 0.5 * (2.0 * consts::PI).ln() + (z + 0.5) * t.ln() - t + accumulator.ln();
}

/// Computes the [regularized lower incomplete gamma function](https://en.wikipedia.org/wiki/Incomplete_gamma_function#Regularized_gamma_functions_and_Poisson_random_variables)
/// `P(a, x)`.
///
/// **Panicks** if `a <= 0.0` or if `x` is negative or NaN (contract violation,
/// the callers in this crate only evaluate it at valid points).
#[must_use]
pub fn lower_incomplete_gamma(a: f64, x: f64) -> f64 {
    /*
           Plan:

        Standard split (Numerical Recipes 6.2):
         - For `x < a + 1` the series expansion of P(a, x) converges fast:

           P(a, x) = exp(-x + a*ln(x) - ln_gamma(a)) * sum_{n>=0} x^n / (a*(a+1)*...*(a+n))

         - Otherwise the continued fraction for Q(a, x) = 1 - P(a, x)
           converges fast. We evaluate it with the modified Lentz method:

           Q(a, x) = exp(-x + a*ln(x) - ln_gamma(a)) * 1/(x+1-a- 1*(1-a)/(x+3-a- ...))

        Both loops are bounded by INCOMPLETE_GAMMA_MAX_ITERS and stop once the
        relative update is below INCOMPLETE_GAMMA_EPS.
    */

    if !(0.0 < a) || x.is_nan() || x < 0.0 {
        std::panic!("Tried to evaluate `lower_incomplete_gamma` outside its domain. \n");
    }

    if x == 0.0 {
        return 0.0;
    }

    let eps: f64 = numerics::INCOMPLETE_GAMMA_EPS;
    let max_iters: usize = numerics::INCOMPLETE_GAMMA_MAX_ITERS;

    // common prefactor: exp(-x + a*ln(x) - ln_gamma(a))
    let ln_prefactor: f64 = -x + a * x.ln() - ln_gamma(a);
    let prefactor: f64 = ln_prefactor.exp();

    if x < a + 1.0 {
        // series expansion
        let mut term: f64 = 1.0 / a;
        let mut sum: f64 = term;
        let mut denominator: f64 = a;

        for _ in 0..max_iters {
            denominator += 1.0;
            term = term * (x / denominator);
            sum += term;

            if term.abs() < sum.abs() * eps {
                break;
            }
        }

        return (prefactor * sum).clamp(0.0, 1.0);
    }

    // continued fraction with the modified Lentz method
    let tiny: f64 = 1e-30;

    let mut b: f64 = x + 1.0 - a;
    let mut c: f64 = 1.0 / tiny;
    let mut d: f64 = 1.0 / b;
    let mut h: f64 = d;

    for i in 1..=max_iters {
        let i_f64: f64 = i as f64;
        let numerator: f64 = -i_f64 * (i_f64 - a);
        b += 2.0;

        d = numerator * d + b;
        if d.abs() < tiny {
            d = tiny;
        }
        c = b + numerator / c;
        if c.abs() < tiny {
            c = tiny;
        }
        d = 1.0 / d;

        let delta: f64 = d * c;
        h = h * delta;

        if (delta - 1.0).abs() < eps {
            break;
        }
    }

    let upper: f64 = prefactor * h;
    return (1.0 - upper).clamp(0.0, 1.0);
}

/// Evaluates the pdf of the [chi-square distribution](https://en.wikipedia.org/wiki/Chi-squared_distribution)
/// with `degrees_of_freedom` at point `x`.
///
/// Uses the log-space normalization constant to avoid overflow:
/// `pdf(x | k) = exp(-(k/2)*ln(2) - ln_gamma(k/2)) * x^(k/2 - 1) * exp(-x/2)`
#[must_use]
pub fn chi_squared_pdf(x: f64, degrees_of_freedom: f64) -> f64 {
    if x < 0.0 {
        return 0.0;
    }

    let half_k: f64 = degrees_of_freedom * 0.5;
    let normalization: f64 = (-half_k * consts::LN_2 - ln_gamma(half_k)).exp();
    return x.powf(half_k - 1.0) * (-0.5 * x).exp() * normalization;
}

/// Evaluates the CDF of the [chi-square distribution](https://en.wikipedia.org/wiki/Chi-squared_distribution)
/// with `degrees_of_freedom` at point `x`.
///
/// `CDF(x | k) = P(k/2, x/2)` where `P` is [lower_incomplete_gamma].
#[must_use]
pub fn chi_squared_cdf(x: f64, degrees_of_freedom: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }

    return lower_incomplete_gamma(degrees_of_freedom * 0.5, x * 0.5);
}

/// Evaluates the quantile function (inverse CDF) of the
/// [chi-square distribution](https://en.wikipedia.org/wiki/Chi-squared_distribution)
/// with `degrees_of_freedom`.
///
///  - if `p <= 0.0`, returns `0.0`.
///  - if `1.0 <= p`, returns `f64::INFINITY`.
///  - **Panicks** if `p` is a NaN.
#[must_use]
pub fn chi_squared_quantile(p: f64, degrees_of_freedom: f64) -> f64 {
    /*
           Plan:

        Start from the [Wilson-Hilferty approximation](https://en.wikipedia.org/wiki/Chi-squared_distribution#Asymptotic_properties):

        x ~= k * (1 - 2/(9k) + z * sqrt(2/(9k)))^3

        where `z` is the standard normal quantile at `p`. Then refine with
        Newton's method on `cdf(x) - p` (the derivative is just the pdf).
        The starting point is already within a few percent for the degrees of
        freedom used in binning tests, so the iteration converges quickly.
    */

    if p.is_nan() {
        std::panic!("Tried to evaluate `chi_squared_quantile` with a NaN value. \n");
    }

    if p <= 0.0 {
        return 0.0;
    }
    if 1.0 <= p {
        return f64::INFINITY;
    }

    let k: f64 = degrees_of_freedom;

    // Wilson-Hilferty starting point
    let z: f64 = std_normal_quantile(p);
    let aux: f64 = 2.0 / (9.0 * k);
    let cube_root: f64 = 1.0 - aux + z * aux.sqrt();
    let mut x: f64 = k * cube_root * cube_root * cube_root;

    if !x.is_finite() || x <= 0.0 {
        // the approximation broke down (tiny k or extreme p), fall back to k
        x = k;
    }

    for _ in 0..numerics::CHI_SQUARED_QUANTILE_NEWTON_STEPS {
        let cdf_x: f64 = chi_squared_cdf(x, k);
        let pdf_x: f64 = chi_squared_pdf(x, k);

        if pdf_x.abs() < f64::MIN_POSITIVE {
            break;
        }

        let step: f64 = (cdf_x - p) / pdf_x;
        let mut next: f64 = x - step;

        if next <= 0.0 {
            // keep the iterate inside the support
            next = x * 0.5;
        }

        let relative_change: f64 = ((next - x) / x).abs();
        x = next;

        if relative_change < 1e-12 {
            break;
        }
    }

    return x;
}

/// Evaluates the CDF of the standard [normal distribution](https://en.wikipedia.org/wiki/Normal_distribution)
/// at point `x`.
///
/// Uses the rational Chebyshev fit to the complementary error function
/// (Numerical Recipes `erfcc`), with a maximum absolute error arround
/// `1.2 * 10^-7`. That is plenty for expected bin frequencies; the
/// chi-square side of the test uses the exact [lower_incomplete_gamma].
#[must_use]
pub fn std_normal_cdf(x: f64) -> f64 {
    return 0.5 * erfc(-x / consts::SQRT_2);
}

/// Complementary error function `erfc(x) = 1 - erf(x)`.
///
/// Rational Chebyshev approximation, maximum absolute error `1.2 * 10^-7`.
#[must_use]
pub fn erfc(x: f64) -> f64 {
    let z: f64 = x.abs();
    let t: f64 = 1.0 / (1.0 + 0.5 * z);

    // Horner's rule over the Chebyshev coefficients
    let polynomial: f64 = t.mul_add(
        t.mul_add(
            t.mul_add(
                t.mul_add(
                    t.mul_add(
                        t.mul_add(
                            t.mul_add(t.mul_add(t.mul_add(0.17087277, -0.82215223), 1.48851587), -1.13520398),
                            0.27886807,
                        ),
                        -0.18628806,
                    ),
                    0.09678418,
                ),
                0.37409196,
            ),
            1.00002368,
        ),
        -1.26551223,
    );

    let answer: f64 = t * (-z * z + polynomial).exp();

    return if x < 0.0 { 2.0 - answer } else { answer };
}

/// Evaluates the quantile function (inverse CDF) of the standard
/// [normal distribution](https://en.wikipedia.org/wiki/Normal_distribution).
///
///  - if `p <= 0.0`, returns `f64::NEG_INFINITY`.
///  - if `1.0 <= p`, returns `f64::INFINITY`.
///  - **Panicks** if `p` is a NaN.
///
/// Uses [Acklam's approximation](https://web.archive.org/web/20151110174102/http://home.online.no/~pjacklam/notes/invnorm/)
/// wich has a relative error under `1.15 * 10^-9` over the whole range.
#[must_use]
pub fn std_normal_quantile(p: f64) -> f64 {
    if p.is_nan() {
        std::panic!("Tried to evaluate `std_normal_quantile` with a NaN value. \n");
    }

    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if 1.0 <= p {
        return f64::INFINITY;
    }

    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];

    const P_LOW: f64 = 0.02425;
    const P_HIGH: f64 = 1.0 - P_LOW;

    if p < P_LOW {
        // lower tail
        let q: f64 = (-2.0 * p.ln()).sqrt();
        let numerator: f64 =
            ((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5];
        let denominator: f64 = (((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0;
        return numerator / denominator;
    }

    if P_HIGH < p {
        // upper tail, by symmetry
        let q: f64 = (-2.0 * (1.0 - p).ln()).sqrt();
        let numerator: f64 =
            ((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5];
        let denominator: f64 = (((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0;
        return -numerator / denominator;
    }

    // central region
    let q: f64 = p - 0.5;
    let r: f64 = q * q;
    let numerator: f64 =
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q;
    let denominator: f64 =
        ((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0;
    return numerator / denominator;
}
