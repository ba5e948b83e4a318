//! Special mathematical functions.
//!
//! The regularized incomplete beta function is the one numeric primitive the
//! Welch pipeline depends on. It is exposed both as a plain function and
//! behind the [`IncompleteBeta`] trait so callers can substitute their own
//! implementation (a different library, a fixed table in tests).

/// Evaluates the regularized incomplete beta function `I_x(a, b)`.
///
/// Implementations must return a value in `[0, 1]` for `a, b > 0` and
/// `x ∈ [0, 1]`, accurate to at least six significant digits for
/// `a ≥ 0.5`, `b = 0.5`. `I_0(a, b) = 0` and `I_1(a, b) = 1`.
///
/// Any `Fn(x, a, b) -> f64` closure implements this trait.
///
/// # Examples
/// ```
/// use welch_ttest::special::{ContinuedFraction, IncompleteBeta};
/// let beta = ContinuedFraction::default();
/// assert!((beta.regularized(0.5, 1.0, 1.0) - 0.5).abs() < 1e-10);
///
/// let fixed = |_x: f64, _a: f64, _b: f64| 0.25;
/// assert_eq!(fixed.regularized(0.3, 2.0, 0.5), 0.25);
/// ```
pub trait IncompleteBeta {
    /// Returns `I_x(a, b)`.
    fn regularized(&self, x: f64, a: f64, b: f64) -> f64;
}

impl<F> IncompleteBeta for F
where
    F: Fn(f64, f64, f64) -> f64,
{
    fn regularized(&self, x: f64, a: f64, b: f64) -> f64 {
        self(x, a, b)
    }
}

// ============================================================================
// Log Gamma / Log Beta
// ============================================================================

/// Lanczos approximation of ln Γ(x).
///
/// Reference: Lanczos (1964), "A Precision Approximation of the Gamma
/// Function", *SIAM Journal on Numerical Analysis* 1(1).
///
/// # Accuracy
/// Relative error < 2 × 10⁻¹⁰ for x > 0.
///
/// # Examples
/// ```
/// use welch_ttest::special::ln_gamma;
/// // Γ(5) = 24
/// assert!((ln_gamma(5.0) - 24.0_f64.ln()).abs() < 1e-10);
/// ```
pub fn ln_gamma(x: f64) -> f64 {
    #[allow(clippy::excessive_precision)]
    const LANCZOS: [f64; 9] = [
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
    const G: f64 = 7.0;

    if x < 0.5 {
        // Reflection: Γ(x)Γ(1−x) = π / sin(πx)
        let pi = std::f64::consts::PI;
        return (pi / (pi * x).sin()).ln() - ln_gamma(1.0 - x);
    }

    let z = x - 1.0;
    let series = LANCZOS[1..]
        .iter()
        .enumerate()
        .fold(LANCZOS[0], |acc, (i, &c)| acc + c / (z + i as f64 + 1.0));

    let t = z + G + 0.5;
    0.5 * (2.0 * std::f64::consts::PI).ln() + (z + 0.5) * t.ln() - t + series.ln()
}

/// `ln B(a, b) = ln Γ(a) + ln Γ(b) − ln Γ(a+b)`.
///
/// # Examples
/// ```
/// use welch_ttest::special::ln_beta;
/// // B(1,1) = 1
/// assert!(ln_beta(1.0, 1.0).abs() < 1e-10);
/// ```
pub fn ln_beta(a: f64, b: f64) -> f64 {
    ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b)
}

// ============================================================================
// Regularized Incomplete Beta Function
// ============================================================================

/// Continued-fraction evaluator for `I_x(a, b)`.
///
/// # Algorithm
/// Modified Lentz evaluation of the continued fraction for the incomplete
/// beta function, switching to `I_x(a,b) = 1 − I_{1−x}(b,a)` when
/// `x > (a+1)/(a+b+2)` so the fraction converges quickly.
///
/// Reference: Press et al. (2007), *Numerical Recipes*, 3rd ed., §6.4.
///
/// # Accuracy
/// Relative error < 1e-10 for typical parameter ranges with the default
/// settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContinuedFraction {
    /// Upper bound on Lentz iterations.
    pub max_iterations: usize,
    /// Stop once a step changes the running product by less than this.
    pub epsilon: f64,
}

impl ContinuedFraction {
    /// Lentz guard against division by zero.
    const TINY: f64 = 1e-30;

    /// Creates an evaluator with custom convergence settings.
    pub fn new(max_iterations: usize, epsilon: f64) -> Self {
        Self {
            max_iterations,
            epsilon,
        }
    }

    fn lentz(&self, x: f64, a: f64, b: f64) -> f64 {
        let tiny = Self::TINY;

        let mut c = 1.0;
        let mut d = 1.0 / (1.0 - (a + b) * x / (a + 1.0)).max(tiny);
        let mut h = d;

        for m in 1..=self.max_iterations {
            let m_f = m as f64;
            let num_even = m_f * (b - m_f) * x / ((a + 2.0 * m_f - 1.0) * (a + 2.0 * m_f));
            d = 1.0 / (1.0 + num_even * d).max(tiny);
            c = (1.0 + num_even / c).max(tiny);
            h *= d * c;

            let num_odd =
                -(a + m_f) * (a + b + m_f) * x / ((a + 2.0 * m_f) * (a + 2.0 * m_f + 1.0));
            d = 1.0 / (1.0 + num_odd * d).max(tiny);
            c = (1.0 + num_odd / c).max(tiny);
            let delta = d * c;
            h *= delta;

            if (delta - 1.0).abs() < self.epsilon {
                break;
            }
        }
        h
    }
}

impl Default for ContinuedFraction {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            epsilon: 1e-14,
        }
    }
}

impl IncompleteBeta for ContinuedFraction {
    fn regularized(&self, x: f64, a: f64, b: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }

        if x > (a + 1.0) / (a + b + 2.0) {
            return 1.0 - self.regularized(1.0 - x, b, a);
        }

        let ln_prefix = a * x.ln() + b * (1.0 - x).ln() - ln_beta(a, b);
        (ln_prefix.exp() / a) * self.lentz(x, a, b)
    }
}

/// Regularized incomplete beta function `I_x(a, b)` with default settings.
///
/// Shorthand for `ContinuedFraction::default().regularized(x, a, b)`.
///
/// # Examples
/// ```
/// use welch_ttest::special::regularized_incomplete_beta;
/// assert_eq!(regularized_incomplete_beta(0.0, 2.0, 3.0), 0.0);
/// assert_eq!(regularized_incomplete_beta(1.0, 2.0, 3.0), 1.0);
/// assert!((regularized_incomplete_beta(0.5, 1.0, 1.0) - 0.5).abs() < 1e-10);
/// ```
pub fn regularized_incomplete_beta(x: f64, a: f64, b: f64) -> f64 {
    ContinuedFraction::default().regularized(x, a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- ln_gamma / ln_beta ---

    #[test]
    fn test_ln_gamma_integers() {
        // Γ(n) = (n-1)!
        let factorials = [1.0, 1.0, 2.0, 6.0, 24.0, 120.0, 720.0_f64];
        for (n, &f) in factorials.iter().enumerate() {
            let x = (n + 1) as f64;
            assert!(
                (ln_gamma(x) - f.ln()).abs() < 1e-9,
                "ln_gamma({x}) = {}, expected {}",
                ln_gamma(x),
                f.ln()
            );
        }
    }

    #[test]
    fn test_ln_gamma_half() {
        // Γ(1/2) = √π; Γ(1/4) goes through the reflection branch
        let expected = std::f64::consts::PI.sqrt().ln();
        assert!((ln_gamma(0.5) - expected).abs() < 1e-10);
        assert!((ln_gamma(0.25) - 3.625_609_908_221_908_f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn test_ln_beta_known() {
        // B(2,3) = 1/12
        assert!((ln_beta(2.0, 3.0) - (1.0_f64 / 12.0).ln()).abs() < 1e-10);
        // B(1/2, 1/2) = π
        assert!((ln_beta(0.5, 0.5) - std::f64::consts::PI.ln()).abs() < 1e-10);
    }

    // --- regularized_incomplete_beta ---

    #[test]
    fn test_inc_beta_boundary() {
        assert_eq!(regularized_incomplete_beta(0.0, 2.0, 0.5), 0.0);
        assert_eq!(regularized_incomplete_beta(1.0, 2.0, 0.5), 1.0);
        assert_eq!(regularized_incomplete_beta(-0.5, 2.0, 0.5), 0.0);
        assert_eq!(regularized_incomplete_beta(1.5, 2.0, 0.5), 1.0);
    }

    #[test]
    fn test_inc_beta_uniform() {
        // I_x(1,1) = x
        for &x in &[0.1, 0.3, 0.5, 0.7, 0.9] {
            let result = regularized_incomplete_beta(x, 1.0, 1.0);
            assert!((result - x).abs() < 1e-10, "I_{x}(1,1) = {result}, expected {x}");
        }
    }

    #[test]
    fn test_inc_beta_half_half() {
        // I_x(1/2, 1/2) = (2/π) asin(√x), the t-distribution with one degree of freedom
        for &x in &[0.05, 0.2, 0.5, 0.8, 0.95] {
            let result = regularized_incomplete_beta(x, 0.5, 0.5);
            let expected = 2.0 / std::f64::consts::PI * x.sqrt().asin();
            assert!(
                (result - expected).abs() < 1e-9,
                "I_{x}(0.5,0.5) = {result}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_inc_beta_known_formula() {
        // I_x(a,1) = x^a
        for &x in &[0.1, 0.5, 0.9] {
            let result = regularized_incomplete_beta(x, 2.5, 1.0);
            assert!((result - x.powf(2.5)).abs() < 1e-10);
        }
    }

    #[test]
    fn test_custom_settings_converge() {
        let coarse = ContinuedFraction::new(50, 1e-8);
        let fine = ContinuedFraction::default();
        let (x, a, b) = (0.6, 7.5, 0.5);
        assert!((coarse.regularized(x, a, b) - fine.regularized(x, a, b)).abs() < 1e-6);
    }

    #[test]
    fn test_trait_object_and_closure() {
        let cf = ContinuedFraction::default();
        let dynamic: &dyn IncompleteBeta = &cf;
        assert_eq!(dynamic.regularized(0.3, 2.0, 0.5), cf.regularized(0.3, 2.0, 0.5));

        let constant = |_: f64, _: f64, _: f64| 0.125;
        assert_eq!(constant.regularized(0.9, 1.0, 0.5), 0.125);
    }
}
