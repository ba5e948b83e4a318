//! Sample summaries and a configurable test engine.
//!
//! [`WelchTest`] bundles the incomplete beta primitive with the Welch
//! operations so callers can pick (or substitute) the numeric backend once
//! and then work with [`SampleSummary`] values.
//!
//! # Examples
//! ```
//! use welch_ttest::{SampleSummary, WelchTest};
//!
//! let treatment = SampleSummary::new(50, 0.25, 0.01);
//! let control = SampleSummary::new(52, 0.20, 0.02);
//!
//! let test = WelchTest::new();
//! let report = test.report(&treatment, &control).unwrap();
//! assert!((report.confidence - 0.958544).abs() < 1e-4);
//! assert!(report.p_value < 0.025);
//! ```

use tracing::debug;

use crate::distribution::{students_t_cdf_with, try_students_t_cdf_with, Tail};
use crate::error::WelchError;
use crate::special::{ContinuedFraction, IncompleteBeta};
use crate::welch;

/// Aggregate statistics of one sample.
///
/// The crate never computes these from raw observations; they are supplied
/// by the caller. `variance` is the sample variance (Bessel-corrected).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleSummary {
    /// Number of observations.
    pub count: u64,
    /// Sample mean.
    pub mean: f64,
    /// Sample variance, expected to be non-negative.
    pub variance: f64,
}

impl SampleSummary {
    /// Creates a summary from count, mean and variance.
    pub fn new(count: u64, mean: f64, variance: f64) -> Self {
        Self {
            count,
            mean,
            variance,
        }
    }

    /// Squared standard error of the mean, `variance / count`.
    ///
    /// `None` for an empty sample.
    pub fn standard_error_squared(&self) -> Option<f64> {
        (self.count > 0).then(|| self.variance / self.count as f64)
    }
}

/// Every intermediate value of a Welch comparison of X against Y.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WelchReport {
    /// Welch–Satterthwaite degrees of freedom.
    pub degrees_of_freedom: f64,
    /// Welch's t-statistic, positive when X has the larger mean.
    pub t_score: f64,
    /// Upper-tail p-value `P(T > t)`.
    pub p_value: f64,
    /// Confidence that the true mean of X exceeds that of Y.
    pub confidence: f64,
}

/// Welch t-test operations bound to an incomplete beta primitive.
///
/// `WelchTest::new()` uses [`ContinuedFraction`] with default settings;
/// [`WelchTest::with_beta`] accepts any [`IncompleteBeta`], including
/// closures.
#[derive(Debug, Clone, Copy, Default)]
pub struct WelchTest<B = ContinuedFraction> {
    beta: B,
}

impl WelchTest<ContinuedFraction> {
    /// Engine backed by the default continued-fraction primitive.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<B: IncompleteBeta> WelchTest<B> {
    /// Engine backed by a caller-supplied primitive.
    ///
    /// # Examples
    /// ```
    /// use welch_ttest::{Tail, WelchTest};
    /// let test = WelchTest::with_beta(|_x: f64, _a: f64, _b: f64| 0.5);
    /// assert_eq!(test.students_t_cdf(1.0, 5.0, Tail::Upper), 0.25);
    /// ```
    pub fn with_beta(beta: B) -> Self {
        Self { beta }
    }

    /// The primitive in use.
    pub fn beta(&self) -> &B {
        &self.beta
    }

    /// See [`crate::distribution::students_t_cdf`].
    pub fn students_t_cdf(&self, t_score: f64, dgf: f64, tail: Tail) -> f64 {
        students_t_cdf_with(&self.beta, t_score, dgf, tail)
    }

    /// See [`crate::distribution::try_students_t_cdf`].
    ///
    /// # Errors
    /// [`WelchError::InvalidDegreesOfFreedom`] if `dgf < 1`.
    pub fn try_students_t_cdf(&self, t_score: f64, dgf: f64, tail: Tail) -> Result<f64, WelchError> {
        try_students_t_cdf_with(&self.beta, t_score, dgf, tail)
    }

    /// Welch–Satterthwaite degrees of freedom for `x` and `y`; `0.0` if undefined.
    pub fn degrees_of_freedom(&self, x: &SampleSummary, y: &SampleSummary) -> f64 {
        welch::degrees_of_freedom(x.count, y.count, x.variance, y.variance)
    }

    /// Checked [`WelchTest::degrees_of_freedom`].
    ///
    /// # Errors
    /// See [`welch::try_degrees_of_freedom`].
    pub fn try_degrees_of_freedom(
        &self,
        x: &SampleSummary,
        y: &SampleSummary,
    ) -> Result<f64, WelchError> {
        welch::try_degrees_of_freedom(x.count, y.count, x.variance, y.variance)
    }

    /// Welch's t-statistic for `x` against `y`; `0.0` if undefined.
    pub fn t_score(&self, x: &SampleSummary, y: &SampleSummary) -> f64 {
        welch::t_score(x.count, y.count, x.mean, y.mean, x.variance, y.variance)
    }

    /// Checked [`WelchTest::t_score`].
    ///
    /// # Errors
    /// See [`welch::try_t_score`].
    pub fn try_t_score(&self, x: &SampleSummary, y: &SampleSummary) -> Result<f64, WelchError> {
        welch::try_t_score(x.count, y.count, x.mean, y.mean, x.variance, y.variance)
    }

    /// Confidence that the true mean of `x` exceeds that of `y`; `0.0` when
    /// there is no evidence or the inputs are degenerate.
    pub fn confidence(&self, x: &SampleSummary, y: &SampleSummary) -> f64 {
        welch::confidence_with(
            &self.beta,
            x.count,
            y.count,
            x.mean,
            y.mean,
            x.variance,
            y.variance,
        )
    }

    /// Checked [`WelchTest::confidence`].
    ///
    /// # Errors
    /// See [`welch::try_confidence_with`].
    pub fn try_confidence(&self, x: &SampleSummary, y: &SampleSummary) -> Result<f64, WelchError> {
        welch::try_confidence_with(
            &self.beta,
            x.count,
            y.count,
            x.mean,
            y.mean,
            x.variance,
            y.variance,
        )
    }

    /// Runs the whole pipeline and keeps every intermediate value.
    ///
    /// Unlike [`WelchTest::confidence`], the t-score, degrees of freedom and
    /// p-value are reported even when X has the smaller mean; the
    /// confidence is then `0.0`.
    ///
    /// # Errors
    /// Any [`WelchError`] from the degrees of freedom, t-score or CDF.
    pub fn report(&self, x: &SampleSummary, y: &SampleSummary) -> Result<WelchReport, WelchError> {
        let degrees_of_freedom = self.try_degrees_of_freedom(x, y)?;
        let t_score = self.try_t_score(x, y)?;
        let p_value = self.try_students_t_cdf(t_score, degrees_of_freedom, Tail::Upper)?;
        let confidence = if t_score > 0.0 {
            welch::confidence_from_p_value(p_value)
        } else {
            0.0
        };

        debug!(
            degrees_of_freedom,
            t_score, p_value, confidence, "welch comparison"
        );

        Ok(WelchReport {
            degrees_of_freedom,
            t_score,
            p_value,
            confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-4;

    fn pair() -> (SampleSummary, SampleSummary) {
        (
            SampleSummary::new(1447, 0.1181755, 0.2315297),
            SampleSummary::new(1573, 0.08010172, 0.1462514),
        )
    }

    #[test]
    fn test_methods_match_free_functions() {
        let (x, y) = pair();
        let test = WelchTest::new();
        assert_eq!(
            test.degrees_of_freedom(&x, &y),
            welch::degrees_of_freedom(1447, 1573, 0.2315297, 0.1462514)
        );
        assert_eq!(
            test.t_score(&x, &y),
            welch::t_score(1447, 1573, 0.1181755, 0.08010172, 0.2315297, 0.1462514)
        );
        assert!((test.confidence(&x, &y) - 0.983257).abs() < TOL);
        assert_eq!(test.try_confidence(&x, &y), Ok(test.confidence(&x, &y)));
    }

    #[test]
    fn test_report_consistent() {
        let (x, y) = pair();
        let test = WelchTest::new();
        let r = test.report(&x, &y).expect("defined");
        assert_eq!(r.degrees_of_freedom, test.degrees_of_freedom(&x, &y));
        assert_eq!(r.t_score, test.t_score(&x, &y));
        assert_eq!(r.confidence, test.confidence(&x, &y));
        assert!((r.confidence - (1.0 - 2.0 * r.p_value)).abs() < 1e-15);
    }

    #[test]
    fn test_report_reverse_direction() {
        let (x, y) = pair();
        let r = WelchTest::new().report(&y, &x).expect("defined");
        assert!(r.t_score < 0.0);
        assert!(r.p_value > 0.5);
        assert_eq!(r.confidence, 0.0);
    }

    #[test]
    fn test_report_errors() {
        let test = WelchTest::new();
        let one = SampleSummary::new(1, 3.0, 0.0);
        let many = SampleSummary::new(30, 2.0, 1.0);
        assert!(matches!(
            test.report(&one, &many),
            Err(WelchError::InsufficientSamples { required: 2, .. })
        ));

        let flat = SampleSummary::new(30, 2.0, 0.0);
        assert_eq!(test.report(&flat, &flat), Err(WelchError::DegenerateVariance));
    }

    #[test]
    fn test_injected_beta() {
        let calls = std::cell::Cell::new(0_u32);
        let counting = |x: f64, a: f64, b: f64| {
            calls.set(calls.get() + 1);
            ContinuedFraction::default().regularized(x, a, b)
        };
        let test = WelchTest::with_beta(counting);
        let (x, y) = pair();
        let c = test.confidence(&x, &y);
        assert!((c - 0.983257).abs() < TOL);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_custom_continued_fraction() {
        let test = WelchTest::with_beta(ContinuedFraction::new(400, 1e-15));
        assert_eq!(test.beta().max_iterations, 400);
        let p = test.students_t_cdf(1.0, 3.0, Tail::Upper);
        assert!((p - 0.1955011).abs() < TOL);
        assert!(test.try_students_t_cdf(1.0, 0.0, Tail::Upper).is_err());
    }

    #[test]
    fn test_standard_error_squared() {
        assert_eq!(SampleSummary::new(4, 1.0, 2.0).standard_error_squared(), Some(0.5));
        assert_eq!(SampleSummary::new(0, 1.0, 2.0).standard_error_squared(), None);
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WelchTest>();
        assert_send_sync::<SampleSummary>();
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip_summary() {
        let s: SampleSummary =
            serde_json::from_str(r#"{"count": 50, "mean": 0.25, "variance": 0.01}"#).unwrap();
        assert_eq!(s, SampleSummary::new(50, 0.25, 0.01));

        let beta: ContinuedFraction = serde_json::from_str(r#"{"epsilon": 1e-10}"#).unwrap();
        assert_eq!(beta.max_iterations, 200);
        assert_eq!(beta.epsilon, 1e-10);

        let tail: Tail = serde_json::from_str(r#""upper""#).unwrap();
        assert_eq!(tail, Tail::Upper);
    }
}
