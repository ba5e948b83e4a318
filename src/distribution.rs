//! Student's t-distribution tail probabilities.
//!
//! The CDF is expressed through the regularized incomplete beta function:
//!
//! ```text
//! x = ν / (t² + ν)
//! I = I_x(ν/2, 1/2)            (twice the smaller tail)
//! ```
//!
//! Because the distribution is symmetric about zero, `I / 2` is the mass of
//! whichever tail lies beyond `|t|`; the other side is `1 − I / 2`.
//!
//! ```text
//!                 * *
//!               *     *
//!              *       *
//!             *         *
//!            *           *    upper tail
//!           *            **    /
//!          *             ***  /
//!        *               *****
//!  * * *                 ***********
//! -----------------|-----|-----------------
//!                  0     t
//! ```

use tracing::trace;

use crate::error::WelchError;
use crate::special::{ContinuedFraction, IncompleteBeta};

/// Which side of the distribution a CDF query refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Tail {
    /// `P(T > t)`.
    Upper,
    /// `P(T ≤ t)`.
    Lower,
}

impl Tail {
    /// The opposite tail.
    pub fn flip(self) -> Self {
        match self {
            Tail::Upper => Tail::Lower,
            Tail::Lower => Tail::Upper,
        }
    }
}

/// Tail probability of Student's t-distribution, checked.
///
/// # Errors
/// [`WelchError::InvalidDegreesOfFreedom`] if `dgf < 1` or `dgf` is NaN.
///
/// # Examples
/// ```
/// use welch_ttest::distribution::{try_students_t_cdf_with, Tail};
/// use welch_ttest::special::ContinuedFraction;
/// let beta = ContinuedFraction::default();
/// let p = try_students_t_cdf_with(&beta, 1.0, 3.0, Tail::Upper).unwrap();
/// assert!((p - 0.1955011).abs() < 1e-6);
/// assert!(try_students_t_cdf_with(&beta, 1.0, 0.5, Tail::Upper).is_err());
/// ```
pub fn try_students_t_cdf_with<B>(
    beta: &B,
    t_score: f64,
    dgf: f64,
    tail: Tail,
) -> Result<f64, WelchError>
where
    B: IncompleteBeta + ?Sized,
{
    if dgf.is_nan() || dgf < 1.0 {
        trace!(dgf, "t-distribution undefined below one degree of freedom");
        return Err(WelchError::InvalidDegreesOfFreedom(dgf));
    }

    let x = dgf / (t_score * t_score + dgf);
    let inc_beta = beta.regularized(x, dgf / 2.0, 0.5);

    // `inc_beta / 2` is the tail beyond |t|: the lower tail for negative t,
    // the upper tail otherwise.
    if (t_score < 0.0) != (tail == Tail::Upper) {
        Ok(inc_beta / 2.0)
    } else {
        Ok(1.0 - inc_beta / 2.0)
    }
}

/// Tail probability of Student's t-distribution using a caller-supplied
/// incomplete beta primitive.
///
/// Returns `0.0` when `dgf < 1`.
pub fn students_t_cdf_with<B>(beta: &B, t_score: f64, dgf: f64, tail: Tail) -> f64
where
    B: IncompleteBeta + ?Sized,
{
    try_students_t_cdf_with(beta, t_score, dgf, tail).unwrap_or(0.0)
}

/// Checked [`students_t_cdf`].
///
/// # Errors
/// [`WelchError::InvalidDegreesOfFreedom`] if `dgf < 1` or `dgf` is NaN.
pub fn try_students_t_cdf(t_score: f64, dgf: f64, tail: Tail) -> Result<f64, WelchError> {
    try_students_t_cdf_with(&ContinuedFraction::default(), t_score, dgf, tail)
}

/// Probability mass in the requested tail of Student's t-distribution with
/// `dgf` degrees of freedom, evaluated at `t_score`.
///
/// - [`Tail::Upper`]: `P(T > t_score)`
/// - [`Tail::Lower`]: `P(T ≤ t_score)`
///
/// # Returns
/// `0.0` if `dgf < 1`. This is a sentinel for "undefined distribution" and
/// is indistinguishable from a genuine zero probability; use
/// [`try_students_t_cdf`] to tell them apart.
///
/// # Examples
/// ```
/// use welch_ttest::distribution::{students_t_cdf, Tail};
/// assert!((students_t_cdf(0.0, 10.0, Tail::Upper) - 0.5).abs() < 1e-10);
/// assert!((students_t_cdf(4.0, 1.0, Tail::Lower) - 0.92202087).abs() < 1e-6);
/// assert_eq!(students_t_cdf(1.0, 0.0, Tail::Upper), 0.0);
/// ```
pub fn students_t_cdf(t_score: f64, dgf: f64, tail: Tail) -> f64 {
    try_students_t_cdf(t_score, dgf, tail).unwrap_or(0.0)
}
