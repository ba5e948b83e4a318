//! Welch's unequal-variances t-test from summary statistics.
//!
//! Every operation takes per-sample counts, means and variances and comes in
//! two forms:
//!
//! - a sentinel form returning `0.0` whenever the statistic is undefined,
//!   so results compose without branching;
//! - a checked `try_*` form returning [`WelchError`] for undefined inputs,
//!   so a computed zero can be told apart from "not computable".
//!
//! # Formulas
//!
//! ```text
//! sx = vx / nx,  sy = vy / ny
//!
//! t  = (x̄ − ȳ) / √(sx + sy)
//! ν  = (sx + sy)² / (sx² / (nx − 1) + sy² / (ny − 1))      Welch–Satterthwaite
//! ```
//!
//! Reference: Welch (1947), "The generalization of Student's problem when
//! several different population variances are involved", *Biometrika* 34.

use tracing::trace;

use crate::distribution::{students_t_cdf_with, try_students_t_cdf_with, Tail};
use crate::error::WelchError;
use crate::special::{ContinuedFraction, IncompleteBeta};

// ============================================================================
// Degrees of freedom
// ============================================================================

/// Checked [`degrees_of_freedom`].
///
/// # Errors
/// - [`WelchError::InsufficientSamples`] if either count is below 2.
/// - [`WelchError::DegenerateVariance`] if both variance terms vanish.
pub fn try_degrees_of_freedom(
    count_x: u64,
    count_y: u64,
    variance_x: f64,
    variance_y: f64,
) -> Result<f64, WelchError> {
    if count_x < 2 || count_y < 2 {
        trace!(count_x, count_y, "degrees of freedom need two observations per sample");
        return Err(WelchError::InsufficientSamples {
            count_x,
            count_y,
            required: 2,
        });
    }

    let nx = count_x as f64;
    let ny = count_y as f64;
    let sx = variance_x / nx;
    let sy = variance_y / ny;

    let denom = sx.powi(2) / (nx - 1.0) + sy.powi(2) / (ny - 1.0);
    if denom == 0.0 {
        trace!(variance_x, variance_y, "Welch–Satterthwaite denominator is zero");
        return Err(WelchError::DegenerateVariance);
    }

    Ok((sx + sy).powi(2) / denom)
}

/// Effective degrees of freedom for two samples with unequal variances
/// (Welch–Satterthwaite equation).
///
/// The result is fractional in general and is not rounded.
///
/// # Returns
/// `0.0` if either count is below 2 or both variances are zero.
///
/// # Examples
/// ```
/// use welch_ttest::welch::degrees_of_freedom;
/// assert!((degrees_of_freedom(10, 21, 0.25, 0.167) - 14.95541).abs() < 1e-4);
/// assert_eq!(degrees_of_freedom(2, 1, 0.25, 0.167), 0.0);
/// ```
pub fn degrees_of_freedom(count_x: u64, count_y: u64, variance_x: f64, variance_y: f64) -> f64 {
    try_degrees_of_freedom(count_x, count_y, variance_x, variance_y).unwrap_or(0.0)
}

// ============================================================================
// t-score
// ============================================================================

/// Checked [`t_score`].
///
/// # Errors
/// - [`WelchError::InsufficientSamples`] if either sample is empty.
/// - [`WelchError::ZeroStandardError`] if `vx/nx + vy/ny` is zero.
pub fn try_t_score(
    count_x: u64,
    count_y: u64,
    mean_x: f64,
    mean_y: f64,
    variance_x: f64,
    variance_y: f64,
) -> Result<f64, WelchError> {
    if count_x < 1 || count_y < 1 {
        trace!(count_x, count_y, "t-score undefined for an empty sample");
        return Err(WelchError::InsufficientSamples {
            count_x,
            count_y,
            required: 1,
        });
    }

    let denom = (variance_x / count_x as f64 + variance_y / count_y as f64).sqrt();
    if denom == 0.0 {
        trace!(variance_x, variance_y, "standard error of the difference is zero");
        return Err(WelchError::ZeroStandardError);
    }

    Ok((mean_x - mean_y) / denom)
}

/// Welch's t-statistic: the difference in means scaled by its standard error.
///
/// Positive when `mean_x > mean_y`; unbounded in magnitude.
///
/// # Returns
/// `0.0` if either sample is empty or the standard error is zero.
///
/// # Examples
/// ```
/// use welch_ttest::welch::t_score;
/// assert!((t_score(100, 101, 2.0, 3.0, 1.5, 2.0) + 5.36041).abs() < 1e-4);
/// assert_eq!(t_score(100, 101, 2.0, 2.0, 1.5, 1.5), 0.0);
/// ```
pub fn t_score(
    count_x: u64,
    count_y: u64,
    mean_x: f64,
    mean_y: f64,
    variance_x: f64,
    variance_y: f64,
) -> f64 {
    try_t_score(count_x, count_y, mean_x, mean_y, variance_x, variance_y).unwrap_or(0.0)
}

// ============================================================================
// Confidence
// ============================================================================

/// Checked confidence that the true mean of X exceeds that of Y, using a
/// caller-supplied incomplete beta primitive.
///
/// `Ok(0.0)` is a computed "no evidence" result: `mean_x < mean_y`, a
/// non-positive t-score, or an upper-tail p-value above one half.
///
/// # Errors
/// - [`WelchError::InsufficientSamples`] if either sample is empty, or has
///   fewer than two observations.
/// - [`WelchError::DegenerateVariance`] / [`WelchError::ZeroStandardError`]
///   if both variances are zero.
/// - [`WelchError::InvalidDegreesOfFreedom`] if the effective degrees of
///   freedom fall below one (only reachable with negative variances).
pub fn try_confidence_with<B>(
    beta: &B,
    count_x: u64,
    count_y: u64,
    mean_x: f64,
    mean_y: f64,
    variance_x: f64,
    variance_y: f64,
) -> Result<f64, WelchError>
where
    B: IncompleteBeta + ?Sized,
{
    if count_x < 1 || count_y < 1 {
        trace!(count_x, count_y, "confidence undefined for an empty sample");
        return Err(WelchError::InsufficientSamples {
            count_x,
            count_y,
            required: 1,
        });
    }
    if mean_x < mean_y {
        return Ok(0.0);
    }

    let dgf = try_degrees_of_freedom(count_x, count_y, variance_x, variance_y)?;
    let t = try_t_score(count_x, count_y, mean_x, mean_y, variance_x, variance_y)?;
    if t <= 0.0 {
        return Ok(0.0);
    }

    let p_value = try_students_t_cdf_with(beta, t, dgf, Tail::Upper)?;
    Ok(confidence_from_p_value(p_value))
}

/// Checked [`confidence`].
///
/// # Errors
/// See [`try_confidence_with`].
pub fn try_confidence(
    count_x: u64,
    count_y: u64,
    mean_x: f64,
    mean_y: f64,
    variance_x: f64,
    variance_y: f64,
) -> Result<f64, WelchError> {
    try_confidence_with(
        &ContinuedFraction::default(),
        count_x,
        count_y,
        mean_x,
        mean_y,
        variance_x,
        variance_y,
    )
}

/// [`confidence`] with a caller-supplied incomplete beta primitive.
pub fn confidence_with<B>(
    beta: &B,
    count_x: u64,
    count_y: u64,
    mean_x: f64,
    mean_y: f64,
    variance_x: f64,
    variance_y: f64,
) -> f64
where
    B: IncompleteBeta + ?Sized,
{
    if count_x < 1 || count_y < 1 || mean_x < mean_y {
        return 0.0;
    }

    let dgf = degrees_of_freedom(count_x, count_y, variance_x, variance_y);
    if dgf == 0.0 {
        return 0.0;
    }

    let t = t_score(count_x, count_y, mean_x, mean_y, variance_x, variance_y);
    if t <= 0.0 {
        return 0.0;
    }

    let p_value = students_t_cdf_with(beta, t, dgf, Tail::Upper);
    confidence_from_p_value(p_value)
}

/// Confidence in `[0, 1)` that the true mean of X strictly exceeds the true
/// mean of Y.
///
/// # Algorithm
/// With `t > 0` the upper-tail p-value is at most one half. Doubling it
/// gives the two-sided significance; `1 − 2p` approaches 1 as the evidence
/// strengthens.
///
/// Only "X exceeds Y" is reported. Swap the arguments for the other
/// direction; equal means give `0.0`.
///
/// # Returns
/// `0.0` if either sample is empty, `mean_x < mean_y`, the degrees of
/// freedom are undefined, or the t-score is not positive.
///
/// # Examples
/// ```
/// use welch_ttest::welch::confidence;
/// let c = confidence(50, 52, 0.25, 0.2, 0.01, 0.02);
/// assert!((c - 0.958544).abs() < 1e-4);
/// // Reversed direction carries no evidence
/// assert_eq!(confidence(52, 50, 0.2, 0.25, 0.02, 0.01), 0.0);
/// ```
pub fn confidence(
    count_x: u64,
    count_y: u64,
    mean_x: f64,
    mean_y: f64,
    variance_x: f64,
    variance_y: f64,
) -> f64 {
    confidence_with(
        &ContinuedFraction::default(),
        count_x,
        count_y,
        mean_x,
        mean_y,
        variance_x,
        variance_y,
    )
}

/// `1 − 2p`, or `0.0` when `p > 0.5`.
///
/// The guard is unreachable for a positive t-score with a correct CDF; it
/// keeps the result non-negative if a substituted primitive misbehaves.
pub(crate) fn confidence_from_p_value(p_value: f64) -> f64 {
    if p_value > 0.5 {
        trace!(p_value, "upper-tail p-value above one half for a positive t-score");
        return 0.0;
    }
    1.0 - 2.0 * p_value
}
