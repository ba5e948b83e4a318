//! # welch-ttest
//!
//! Welch's unequal-variances t-test computed from summary statistics.
//!
//! Given the count, mean and variance of two independent samples, this crate
//! produces the Welch–Satterthwaite degrees of freedom, Welch's t-statistic,
//! Student's t tail probabilities, and a single confidence score in `[0, 1)`
//! that the true mean of X exceeds the true mean of Y.
//!
//! ## Modules
//!
//! - [`special`] — Regularized incomplete beta function and the
//!   [`IncompleteBeta`] injection point
//! - [`distribution`] — Student's t-distribution CDF with tail selection
//! - [`welch`] — Degrees of freedom, t-score and confidence
//! - [`engine`] — [`SampleSummary`] and the configurable [`WelchTest`]
//! - [`error`] — [`WelchError`] for the checked `try_*` API
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: no global state, safe to call from any thread
//! - **Sentinel or checked**: every operation returns `0.0` for undefined
//!   inputs, and has a `try_*` twin that says why
//! - **Replaceable numerics**: the incomplete beta primitive is a trait
//!
//! ## Example
//!
//! ```
//! use welch_ttest::{confidence, degrees_of_freedom, t_score};
//!
//! let dgf = degrees_of_freedom(50, 52, 0.01, 0.02);
//! let t = t_score(50, 52, 0.25, 0.20, 0.01, 0.02);
//! assert!(dgf > 49.0 && t > 2.0);
//!
//! let c = confidence(50, 52, 0.25, 0.20, 0.01, 0.02);
//! assert!((c - 0.958544).abs() < 1e-4);
//! ```

pub mod distribution;
pub mod engine;
pub mod error;
pub mod special;
pub mod welch;

pub use distribution::{students_t_cdf, try_students_t_cdf, Tail};
pub use engine::{SampleSummary, WelchReport, WelchTest};
pub use error::WelchError;
pub use special::{ContinuedFraction, IncompleteBeta};
pub use welch::{
    confidence, degrees_of_freedom, t_score, try_confidence, try_degrees_of_freedom, try_t_score,
};
