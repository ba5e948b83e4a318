//! Error type for the checked (`try_*`) operations.

use thiserror::Error;

/// Reasons a Welch statistic is undefined for the given inputs.
///
/// The sentinel-returning functions map every one of these to `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum WelchError {
    /// At least one sample has fewer observations than the statistic needs.
    #[error("insufficient samples: got {count_x} and {count_y}, need at least {required} in each")]
    InsufficientSamples {
        count_x: u64,
        count_y: u64,
        required: u64,
    },

    /// The Welch–Satterthwaite denominator is zero (both variances are zero).
    #[error("degrees of freedom undefined: variance terms sum to zero")]
    DegenerateVariance,

    /// The standard error of the mean difference is zero.
    #[error("t-score undefined: standard error is zero")]
    ZeroStandardError,

    /// Student's t-distribution needs at least one degree of freedom.
    #[error("invalid degrees of freedom: {0} (must be >= 1)")]
    InvalidDegreesOfFreedom(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = WelchError::InsufficientSamples {
            count_x: 1,
            count_y: 12,
            required: 2,
        };
        assert_eq!(
            e.to_string(),
            "insufficient samples: got 1 and 12, need at least 2 in each"
        );
        assert_eq!(
            WelchError::InvalidDegreesOfFreedom(0.5).to_string(),
            "invalid degrees of freedom: 0.5 (must be >= 1)"
        );
    }

    #[test]
    fn test_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
        assert_error(&WelchError::DegenerateVariance);
    }
}
