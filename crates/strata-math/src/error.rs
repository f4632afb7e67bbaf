//! Numerical failures.

use thiserror::Error;

/// Result alias for the routines in this crate.
pub type MathResult<T> = Result<T, MathError>;

/// Why a solver or interpolator gave up.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// `|f(x)|` never dropped below the tolerance.
    #[error("no root within tolerance after {iterations} steps, last |f| = {residual:.2e}")]
    ConvergenceFailed {
        /// Steps taken.
        iterations: u32,
        /// Smallest `|f|` seen on the last step.
        residual: f64,
    },

    /// `f(a)` and `f(b)` share a sign or one of them is NaN.
    #[error("[{a}, {b}] does not bracket a root: f(a) = {fa:.2e}, f(b) = {fb:.2e}")]
    InvalidBracket {
        /// Left end.
        a: f64,
        /// Right end.
        b: f64,
        /// `f(a)`.
        fa: f64,
        /// `f(b)`.
        fb: f64,
    },

    /// Query outside the node range of an interpolator that refuses to extrapolate.
    #[error("{x} lies outside the node range [{min}, {max}]")]
    ExtrapolationNotAllowed {
        /// Query.
        x: f64,
        /// First node.
        min: f64,
        /// Last node.
        max: f64,
    },

    /// Too few points.
    #[error("{actual} points given, {required} needed")]
    InsufficientData {
        /// Lower bound.
        required: usize,
        /// Points supplied.
        actual: usize,
    },

    /// Malformed input.
    #[error("bad input: {reason}")]
    InvalidInput {
        /// What is wrong.
        reason: String,
    },
}

impl MathError {
    /// [`MathError::ConvergenceFailed`].
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed { iterations, residual }
    }

    /// [`MathError::InvalidInput`].
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput { reason: reason.into() }
    }

    /// [`MathError::InsufficientData`].
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_the_numbers() {
        assert_eq!(
            MathError::convergence_failed(100, 1e-6).to_string(),
            "no root within tolerance after 100 steps, last |f| = 1.00e-6"
        );
        assert_eq!(MathError::insufficient_data(2, 1).to_string(), "1 points given, 2 needed");
        let bracket = MathError::InvalidBracket { a: -1.0, b: 1.0, fa: 2.0, fb: 3.0 };
        assert!(bracket.to_string().starts_with("[-1, 1] does not bracket"));
    }
}
