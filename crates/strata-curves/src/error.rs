//! Failures of curve construction, queries and calibration.

use strata_core::StrataError;
use strata_math::MathError;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type CurveResult<T> = Result<T, CurveError>;

/// Everything that can go wrong building, querying or calibrating a curve.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Curve queried outside its node range with extrapolation disabled.
    #[error("t = {time:.6} is out of domain [{min:.6}, {max:.6}]")]
    OutOfDomain {
        /// The requested time.
        time: f64,
        /// First node time.
        min: f64,
        /// Last node time.
        max: f64,
    },

    /// A calibration pillar could not be solved.
    #[error("calibration failed at pillar {pillar}, quote {quote}: {reason}")]
    CalibrationFailure {
        /// Position of the offending instrument in the calibration set.
        pillar: usize,
        /// Its market quote.
        quote: f64,
        /// What the solver reported.
        reason: String,
    },

    /// Node or pillar times are not strictly increasing.
    #[error("times must increase strictly: t[{index}] = {current:.6} follows {prev:.6}")]
    NonMonotonicTimes {
        /// Index of the first offending time.
        index: usize,
        /// Time before it.
        prev: f64,
        /// The offending time.
        current: f64,
    },

    /// Not enough nodes.
    #[error("{got} points given, at least {required} needed")]
    InsufficientPoints {
        /// Lower bound.
        required: usize,
        /// Points supplied.
        got: usize,
    },

    /// A referenced curve is missing from the bundle.
    #[error("no curve named '{name}' in the bundle")]
    CurveNotFound {
        /// Missing name.
        name: String,
    },

    /// Caller supplied something unusable.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Description of the problem.
        reason: String,
    },

    /// A configuration field failed validation.
    #[error("invalid configuration, {field}: {message}")]
    InvalidConfig {
        /// Offending field.
        field: String,
        /// Description of the problem.
        message: String,
    },

    /// Date, day count or definition failure.
    #[error(transparent)]
    Core(#[from] StrataError),

    /// Solver or interpolation failure.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl CurveError {
    /// [`CurveError::OutOfDomain`].
    #[must_use]
    pub fn out_of_domain(time: f64, min: f64, max: f64) -> Self {
        Self::OutOfDomain { time, min, max }
    }

    /// [`CurveError::CalibrationFailure`].
    #[must_use]
    pub fn calibration_failure(pillar: usize, quote: f64, reason: impl Into<String>) -> Self {
        Self::CalibrationFailure {
            pillar,
            quote,
            reason: reason.into(),
        }
    }

    /// [`CurveError::CurveNotFound`].
    #[must_use]
    pub fn curve_not_found(name: impl Into<String>) -> Self {
        Self::CurveNotFound { name: name.into() }
    }

    /// [`CurveError::InvalidArgument`].
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// [`CurveError::InvalidConfig`].
    #[must_use]
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Pillar index of a calibration failure.
    pub fn failed_pillar(&self) -> Option<usize> {
        match self {
            Self::CalibrationFailure { pillar, .. } => Some(*pillar),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = CurveError::calibration_failure(2, -2.0, "no sign change");
        assert_eq!(
            err.to_string(),
            "calibration failed at pillar 2, quote -2: no sign change"
        );
        assert_eq!(err.failed_pillar(), Some(2));
    }

    #[test]
    fn test_from_math_error() {
        let err: CurveError = MathError::convergence_failed(100, 1e-3).into();
        assert!(matches!(err, CurveError::Math(MathError::ConvergenceFailed { .. })));
        assert_eq!(err.failed_pillar(), None);
    }
}
