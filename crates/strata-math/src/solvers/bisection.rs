//! Interval halving.

use crate::error::{MathError, MathResult};
use crate::solvers::{bracket_collapsed, screen_endpoints, SolverConfig, SolverResult};

/// Halves `[a, b]` until the midpoint prices within `config.tolerance`.
///
/// Needs many more evaluations than [`brent`](super::brent) but never
/// leaves the bracket, whatever the shape of `f`.
///
/// # Errors
///
/// - `MathError::InvalidBracket` when there is no sign change
/// - `MathError::ConvergenceFailed` when the budget runs out or the bracket
///   can no longer be split
///
/// # Example
///
/// ```rust
/// use strata_math::solvers::{bisection, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let (mut lo, mut hi) = if a <= b { (a, b) } else { (b, a) };
    let lo_negative = {
        let (f_lo, f_hi) = (f(lo), f(hi));
        if let Some(done) = screen_endpoints((lo, f_lo), (hi, f_hi), config)? {
            return Ok(done);
        }
        f_lo < 0.0
    };

    let mut residual = f64::INFINITY;
    for step in 1..=config.max_iterations {
        if bracket_collapsed(lo, hi) {
            return Err(MathError::convergence_failed(step - 1, residual));
        }
        let mid = 0.5 * (lo + hi);
        let value = f(mid);
        if value.abs() < config.tolerance {
            return Ok(SolverResult { root: mid, iterations: step, residual: value });
        }
        residual = value.abs();
        // keep the half whose ends still differ in sign
        if (value < 0.0) == lo_negative {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Err(MathError::convergence_failed(config.max_iterations, residual))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;
        let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_no_sign_change() {
        let f = |x: f64| x * x + 1.0;
        assert!(matches!(
            bisection(f, -1.0, 1.0, &SolverConfig::default()),
            Err(MathError::InvalidBracket { .. })
        ));
    }

    #[test]
    fn test_step_function_never_converges() {
        let f = |x: f64| if x < 0.25 { -1.0 } else { 1.0 };
        assert!(matches!(
            bisection(f, 0.0, 1.0, &SolverConfig::default()),
            Err(MathError::ConvergenceFailed { .. })
        ));
    }
}
