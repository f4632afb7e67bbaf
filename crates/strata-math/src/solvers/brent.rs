//! Brent's method.

use crate::error::{MathError, MathResult};
use crate::solvers::{bracket_collapsed, screen_endpoints, SolverConfig, SolverResult};

/// Root of `f` in `[a, b]` by Brent's method.
///
/// Keeps a bracket `[b, c]` around the root and takes inverse quadratic or
/// secant steps when they stay inside it, falling back to bisection
/// otherwise.
///
/// Requires `f(a)` and `f(b)` of opposite sign (or one of them within
/// tolerance of zero).
///
/// # Errors
///
/// - `MathError::InvalidBracket` when there is no sign change (or a value is NaN)
/// - `MathError::ConvergenceFailed` when the iteration budget is exhausted or
///   the bracket collapses while `|f|` is still above tolerance
///
/// # Example
///
/// ```rust
/// use strata_math::solvers::{brent, SolverConfig};
///
/// // one-year discount factor of 0.97 as a continuously compounded rate
/// let f = |r: f64| (-r).exp() - 0.97;
/// let result = brent(f, -0.5, 1.0, &SolverConfig::default()).unwrap();
/// assert!((result.root + 0.97_f64.ln()).abs() < 1e-9);
/// ```
#[allow(clippy::many_single_char_names)]
pub fn brent<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let (mut a, mut b) = (a, b);
    let (mut fa, mut fb) = (f(a), f(b));
    if let Some(done) = screen_endpoints((a, fa), (b, fb), config)? {
        return Ok(done);
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for iteration in 0..config.max_iterations {
        // keep c on the opposite side of the root from b
        if (fb > 0.0 && fc > 0.0) || (fb < 0.0 && fc < 0.0) {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        if fb.abs() < config.tolerance {
            return Ok(SolverResult {
                root: b,
                iterations: iteration,
                residual: fb,
            });
        }
        if bracket_collapsed(b, c) {
            return Err(MathError::convergence_failed(iteration, fb.abs()));
        }

        let tol = 2.0 * f64::EPSILON * b.abs();
        let xm = 0.5 * (c - b);

        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                (2.0 * xm * s, 1.0 - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let min1 = 3.0 * xm * q - (tol * q).abs();
            let min2 = (e * q).abs();
            if 2.0 * p < min1.min(min2) {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol { d } else { tol.max(f64::MIN_POSITIVE).copysign(xm) };
        fb = f(b);
    }

    Err(MathError::convergence_failed(config.max_iterations, fb.abs()))
}
