//! Bracketing root finders.
//!
//! - [`brent`]: inverse quadratic / secant steps safeguarded by bisection
//! - [`bisection`]: plain interval halving
//!
//! Both converge on the **function value**: a root is accepted once
//! `|f(x)| < tolerance`. A bracket that shrinks to machine precision
//! without reaching the tolerance is a convergence failure, as is running
//! out of iterations. Callers that solve for a curve node use this to
//! guarantee a price tolerance rather than a rate tolerance.
//!
//! # Example
//!
//! ```rust
//! use strata_math::solvers::{BracketingSolver, SolverConfig};
//!
//! let f = |x: f64| x * x - 2.0;
//! let result = BracketingSolver::Brent
//!     .solve(f, 1.0, 2.0, &SolverConfig::default())
//!     .unwrap();
//! assert!(f(result.root).abs() < 1e-10);
//! ```

mod bisection;
mod brent;

pub use bisection::bisection;
pub use brent::brent;

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// `|f(x)|` accepted as a root unless configured otherwise.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Step budget unless configured otherwise.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Stopping rules shared by the bracketing solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// A point with `|f(x)|` below this is a root.
    pub tolerance: f64,
    /// Evaluations allowed after the two endpoints.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE, DEFAULT_MAX_ITERATIONS)
    }
}

impl SolverConfig {
    /// Explicit tolerance and step budget.
    #[must_use]
    pub const fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self { tolerance, max_iterations }
    }

    /// Replaces the tolerance.
    #[must_use]
    pub fn with_tolerance(self, tolerance: f64) -> Self {
        Self { tolerance, ..self }
    }

    /// Replaces the step budget.
    #[must_use]
    pub fn with_max_iterations(self, max_iterations: u32) -> Self {
        Self { max_iterations, ..self }
    }
}

/// Result of a successful root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of function evaluations after the two bracket endpoints.
    pub iterations: u32,
    /// Function value at the root.
    pub residual: f64,
}

/// Runtime selection of a bracketing solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketingSolver {
    /// Brent's method.
    #[default]
    Brent,
    /// Bisection.
    Bisection,
}

impl BracketingSolver {
    /// Finds a root of `f` in `[a, b]`.
    pub fn solve<F>(self, f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
    {
        match self {
            BracketingSolver::Brent => brent(f, a, b, config),
            BracketingSolver::Bisection => bisection(f, a, b, config),
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            BracketingSolver::Brent => "Brent",
            BracketingSolver::Bisection => "Bisection",
        }
    }
}

/// Shared opening move of the bracketing solvers. An endpoint already within
/// tolerance is the answer; otherwise the endpoints must straddle zero.
pub(crate) fn screen_endpoints(
    (a, fa): (f64, f64),
    (b, fb): (f64, f64),
    config: &SolverConfig,
) -> MathResult<Option<SolverResult>> {
    for (root, residual) in [(a, fa), (b, fb)] {
        if residual.abs() < config.tolerance {
            return Ok(Some(SolverResult { root, iterations: 0, residual }));
        }
    }
    let straddles = (fa < 0.0 && fb > 0.0) || (fa > 0.0 && fb < 0.0);
    if straddles {
        Ok(None)
    } else {
        Err(MathError::InvalidBracket { a, b, fa, fb })
    }
}

/// True when `[lo, hi]` cannot be split any further in double precision.
#[inline]
pub(crate) fn bracket_collapsed(lo: f64, hi: f64) -> bool {
    let mid = 0.5 * (lo + hi);
    mid <= lo.min(hi) || mid >= lo.max(hi)
}
