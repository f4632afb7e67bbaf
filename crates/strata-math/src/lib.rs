//! # Strata Math
//!
//! Numerical building blocks for the Strata analytics library.
//!
//! - **Solvers**: bracketing root finders that converge on the function value
//! - **Interpolation**: segment search and linear interpolation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]

pub mod error;
pub mod interpolation;
pub mod solvers;

/// Everything most callers need, in one import.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{find_segment, Interpolator, LinearInterpolator};
    pub use crate::solvers::{bisection, brent, BracketingSolver, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
