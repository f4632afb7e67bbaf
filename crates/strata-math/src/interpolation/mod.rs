//! Interpolation on sorted abscissae.
//!
//! [`find_segment`] is the shared bracketing search used by the curve
//! types; [`LinearInterpolator`] is a self-contained interpolator for
//! one-dimensional tables such as price index projections.

mod linear;

pub use linear::LinearInterpolator;

use crate::error::{MathError, MathResult};

/// A function of one variable known at a finite set of nodes.
pub trait Interpolator: Send + Sync {
    /// Value at `x`.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// First and last node.
    fn domain(&self) -> (f64, f64);

    /// Whether `x` lies between the first and last node inclusive.
    fn covers(&self, x: f64) -> bool {
        let (first, last) = self.domain();
        (first..=last).contains(&x)
    }
}

/// Index `i` of the segment `[xs[i], xs[i + 1]]` used to interpolate at `x`.
///
/// Points left of the range map to the first segment, points right of it to
/// the last. `xs` must be sorted ascending and hold at least two points;
/// with fewer the result is 0.
#[must_use]
pub fn find_segment(xs: &[f64], x: f64) -> usize {
    if xs.len() < 2 {
        return 0;
    }
    let upper = xs.partition_point(|probe| *probe <= x);
    upper.saturating_sub(1).min(xs.len() - 2)
}

/// Rejects abscissae that are not finite or not strictly increasing.
pub fn check_strictly_increasing(xs: &[f64]) -> MathResult<()> {
    if let Some(bad) = xs.iter().find(|x| !x.is_finite()) {
        return Err(MathError::invalid_input(format!("abscissa {bad} is not finite")));
    }
    match xs.windows(2).position(|w| w[0] >= w[1]) {
        Some(i) => Err(MathError::invalid_input(format!(
            "abscissae must increase strictly, found {} then {} at index {}",
            xs[i],
            xs[i + 1],
            i + 1
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_segment() {
        let xs = [0.5, 1.0, 2.0, 5.0];
        assert_eq!(find_segment(&xs, 0.1), 0);
        assert_eq!(find_segment(&xs, 0.5), 0);
        assert_eq!(find_segment(&xs, 1.0), 1);
        assert_eq!(find_segment(&xs, 1.5), 1);
        assert_eq!(find_segment(&xs, 5.0), 2);
        assert_eq!(find_segment(&xs, 9.0), 2);
        assert_eq!(find_segment(&[1.0], 3.0), 0);
    }

    #[test]
    fn test_strictly_increasing() {
        assert!(check_strictly_increasing(&[0.0, 1.0, 2.0]).is_ok());
        assert!(check_strictly_increasing(&[0.0, 1.0, 1.0]).is_err());
        assert!(check_strictly_increasing(&[0.0, f64::NAN]).is_err());
        assert!(check_strictly_increasing(&[]).is_ok());
    }
}
