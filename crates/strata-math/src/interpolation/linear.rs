//! Piecewise linear interpolation.

use crate::error::{MathError, MathResult};
use crate::interpolation::{check_strictly_increasing, find_segment, Interpolator};

/// Straight lines between consecutive nodes.
///
/// Queries outside the nodes are refused unless [`with_extrapolation`]
/// is set, in which case the end values are held flat. One node makes a
/// constant function.
///
/// [`with_extrapolation`]: LinearInterpolator::with_extrapolation
///
/// # Example
///
/// ```rust
/// use strata_math::interpolation::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 4.0]).unwrap();
/// assert_eq!(interp.interpolate(1.5).unwrap(), 2.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    flat_ends: bool,
}

impl LinearInterpolator {
    /// Builds the interpolator through `(xs[i], ys[i])`.
    ///
    /// # Errors
    ///
    /// `InsufficientData` without nodes, `InvalidInput` for mismatched
    /// lengths or abscissae that do not increase strictly.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        if xs.is_empty() {
            return Err(MathError::insufficient_data(1, 0));
        }
        if ys.len() != xs.len() {
            return Err(MathError::invalid_input(format!(
                "{} abscissae but {} ordinates",
                xs.len(),
                ys.len()
            )));
        }
        check_strictly_increasing(&xs)?;
        Ok(Self { xs, ys, flat_ends: false })
    }

    /// Holds the end values flat outside the nodes.
    #[must_use]
    pub fn with_extrapolation(self) -> Self {
        Self { flat_ends: true, ..self }
    }

    /// Whether queries outside the nodes are answered.
    pub fn extrapolates(&self) -> bool {
        self.flat_ends
    }

    /// Abscissae.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Ordinates.
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        let (first, last) = self.domain();
        if !self.covers(x) {
            if !self.flat_ends {
                return Err(MathError::ExtrapolationNotAllowed { x, min: first, max: last });
            }
            let end = if x < first { 0 } else { self.ys.len() - 1 };
            return Ok(self.ys[end]);
        }
        if self.xs.len() == 1 {
            return Ok(self.ys[0]);
        }

        let i = find_segment(&self.xs, x);
        let weight = (x - self.xs[i]) / (self.xs[i + 1] - self.xs[i]);
        Ok(self.ys[i] + weight * (self.ys[i + 1] - self.ys[i]))
    }

    fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_values_between_nodes() {
        let interp = LinearInterpolator::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 2.0, 4.0, 6.0]).unwrap();
        assert_relative_eq!(interp.interpolate(0.5).unwrap(), 1.0, epsilon = 1e-15);
        assert_relative_eq!(interp.interpolate(2.5).unwrap(), 5.0, epsilon = 1e-15);
        assert_eq!(interp.interpolate(3.0).unwrap(), 6.0);
        assert_eq!(interp.domain(), (0.0, 3.0));
    }

    #[test]
    fn test_outside_nodes_is_refused() {
        let interp = LinearInterpolator::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
        assert!(matches!(
            interp.interpolate(1.5),
            Err(MathError::ExtrapolationNotAllowed { .. })
        ));
    }

    #[test]
    fn test_flat_ends() {
        let interp = LinearInterpolator::new(vec![1.0, 2.0], vec![10.0, 20.0])
            .unwrap()
            .with_extrapolation();
        assert!(interp.extrapolates());
        assert_eq!(interp.interpolate(0.0).unwrap(), 10.0);
        assert_eq!(interp.interpolate(7.0).unwrap(), 20.0);
    }

    #[test]
    fn test_single_node_is_constant() {
        let interp = LinearInterpolator::new(vec![1.0], vec![3.0]).unwrap().with_extrapolation();
        assert_eq!(interp.interpolate(0.2).unwrap(), 3.0);
        assert_eq!(interp.interpolate(1.0).unwrap(), 3.0);
    }

    #[test]
    fn test_bad_nodes() {
        assert!(LinearInterpolator::new(vec![0.0, 2.0, 1.0], vec![0.0, 1.0, 2.0]).is_err());
        assert!(LinearInterpolator::new(vec![0.0, 1.0], vec![0.0]).is_err());
        assert!(LinearInterpolator::new(vec![], vec![]).is_err());
    }
}
