//! Projected price index levels.

use strata_math::interpolation::{Interpolator, LinearInterpolator};

use crate::error::{CurveError, CurveResult};

/// Price index levels at reference times, interpolated linearly and held
/// flat beyond the first and last reference times.
///
/// Reference times may be negative: index months published before the
/// valuation date sit at negative times.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceIndexCurve {
    name: String,
    levels: LinearInterpolator,
}

impl PriceIndexCurve {
    /// Creates a price index curve.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a non-positive level; `Math` for unsorted
    /// times, mismatched lengths or an empty curve.
    pub fn new(name: impl Into<String>, times: Vec<f64>, levels: Vec<f64>) -> CurveResult<Self> {
        if let Some(level) = levels.iter().find(|l| !(l.is_finite() && **l > 0.0)) {
            return Err(CurveError::invalid_argument(format!(
                "price index levels must be positive, got {level}"
            )));
        }
        Ok(Self {
            name: name.into(),
            levels: LinearInterpolator::new(times, levels)?.with_extrapolation(),
        })
    }

    /// Curve name, matching the price index name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reference times.
    pub fn times(&self) -> &[f64] {
        self.levels.xs()
    }

    /// Index levels.
    pub fn levels(&self) -> &[f64] {
        self.levels.ys()
    }

    /// Projected index level at reference time `t`.
    pub fn price_index(&self, t: f64) -> CurveResult<f64> {
        Ok(self.levels.interpolate(t)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_interpolation_and_flat_ends() {
        let curve = PriceIndexCurve::new("USCPI", vec![-0.5, 0.5, 1.5], vec![300.0, 306.0, 312.0]).unwrap();
        assert_relative_eq!(curve.price_index(0.0).unwrap(), 303.0);
        assert_eq!(curve.price_index(-3.0).unwrap(), 300.0);
        assert_eq!(curve.price_index(10.0).unwrap(), 312.0);
    }

    #[test]
    fn test_levels_must_be_positive() {
        assert!(PriceIndexCurve::new("USCPI", vec![0.0, 1.0], vec![300.0, 0.0]).is_err());
        assert!(matches!(
            PriceIndexCurve::new("USCPI", vec![1.0, 0.0], vec![300.0, 301.0]),
            Err(CurveError::Math(_))
        ));
    }
}
