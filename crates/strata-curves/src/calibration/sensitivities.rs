//! Present value sensitivities to curve nodes.

use rayon::prelude::*;
use strata_instruments::derivatives::InstrumentDerivative;

use crate::curves::CurveBundle;
use crate::error::{CurveError, CurveResult};
use crate::pricing::present_value;

/// Sensitivity of the present value of `derivative` to each node rate of
/// curve `curve_name`, by central differences with bump `bump`.
///
/// Entry `i` is `(PV(r_i + bump) - PV(r_i - bump)) / (2·bump)`. Nodes are
/// bumped in parallel.
pub fn node_sensitivities(
    derivative: &InstrumentDerivative,
    curves: &CurveBundle,
    curve_name: &str,
    bump: f64,
) -> CurveResult<Vec<f64>> {
    if !(bump.is_finite() && bump > 0.0) {
        return Err(CurveError::invalid_argument(format!("bump must be positive, got {bump}")));
    }
    let curve = curves.curve(curve_name)?;
    (0..curve.len())
        .into_par_iter()
        .map(|i| {
            let rate = curve.rates()[i];
            let up = curves.with_curve(curve.with_node_rate(i, rate + bump)?);
            let down = curves.with_curve(curve.with_node_rate(i, rate - bump)?);
            Ok((present_value(derivative, &up)? - present_value(derivative, &down)?) / (2.0 * bump))
        })
        .collect()
}

/// Sensitivity to a parallel shift of every node of `curve_name`.
pub fn parallel_sensitivity(
    derivative: &InstrumentDerivative,
    curves: &CurveBundle,
    curve_name: &str,
    bump: f64,
) -> CurveResult<f64> {
    if !(bump.is_finite() && bump > 0.0) {
        return Err(CurveError::invalid_argument(format!("bump must be positive, got {bump}")));
    }
    let curve = curves.curve(curve_name)?;
    let up = curves.with_curve(curve.with_parallel_shift(bump)?);
    let down = curves.with_curve(curve.with_parallel_shift(-bump)?);
    Ok((present_value(derivative, &up)? - present_value(derivative, &down)?) / (2.0 * bump))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::InterpolatedCurve;
    use approx::assert_relative_eq;
    use strata_core::types::Currency;
    use strata_instruments::derivatives::CouponFixed;

    #[test]
    fn test_coupon_sensitivity_sits_on_adjacent_nodes() {
        let curves = CurveBundle::new()
            .with_curve(InterpolatedCurve::new("DSC", vec![1.0, 2.0, 3.0], vec![0.02, 0.025, 0.03]).unwrap());
        let coupon: InstrumentDerivative = CouponFixed::new(Currency::USD, 1.5, 1.0, 100.0, 0.05, "DSC")
            .unwrap()
            .into();
        let sensitivities = node_sensitivities(&coupon, &curves, "DSC", 1e-5).unwrap();

        // dPV/dr_i = -t · w_i · PV with linear weights of one half
        let pv = 5.0 * (-0.0225f64 * 1.5).exp();
        assert_relative_eq!(sensitivities[0], -1.5 * 0.5 * pv, max_relative = 1e-6);
        assert_relative_eq!(sensitivities[1], -1.5 * 0.5 * pv, max_relative = 1e-6);
        assert_eq!(sensitivities[2], 0.0);

        let total = parallel_sensitivity(&coupon, &curves, "DSC", 1e-5).unwrap();
        assert_relative_eq!(total, sensitivities.iter().sum::<f64>(), max_relative = 1e-6);
    }

    #[test]
    fn test_bad_bump() {
        let curves = CurveBundle::new().with_curve(InterpolatedCurve::flat("DSC", vec![1.0], 0.02).unwrap());
        let coupon: InstrumentDerivative = CouponFixed::new(Currency::USD, 1.0, 1.0, 1.0, 0.05, "DSC")
            .unwrap()
            .into();
        assert!(node_sensitivities(&coupon, &curves, "DSC", 0.0).is_err());
        assert!(node_sensitivities(&coupon, &curves, "OTHER", 1e-4).is_err());
    }
}
