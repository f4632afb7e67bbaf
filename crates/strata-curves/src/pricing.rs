//! Present values of derivatives against a curve bundle.

use strata_instruments::derivatives::{
    Cash, CouponFixed, CouponIborAverageCompounding, CouponInflationYearOnYearInterpolation, InstrumentDerivative,
    InstrumentDerivativeVisitor,
};

use crate::curves::CurveBundle;
use crate::error::CurveResult;

/// Computes present values by visiting derivatives.
///
/// Discounting uses the curve each derivative names; Ibor forwards come
/// from its forward curve as `(P(s) / P(e) - 1) / δ`, and price index
/// levels from the bundle's price index curve.
///
/// # Example
///
/// ```rust
/// use strata_core::types::Currency;
/// use strata_curves::curves::{CurveBundle, InterpolatedCurve};
/// use strata_curves::pricing::present_value;
/// use strata_instruments::derivatives::Cash;
///
/// let bundle = CurveBundle::new().with_curve(InterpolatedCurve::flat("USD-DSC", vec![1.0], 0.05).unwrap());
/// let cash = Cash::unit(Currency::USD, 1.0, 0.05f64.exp_m1(), "USD-DSC").unwrap();
/// assert!(present_value(&cash.into(), &bundle).unwrap().abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PresentValueCalculator;

impl InstrumentDerivativeVisitor<CurveBundle> for PresentValueCalculator {
    type Output = CurveResult<f64>;

    fn visit_cash(&self, cash: &Cash, curves: &CurveBundle) -> Self::Output {
        let curve = curves.curve(cash.curve_name())?;
        let start = curve.discount_factor(cash.trade_time())?;
        let end = curve.discount_factor(cash.maturity())?;
        Ok(cash.notional() * (end * (1.0 + cash.rate() * cash.year_fraction()) - start))
    }

    fn visit_coupon_fixed(&self, coupon: &CouponFixed, curves: &CurveBundle) -> Self::Output {
        let df = curves.curve(coupon.curve_name())?.discount_factor(coupon.payment_time())?;
        Ok(coupon.amount() * df)
    }

    fn visit_coupon_ibor_average_compounding(
        &self,
        coupon: &CouponIborAverageCompounding,
        curves: &CurveBundle,
    ) -> Self::Output {
        let discounting = curves.curve(coupon.discounting_curve())?;
        let forward = curves.curve(coupon.forward_curve())?;
        let schedule = coupon.schedule();

        let mut factor = coupon.amount_accrued();
        for (k, accrual) in coupon.payment_accrual_factors().iter().enumerate() {
            let mut average = if k == 0 { coupon.rate_fixed() } else { 0.0 };
            let periods = schedule
                .weight
                .period(k)
                .iter()
                .zip(schedule.fixing_period_start_time.period(k))
                .zip(schedule.fixing_period_end_time.period(k))
                .zip(schedule.fixing_period_accrual_factor.period(k));
            for (((weight, start), end), delta) in periods {
                let ratio = forward.discount_factor(*start)? / forward.discount_factor(*end)?;
                average += weight * (ratio - 1.0) / delta;
            }
            factor *= 1.0 + accrual * average;
        }

        let df = discounting.discount_factor(coupon.payment_time())?;
        Ok(coupon.notional() * (factor - 1.0) * df)
    }

    fn visit_coupon_inflation_year_on_year_interpolation(
        &self,
        coupon: &CouponInflationYearOnYearInterpolation,
        curves: &CurveBundle,
    ) -> Self::Output {
        let index = curves.price_index_curve(coupon.price_index_curve())?;
        let index_start = match coupon.index_start_value() {
            Some(value) => value,
            None => {
                let [first, second] = coupon.reference_start_time();
                coupon.interpolated_start(index.price_index(first)?, index.price_index(second)?)
            }
        };
        let [first, second] = coupon.reference_end_time();
        let index_end = coupon.interpolated_end(index.price_index(first)?, index.price_index(second)?);

        let df = curves.curve(coupon.discounting_curve())?.discount_factor(coupon.payment_time())?;
        Ok(coupon.amount(index_start, index_end) * df)
    }
}

/// Present value of `derivative` against `curves`.
pub fn present_value(derivative: &InstrumentDerivative, curves: &CurveBundle) -> CurveResult<f64> {
    derivative.accept(&PresentValueCalculator, curves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::{InterpolatedCurve, PriceIndexCurve};
    use approx::assert_relative_eq;
    use strata_core::types::Currency;
    use strata_instruments::derivatives::CompoundingSchedule;
    use strata_instruments::{IborIndex, PeriodGrid, PriceIndex};

    fn bundle() -> CurveBundle {
        CurveBundle::new()
            .with_curve(InterpolatedCurve::flat("DSC", vec![1.0, 5.0], 0.02).unwrap())
            .with_curve(InterpolatedCurve::flat("FWD", vec![1.0, 5.0], 0.03).unwrap())
            .with_price_index_curve(PriceIndexCurve::new("CPI", vec![0.0, 2.0], vec![100.0, 104.0]).unwrap())
    }

    #[test]
    fn test_fixed_coupon() {
        let coupon = CouponFixed::new(Currency::USD, 2.0, 0.5, 1_000_000.0, 0.04, "DSC").unwrap();
        let pv = present_value(&coupon.into(), &bundle()).unwrap();
        assert_relative_eq!(pv, 20_000.0 * (-0.04f64).exp(), epsilon = 1e-9);
    }

    #[test]
    fn test_cash_with_forward_start() {
        let cash = Cash::new(Currency::USD, 0.5, 1.5, 100.0, 0.01, 1.0, "DSC").unwrap();
        let pv = present_value(&cash.into(), &bundle()).unwrap();
        let expected = 100.0 * ((-0.03f64).exp() * 1.01 - (-0.01f64).exp());
        assert_relative_eq!(pv, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_averaging_coupon_projects_forwards() {
        let grid = |v: Vec<f64>| PeriodGrid::new(v, vec![]).unwrap();
        let schedule = CompoundingSchedule {
            fixing_time: grid(vec![0.5, 0.75]),
            weight: grid(vec![0.5, 0.5]),
            fixing_period_start_time: grid(vec![0.5, 0.75]),
            fixing_period_end_time: grid(vec![0.75, 1.0]),
            fixing_period_accrual_factor: grid(vec![0.25, 0.25]),
        };
        let coupon = CouponIborAverageCompounding::new(
            Currency::EUR,
            1.0,
            0.5,
            1.0,
            vec![0.5],
            IborIndex::new("EURIBOR3M", Currency::EUR, 3, 2),
            schedule,
            1.0,
            0.0,
            "DSC",
            "FWD",
        )
        .unwrap();
        let pv = present_value(&coupon.into(), &bundle()).unwrap();
        let forward = (0.0075f64.exp() - 1.0) / 0.25;
        assert_relative_eq!(pv, 0.5 * forward * (-0.02f64).exp(), epsilon = 1e-14);
    }

    #[test]
    fn test_year_on_year_coupon() {
        let coupon = CouponInflationYearOnYearInterpolation::new(
            Currency::USD,
            2.0,
            1.0,
            1.0,
            PriceIndex::new("CPI", Currency::USD),
            [0.5, 0.6],
            [1.5, 1.6],
            1.0,
            0.0,
            false,
            "DSC",
            "CPI",
        )
        .unwrap();
        let pv = present_value(&coupon.into(), &bundle()).unwrap();
        // start level 101 from the first month, end level 103.2 from the second
        assert_relative_eq!(pv, (103.2 / 101.0 - 1.0) * (-0.04f64).exp(), epsilon = 1e-14);
    }

    #[test]
    fn test_missing_curve_propagates() {
        let coupon = CouponFixed::new(Currency::USD, 2.0, 0.5, 1.0, 0.04, "OTHER").unwrap();
        assert!(present_value(&coupon.into(), &bundle()).is_err());
    }
}
