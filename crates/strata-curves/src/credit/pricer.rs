//! ISDA standard model CDS valuation.
//!
//! Both legs are integrated exactly between knots, the union of the
//! discount and hazard curve node times: with `LinearRateTime` curves the
//! forward and hazard rates are constant there, so each interval has a
//! closed form. Near-zero total rates fall back to Taylor expansions.

use crate::credit::cds::{CdsAnalytic, PriceType};
use crate::curves::InterpolatedCurve;
use crate::error::{CurveError, CurveResult};

/// Below this `|Δ(h·t + r·t)|` the interval formulas switch to series.
const SMALL: f64 = 1e-5;

/// `(e^x - 1) / x`.
fn epsilon(x: f64) -> f64 {
    if x.abs() < SMALL {
        1.0 + x / 2.0 + x * x / 6.0 + x * x * x / 24.0
    } else {
        x.exp_m1() / x
    }
}

/// `(x·e^x - e^x + 1) / x²`.
fn epsilon_p(x: f64) -> f64 {
    if x.abs() < SMALL {
        0.5 + x / 3.0 + x * x / 8.0 + x * x * x / 30.0
    } else {
        (x * x.exp() - x.exp_m1()) / (x * x)
    }
}

/// Prices CDSs under the ISDA standard model.
///
/// `discount` holds continuously compounded zero rates and `credit`
/// hazard rates, both as [`InterpolatedCurve`]s over the same time axis
/// as the CDS.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsdaCdsPricer;

impl IsdaCdsPricer {
    /// Value of the protection leg per unit notional.
    pub fn protection_leg(
        &self,
        cds: &CdsAnalytic,
        discount: &InterpolatedCurve,
        credit: &InterpolatedCurve,
    ) -> CurveResult<f64> {
        let knots = knots(cds.protection_start(), cds.protection_end(), discount, credit);
        let mut total = 0.0;
        let mut left = NodeState::at(knots[0], discount, credit)?;
        for t in &knots[1..] {
            let right = NodeState::at(*t, discount, credit)?;
            let dht = right.ht - left.ht;
            let dhrt = dht + right.rt - left.rt;
            let b0 = left.risky_df();
            total += if dhrt.abs() < SMALL {
                dht * b0 * epsilon(-dhrt)
            } else {
                dht / dhrt * (b0 - right.risky_df())
            };
            left = right;
        }
        Ok(cds.lgd() * total / discount.discount_factor(cds.valuation_time())?)
    }

    /// Value of the premium leg per unit spread.
    pub fn annuity(
        &self,
        cds: &CdsAnalytic,
        discount: &InterpolatedCurve,
        credit: &InterpolatedCurve,
        price_type: PriceType,
    ) -> CurveResult<f64> {
        let mut total = 0.0;
        for coupon in cds.coupons() {
            let df = discount.discount_factor(coupon.payment_time)?;
            let q = credit.survival_probability(coupon.effective_end)?;
            total += coupon.year_fraction * df * q;

            if cds.pays_accrued_on_default() {
                let start = coupon.effective_start.max(cds.protection_start());
                if start < coupon.effective_end {
                    let scale = coupon.year_fraction / (coupon.effective_end - coupon.effective_start);
                    total += scale
                        * accrual_on_default(coupon.effective_start, start, coupon.effective_end, discount, credit)?;
                }
            }
        }
        let dirty = total / discount.discount_factor(cds.valuation_time())?;
        Ok(match price_type {
            PriceType::Dirty => dirty,
            PriceType::Clean => dirty - cds.accrued_year_fraction(),
        })
    }

    /// Spread at which the clean value of the CDS is zero.
    pub fn par_spread(&self, cds: &CdsAnalytic, discount: &InterpolatedCurve, credit: &InterpolatedCurve) -> CurveResult<f64> {
        let annuity = self.annuity(cds, discount, credit, PriceType::Clean)?;
        if annuity <= 0.0 {
            return Err(CurveError::invalid_argument(format!(
                "premium leg annuity must be positive, got {annuity}"
            )));
        }
        Ok(self.protection_leg(cds, discount, credit)? / annuity)
    }

    /// Clean value to the protection buyer paying `spread`.
    pub fn pv(
        &self,
        cds: &CdsAnalytic,
        spread: f64,
        discount: &InterpolatedCurve,
        credit: &InterpolatedCurve,
    ) -> CurveResult<f64> {
        let protection = self.protection_leg(cds, discount, credit)?;
        let annuity = self.annuity(cds, discount, credit, PriceType::Clean)?;
        Ok(protection - spread * annuity)
    }
}

/// `∫ (t - accrual_start) P(t) dF(t)` over `[from, to]`, F the default distribution.
fn accrual_on_default(
    accrual_start: f64,
    from: f64,
    to: f64,
    discount: &InterpolatedCurve,
    credit: &InterpolatedCurve,
) -> CurveResult<f64> {
    let knots = knots(from, to, discount, credit);
    let mut total = 0.0;
    let mut left = NodeState::at(knots[0], discount, credit)?;
    for t in &knots[1..] {
        let right = NodeState::at(*t, discount, credit)?;
        let dt = right.t - left.t;
        let dht = right.ht - left.ht;
        let dhrt = dht + right.rt - left.rt;
        let (b0, b1) = (left.risky_df(), right.risky_df());
        let elapsed = left.t - accrual_start;
        total += if dhrt.abs() < SMALL {
            dht * b0 * (elapsed * epsilon(-dhrt) + dt * epsilon_p(-dhrt))
        } else {
            dht / dhrt * (elapsed * (b0 - b1) + dt * ((b0 - b1) / dhrt - b1))
        };
        left = right;
    }
    Ok(total)
}

/// Time with the integrated rate and hazard to it.
struct NodeState {
    t: f64,
    rt: f64,
    ht: f64,
}

impl NodeState {
    fn at(t: f64, discount: &InterpolatedCurve, credit: &InterpolatedCurve) -> CurveResult<Self> {
        let (rt, ht) = if t == 0.0 {
            (0.0, 0.0)
        } else {
            (discount.zero_rate(t)? * t, credit.zero_rate(t)? * t)
        };
        Ok(Self { t, rt, ht })
    }

    fn risky_df(&self) -> f64 {
        (-(self.rt + self.ht)).exp()
    }
}

/// `start`, `end` and every node time of either curve strictly between them.
fn knots(start: f64, end: f64, discount: &InterpolatedCurve, credit: &InterpolatedCurve) -> Vec<f64> {
    let mut knots: Vec<f64> = discount
        .times()
        .iter()
        .chain(credit.times())
        .copied()
        .filter(|t| *t > start && *t < end)
        .collect();
    knots.push(start);
    knots.push(end);
    knots.sort_by(f64::total_cmp);
    knots.dedup();
    knots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credit::cds::CdsCoupon;
    use crate::curves::CurveInterpolation;
    use approx::assert_relative_eq;

    fn flat(rate: f64) -> InterpolatedCurve {
        InterpolatedCurve::flat("FLAT", vec![1.0, 5.0], rate)
            .unwrap()
            .with_interpolation(CurveInterpolation::LinearRateTime)
    }

    fn cds(pay_accrued: bool) -> CdsAnalytic {
        let coupons = (0..20)
            .map(|i| {
                let start = f64::from(i) * 0.25;
                CdsCoupon::new(start, start + 0.25, start + 0.25, 0.25).unwrap()
            })
            .collect();
        CdsAnalytic::new(0.0, 5.0, 0.0, coupons, 0.4, 0.0, pay_accrued).unwrap()
    }

    #[test]
    fn test_series_match_closed_forms() {
        for x in [5e-6_f64, -8e-6, 0.1] {
            assert_relative_eq!(epsilon(x), x.exp_m1() / x, epsilon = 1e-12);
        }
        let x: f64 = 9e-6;
        assert_relative_eq!(epsilon_p(x), (x * x.exp() - x.exp_m1()) / (x * x), epsilon = 1e-8);
        assert_relative_eq!(epsilon_p(x), 0.5 + 3e-6, epsilon = 1e-10);
    }

    #[test]
    fn test_protection_leg_flat_curves() {
        let (r, h) = (0.03, 0.02);
        let leg = IsdaCdsPricer.protection_leg(&cds(true), &flat(r), &flat(h)).unwrap();
        let expected = 0.6 * h / (r + h) * (1.0 - (-(r + h) * 5.0f64).exp());
        assert_relative_eq!(leg, expected, epsilon = 1e-14);
    }

    #[test]
    fn test_zero_hazard_is_worthless_protection() {
        let leg = IsdaCdsPricer.protection_leg(&cds(true), &flat(0.03), &flat(0.0)).unwrap();
        assert_eq!(leg, 0.0);
    }

    #[test]
    fn test_credit_triangle() {
        // with continuous premiums the par spread is h·(1 - R)
        let h = 0.02;
        let spread = IsdaCdsPricer.par_spread(&cds(true), &flat(0.03), &flat(h)).unwrap();
        assert_relative_eq!(spread, h * 0.6, max_relative = 1e-2);
    }

    #[test]
    fn test_accrual_on_default_raises_annuity() {
        let (discount, credit) = (flat(0.03), flat(0.02));
        let with = IsdaCdsPricer.annuity(&cds(true), &discount, &credit, PriceType::Dirty).unwrap();
        let without = IsdaCdsPricer.annuity(&cds(false), &discount, &credit, PriceType::Dirty).unwrap();
        assert!(with > without);
        // half a period of premium paid on the discounted default probability
        let expected = 0.125 * 0.02 / 0.05 * (1.0 - (-0.25f64).exp());
        assert_relative_eq!(with - without, expected, max_relative = 1e-3);
    }

    #[test]
    fn test_pv_at_par_is_zero() {
        let (discount, credit) = (flat(0.03), flat(0.02));
        let spread = IsdaCdsPricer.par_spread(&cds(true), &discount, &credit).unwrap();
        assert!(IsdaCdsPricer.pv(&cds(true), spread, &discount, &credit).unwrap().abs() < 1e-15);
    }
}
