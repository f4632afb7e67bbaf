//! Year-on-year inflation coupon definition.

use std::hash::{Hash, Hasher};

use strata_core::time::TimeCalculator;
use strata_core::types::{Date, FixingSeries};
use strata_core::{StrataError, StrataResult};

use super::{CouponTerms, InstrumentDefinition, InstrumentDefinitionWithData};
use crate::checks;
use crate::derivatives::{CouponFixed, CouponInflationYearOnYearInterpolation, InstrumentDerivative};
use crate::grid::HashValue;
use crate::index::PriceIndex;

/// A coupon paying the change of a price index between the (lagged)
/// accrual start and payment months, each level interpolated linearly
/// between two consecutive monthly publications.
///
/// Index fixings are keyed by the first day of their reference month.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponInflationYearOnYearInterpolationDefinition {
    terms: CouponTerms,
    price_index: PriceIndex,
    month_lag: u32,
    reference_start_dates: [Date; 2],
    reference_end_dates: [Date; 2],
    weight_start: f64,
    weight_end: f64,
    pay_notional: bool,
}

impl CouponInflationYearOnYearInterpolationDefinition {
    /// Creates the definition from explicit reference dates and weights.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for a currency mismatch or a weight outside `[0, 1]`
    /// - `InvalidDateOrder` when a pair of reference dates is not increasing
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        terms: CouponTerms,
        price_index: PriceIndex,
        month_lag: u32,
        reference_start_dates: [Date; 2],
        reference_end_dates: [Date; 2],
        weight_start: f64,
        weight_end: f64,
        pay_notional: bool,
    ) -> StrataResult<Self> {
        checks::same_currency("price index", terms.currency(), price_index.currency)?;
        for (what, [first, second]) in [("start", reference_start_dates), ("end", reference_end_dates)] {
            if first >= second {
                return Err(StrataError::invalid_date_order(format!(
                    "{what} reference dates {first} and {second} are not increasing"
                )));
            }
        }
        for (what, weight) in [("weight start", weight_start), ("weight end", weight_end)] {
            if !(0.0..=1.0).contains(&checks::finite(what, weight)?) {
                return Err(StrataError::invalid_argument(format!("{what} must lie in [0, 1], got {weight}")));
            }
        }
        Ok(Self {
            terms,
            price_index,
            month_lag,
            reference_start_dates,
            reference_end_dates,
            weight_start,
            weight_end,
            pay_notional,
        })
    }

    /// Creates the definition with reference months `month_lag` months
    /// before the accrual start and the payment date, weighted by the
    /// position of those dates within their month.
    pub fn from_dates(
        terms: CouponTerms,
        price_index: PriceIndex,
        month_lag: u32,
        pay_notional: bool,
    ) -> StrataResult<Self> {
        let reference_start_dates = reference_months(terms.accrual_start_date(), month_lag)?;
        let reference_end_dates = reference_months(terms.payment_date(), month_lag)?;
        let weight_start = month_weight(terms.accrual_start_date());
        let weight_end = month_weight(terms.payment_date());
        Self::new(
            terms,
            price_index,
            month_lag,
            reference_start_dates,
            reference_end_dates,
            weight_start,
            weight_end,
            pay_notional,
        )
    }

    /// Coupon terms.
    pub fn terms(&self) -> &CouponTerms {
        &self.terms
    }

    /// The price index.
    pub fn price_index(&self) -> &PriceIndex {
        &self.price_index
    }

    /// Publication lag in months.
    pub fn month_lag(&self) -> u32 {
        self.month_lag
    }

    /// Reference months of the start index.
    pub fn reference_start_dates(&self) -> [Date; 2] {
        self.reference_start_dates
    }

    /// Reference months of the end index.
    pub fn reference_end_dates(&self) -> [Date; 2] {
        self.reference_end_dates
    }

    /// Weight of the first start reference month.
    pub fn weight_start(&self) -> f64 {
        self.weight_start
    }

    /// Weight of the first end reference month.
    pub fn weight_end(&self) -> f64 {
        self.weight_end
    }

    /// Whether the notional is paid with the coupon.
    pub fn pay_notional(&self) -> bool {
        self.pay_notional
    }

    /// Same coupon with another notional.
    pub fn with_notional(&self, notional: f64) -> StrataResult<Self> {
        Ok(Self {
            terms: self.terms.with_notional(notional)?,
            ..self.clone()
        })
    }

    fn projected(&self, valuation: Date, curve_names: &[&str]) -> StrataResult<CouponInflationYearOnYearInterpolation> {
        let discounting = checks::discounting_curve(curve_names)?;
        let price_index_curve = checks::forward_curve(curve_names)?;
        self.terms.check_not_paid(valuation)?;

        let times = TimeCalculator::default();
        let to_times = |dates: [Date; 2]| dates.map(|d| times.time_between(valuation, d));
        CouponInflationYearOnYearInterpolation::new(
            self.terms.currency(),
            self.terms.payment_time(valuation),
            self.terms.payment_accrual_factor(),
            self.terms.notional(),
            self.price_index.clone(),
            to_times(self.reference_start_dates),
            to_times(self.reference_end_dates),
            self.weight_start,
            self.weight_end,
            self.pay_notional,
            &discounting,
            &price_index_curve,
        )
    }

    /// Interpolated index level from the series.
    ///
    /// Both reference months must be published when `required`; otherwise
    /// a missing month means the level is still to be projected.
    fn observed_level(
        &self,
        fixings: &FixingSeries,
        dates: [Date; 2],
        weight: f64,
        required: bool,
    ) -> StrataResult<Option<f64>> {
        let mut levels = [0.0; 2];
        for (level, date) in levels.iter_mut().zip(dates) {
            match fixings.value_at(date) {
                Some(value) => *level = value,
                None if required => return Err(StrataError::missing_fixing(self.price_index.name.clone(), date)),
                None => return Ok(None),
            }
        }
        Ok(Some(weight * levels[0] + (1.0 - weight) * levels[1]))
    }
}

fn reference_months(date: Date, month_lag: u32) -> StrataResult<[Date; 2]> {
    let first = date.add_months(-(month_lag as i32))?.start_of_month();
    Ok([first, first.add_months(1)?])
}

fn month_weight(date: Date) -> f64 {
    1.0 - f64::from(date.day() - 1) / f64::from(date.days_in_month())
}

impl InstrumentDefinition for CouponInflationYearOnYearInterpolationDefinition {
    fn to_derivative(&self, valuation: Date, curve_names: &[&str]) -> StrataResult<InstrumentDerivative> {
        self.projected(valuation, curve_names)
            .map(InstrumentDerivative::CouponInflationYearOnYearInterpolation)
    }
}

impl InstrumentDefinitionWithData for CouponInflationYearOnYearInterpolationDefinition {
    fn to_derivative_with_fixings(
        &self,
        valuation: Date,
        fixings: &FixingSeries,
        curve_names: &[&str],
    ) -> StrataResult<InstrumentDerivative> {
        let coupon = self.projected(valuation, curve_names)?;
        let start_date = self.terms.accrual_start_date();
        let end_date = self.terms.accrual_end_date();

        let index_start = if valuation >= start_date {
            self.observed_level(
                fixings,
                self.reference_start_dates,
                self.weight_start,
                valuation > start_date,
            )?
        } else {
            None
        };
        let Some(index_start) = index_start else {
            return Ok(InstrumentDerivative::CouponInflationYearOnYearInterpolation(coupon));
        };

        let index_end = if valuation >= end_date {
            self.observed_level(fixings, self.reference_end_dates, self.weight_end, valuation > end_date)?
        } else {
            None
        };
        match index_end {
            Some(index_end) => {
                let ratio = index_end / index_start;
                let rate = if self.pay_notional { ratio } else { ratio - 1.0 };
                CouponFixed::new(
                    coupon.currency(),
                    coupon.payment_time(),
                    coupon.payment_year_fraction(),
                    coupon.notional(),
                    rate,
                    coupon.discounting_curve(),
                )
                .map(InstrumentDerivative::CouponFixed)
            }
            None => coupon
                .with_index_start_value(index_start)
                .map(InstrumentDerivative::CouponInflationYearOnYearInterpolation),
        }
    }
}

impl Eq for CouponInflationYearOnYearInterpolationDefinition {}

impl Hash for CouponInflationYearOnYearInterpolationDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.terms.hash(state);
        self.price_index.hash(state);
        self.month_lag.hash(state);
        self.reference_start_dates.hash(state);
        self.reference_end_dates.hash(state);
        [self.weight_start, self.weight_end].as_slice().hash_value(state);
        self.pay_notional.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use strata_core::types::Currency;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn coupon() -> CouponInflationYearOnYearInterpolationDefinition {
        let terms = CouponTerms::new(
            Currency::EUR,
            date(2026, 5, 16),
            date(2025, 5, 16),
            date(2026, 5, 16),
            1.0,
            1_000_000.0,
        )
        .unwrap();
        CouponInflationYearOnYearInterpolationDefinition::from_dates(
            terms,
            PriceIndex::new("HICPXT", Currency::EUR),
            3,
            false,
        )
        .unwrap()
    }

    #[test]
    fn test_reference_months_and_weights() {
        let def = coupon();
        assert_eq!(def.reference_start_dates(), [date(2025, 2, 1), date(2025, 3, 1)]);
        assert_eq!(def.reference_end_dates(), [date(2026, 2, 1), date(2026, 3, 1)]);
        assert_relative_eq!(def.weight_start(), 1.0 - 15.0 / 31.0);
        assert_relative_eq!(def.weight_end(), 1.0 - 15.0 / 31.0);
    }

    #[test]
    fn test_projected_coupon_carries_both_weights() {
        let terms = CouponTerms::new(
            Currency::EUR,
            date(2026, 6, 1),
            date(2025, 5, 16),
            date(2026, 6, 1),
            1.0,
            1.0,
        )
        .unwrap();
        let def = CouponInflationYearOnYearInterpolationDefinition::from_dates(
            terms,
            PriceIndex::new("HICPXT", Currency::EUR),
            3,
            false,
        )
        .unwrap();
        let InstrumentDerivative::CouponInflationYearOnYearInterpolation(cpn) =
            def.to_derivative(date(2025, 1, 2), &["EUR-DSC", "HICPXT"]).unwrap()
        else {
            panic!("expected a year-on-year coupon");
        };
        assert_relative_eq!(cpn.weight_start(), 1.0 - 15.0 / 31.0);
        assert_eq!(cpn.weight_end(), 1.0);
        assert_eq!(cpn.price_index_curve(), "HICPXT");
        assert!(cpn.reference_start_time()[0] > 0.0);
    }

    #[test]
    fn test_start_fixed_after_accrual_start() {
        let def = coupon();
        let fixings = FixingSeries::from_pairs("HICPXT", [(date(2025, 2, 1), 120.0), (date(2025, 3, 1), 121.0)]);
        let InstrumentDerivative::CouponInflationYearOnYearInterpolation(cpn) = def
            .to_derivative_with_fixings(date(2025, 9, 1), &fixings, &["EUR-DSC", "HICPXT"])
            .unwrap()
        else {
            panic!("expected a year-on-year coupon");
        };
        let w = def.weight_start();
        assert_relative_eq!(cpn.index_start_value().unwrap(), w * 120.0 + (1.0 - w) * 121.0);
    }

    #[test]
    fn test_missing_start_fixing() {
        let def = coupon();
        let fixings = FixingSeries::from_pairs("HICPXT", [(date(2025, 2, 1), 120.0)]);
        let err = def
            .to_derivative_with_fixings(date(2025, 9, 1), &fixings, &["EUR-DSC"])
            .unwrap_err();
        assert_eq!(err, StrataError::missing_fixing("HICPXT", date(2025, 3, 1)));
    }

    #[test]
    fn test_fully_fixed_becomes_fixed_coupon() {
        let def = coupon();
        let fixings = FixingSeries::from_pairs(
            "HICPXT",
            [
                (date(2025, 2, 1), 120.0),
                (date(2025, 3, 1), 120.0),
                (date(2026, 2, 1), 123.0),
                (date(2026, 3, 1), 123.0),
            ],
        );
        let InstrumentDerivative::CouponFixed(cpn) = def
            .to_derivative_with_fixings(date(2026, 5, 16), &fixings, &["EUR-DSC"])
            .unwrap()
        else {
            panic!("expected a fixed coupon");
        };
        assert_relative_eq!(cpn.fixed_rate(), 0.025, epsilon = 1e-12);
        assert_eq!(cpn.payment_time(), 0.0);
    }

    #[test]
    fn test_paid_coupon() {
        let def = coupon();
        assert!(matches!(
            def.to_derivative_with_fixings(date(2026, 5, 17), &FixingSeries::new("HICPXT"), &["EUR-DSC"]),
            Err(StrataError::PastDate { .. })
        ));
    }
}
