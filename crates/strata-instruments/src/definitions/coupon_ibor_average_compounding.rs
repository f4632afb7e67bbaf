//! Averaging compounded Ibor coupon definition.

use std::hash::{Hash, Hasher};

use strata_core::calendars::Calendar;
use strata_core::time::TimeCalculator;
use strata_core::types::{Date, FixingSeries};
use strata_core::{StrataError, StrataResult};

use super::{CouponTerms, InstrumentDefinition, InstrumentDefinitionWithData};
use crate::checks;
use crate::derivatives::{CompoundingSchedule, CouponFixed, CouponIborAverageCompounding, InstrumentDerivative};
use crate::grid::{HashValue, PeriodGrid};
use crate::index::IborIndex;

/// The per-period fixings of an averaging coupon, as dates.
///
/// All five grids must share one shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixingDateSchedule {
    /// Fixing dates; non-decreasing across the whole schedule.
    pub fixing_dates: PeriodGrid<Date>,
    /// Averaging weights.
    pub weight: PeriodGrid<f64>,
    /// Start dates of the deposit periods behind each fixing.
    pub fixing_period_start_dates: PeriodGrid<Date>,
    /// End dates of the deposit periods behind each fixing.
    pub fixing_period_end_dates: PeriodGrid<Date>,
    /// Index accrual factors of the deposit periods.
    pub fixing_period_accrual_factors: PeriodGrid<f64>,
}

impl FixingDateSchedule {
    /// Derives the deposit periods of each fixing from `index` and `calendar`.
    pub fn from_fixing_dates(
        index: &IborIndex,
        fixing_dates: PeriodGrid<Date>,
        weight: PeriodGrid<f64>,
        calendar: &dyn Calendar,
    ) -> StrataResult<Self> {
        let fixing_period_start_dates = fixing_dates.map(|d| index.period_start(*d, calendar));
        let periods = fixing_period_start_dates.try_map(|s| index.period_end(*s, calendar).map(|e| (*s, e)))?;
        let fixing_period_end_dates = periods.map(|(_, end)| *end);
        let fixing_period_accrual_factors = periods.map(|(start, end)| index.accrual_factor(*start, *end));

        Ok(Self {
            fixing_dates,
            weight,
            fixing_period_start_dates,
            fixing_period_end_dates,
            fixing_period_accrual_factors,
        })
    }

    /// Checks shapes, values and date ordering.
    pub fn validate(&self) -> StrataResult<()> {
        let reference = &self.fixing_dates;
        reference.check_same_shape(&self.weight, "weight")?;
        reference.check_same_shape(&self.fixing_period_start_dates, "fixing period start dates")?;
        reference.check_same_shape(&self.fixing_period_end_dates, "fixing period end dates")?;
        reference.check_same_shape(&self.fixing_period_accrual_factors, "fixing period accrual factors")?;

        checks::all_finite("weight", self.weight.iter())?;
        for factor in self.fixing_period_accrual_factors.iter() {
            checks::non_negative("fixing period accrual factor", *factor)?;
        }

        let dates: Vec<Date> = reference.iter().copied().collect();
        if let Some(pair) = dates.windows(2).find(|pair| pair[1] < pair[0]) {
            return Err(StrataError::invalid_date_order(format!(
                "fixing date {} follows {}",
                pair[1], pair[0]
            )));
        }
        let ends: Vec<Date> = self.fixing_period_end_dates.iter().copied().collect();
        for (start, end) in self.fixing_period_start_dates.iter().zip(&ends) {
            if start >= end {
                return Err(StrataError::invalid_date_order(format!(
                    "fixing period start {start} must be before its end {end}"
                )));
            }
        }
        Ok(())
    }

    /// Number of compounding periods.
    pub fn period_count(&self) -> usize {
        self.fixing_dates.period_count()
    }
}

/// A coupon compounding, period by period, a weighted average of Ibor
/// fixings.
///
/// Each compounding period `k` accrues `δ_k · Σ_j w_kj · L_kj` where the
/// `L_kj` are fixings of the index on the period's fixing dates.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponIborAverageCompoundingDefinition {
    terms: CouponTerms,
    index: IborIndex,
    payment_accrual_factors: Vec<f64>,
    schedule: FixingDateSchedule,
}

impl CouponIborAverageCompoundingDefinition {
    /// Creates the definition.
    ///
    /// # Errors
    ///
    /// - `InconsistentDataLength` when the schedule grids differ in shape or
    ///   there is not one payment accrual factor per period
    /// - `InvalidArgument` when the index currency is not the coupon currency
    /// - `InvalidDateOrder` for decreasing fixing dates or an empty fixing
    ///   period
    pub fn new(
        terms: CouponTerms,
        index: IborIndex,
        payment_accrual_factors: Vec<f64>,
        schedule: FixingDateSchedule,
    ) -> StrataResult<Self> {
        checks::same_currency("index", terms.currency(), index.currency)?;
        schedule.validate()?;
        if payment_accrual_factors.len() != schedule.period_count() {
            return Err(StrataError::inconsistent_length(
                "payment accrual factors",
                schedule.period_count(),
                payment_accrual_factors.len(),
            ));
        }
        for factor in &payment_accrual_factors {
            checks::non_negative("payment accrual factor", *factor)?;
        }
        Ok(Self {
            terms,
            index,
            payment_accrual_factors,
            schedule,
        })
    }

    /// Creates the definition, deriving the deposit periods of each fixing
    /// from the index conventions and `calendar`.
    pub fn from_fixing_dates(
        terms: CouponTerms,
        index: IborIndex,
        payment_accrual_factors: Vec<f64>,
        fixing_dates: PeriodGrid<Date>,
        weight: PeriodGrid<f64>,
        calendar: &dyn Calendar,
    ) -> StrataResult<Self> {
        fixing_dates.check_same_shape(&weight, "weight")?;
        let schedule = FixingDateSchedule::from_fixing_dates(&index, fixing_dates, weight, calendar)?;
        Self::new(terms, index, payment_accrual_factors, schedule)
    }

    /// Coupon terms.
    pub fn terms(&self) -> &CouponTerms {
        &self.terms
    }

    /// The index fixed.
    pub fn index(&self) -> &IborIndex {
        &self.index
    }

    /// Accrual factor of each compounding period.
    pub fn payment_accrual_factors(&self) -> &[f64] {
        &self.payment_accrual_factors
    }

    /// The fixing schedule.
    pub fn schedule(&self) -> &FixingDateSchedule {
        &self.schedule
    }

    /// Same coupon with another notional.
    pub fn with_notional(&self, notional: f64) -> StrataResult<Self> {
        Ok(Self {
            terms: self.terms.with_notional(notional)?,
            ..self.clone()
        })
    }

    fn first_fixing_date(&self) -> Option<Date> {
        self.schedule.fixing_dates.iter().next().copied()
    }
}

impl InstrumentDefinition for CouponIborAverageCompoundingDefinition {
    fn to_derivative(&self, valuation: Date, curve_names: &[&str]) -> StrataResult<InstrumentDerivative> {
        checks::discounting_curve(curve_names)?;
        self.terms.check_not_paid(valuation)?;
        if let Some(first) = self.first_fixing_date() {
            if valuation > first {
                return Err(StrataError::past_date(valuation, "first fixing date", first));
            }
        }
        self.to_derivative_with_fixings(valuation, &FixingSeries::new(self.index.name.clone()), curve_names)
    }
}

impl InstrumentDefinitionWithData for CouponIborAverageCompoundingDefinition {
    fn to_derivative_with_fixings(
        &self,
        valuation: Date,
        fixings: &FixingSeries,
        curve_names: &[&str],
    ) -> StrataResult<InstrumentDerivative> {
        let discounting = checks::discounting_curve(curve_names)?;
        let forward = checks::forward_curve(curve_names)?;
        self.terms.check_not_paid(valuation)?;

        let mut amount_accrued = 1.0;
        let mut rate_fixed = 0.0;
        let mut first_open = None;

        'periods: for (k, dates) in self.schedule.fixing_dates.periods().enumerate() {
            let weights = self.schedule.weight.period(k);
            let mut observed = 0.0;
            for (j, date) in dates.iter().enumerate() {
                let fixing = if *date < valuation {
                    Some(
                        fixings
                            .value_at(*date)
                            .ok_or_else(|| StrataError::missing_fixing(self.index.name.clone(), *date))?,
                    )
                } else if *date == valuation {
                    fixings.value_at(*date)
                } else {
                    None
                };
                match fixing {
                    Some(value) => observed += weights[j] * value,
                    None => {
                        rate_fixed = observed;
                        first_open = Some((k, j));
                        break 'periods;
                    }
                }
            }
            amount_accrued *= 1.0 + self.payment_accrual_factors[k] * observed;
        }

        let payment_time = self.terms.payment_time(valuation);
        let Some((period, entry)) = first_open else {
            let accrual = self.terms.payment_accrual_factor();
            if accrual <= 0.0 {
                return Err(StrataError::invalid_argument(
                    "a fully fixed coupon needs a positive payment accrual factor",
                ));
            }
            return CouponFixed::new(
                self.terms.currency(),
                payment_time,
                accrual,
                self.terms.notional(),
                (amount_accrued - 1.0) / accrual,
                &discounting,
            )
            .map(InstrumentDerivative::CouponFixed);
        };

        let times = TimeCalculator::default();
        let to_time = |d: &Date| times.time_between(valuation, *d);
        let schedule = CompoundingSchedule {
            fixing_time: self.schedule.fixing_dates.suffix(period, entry).map(to_time),
            weight: self.schedule.weight.suffix(period, entry),
            fixing_period_start_time: self.schedule.fixing_period_start_dates.suffix(period, entry).map(to_time),
            fixing_period_end_time: self.schedule.fixing_period_end_dates.suffix(period, entry).map(to_time),
            fixing_period_accrual_factor: self.schedule.fixing_period_accrual_factors.suffix(period, entry),
        };

        CouponIborAverageCompounding::new(
            self.terms.currency(),
            payment_time,
            self.terms.payment_accrual_factor(),
            self.terms.notional(),
            self.payment_accrual_factors[period..].to_vec(),
            self.index.clone(),
            schedule,
            amount_accrued,
            rate_fixed,
            &discounting,
            &forward,
        )
        .map(InstrumentDerivative::CouponIborAverageCompounding)
    }
}

impl Eq for CouponIborAverageCompoundingDefinition {}

impl Hash for CouponIborAverageCompoundingDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.terms.hash(state);
        self.index.hash(state);
        self.payment_accrual_factors.as_slice().hash_value(state);
        self.schedule.hash(state);
    }
}
