//! Ibor coupon compounding period averages.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use strata_core::types::Currency;
use strata_core::{StrataError, StrataResult};

use crate::checks;
use crate::grid::{HashValue, PeriodGrid};
use crate::index::IborIndex;

/// The per-period fixing data of an averaging coupon, as times.
///
/// All five grids must share one shape: entry `(k, j)` of each describes
/// fixing `j` of compounding period `k`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompoundingSchedule {
    /// Fixing times.
    pub fixing_time: PeriodGrid<f64>,
    /// Averaging weights.
    pub weight: PeriodGrid<f64>,
    /// Start times of the deposit periods behind each fixing.
    pub fixing_period_start_time: PeriodGrid<f64>,
    /// End times of the deposit periods behind each fixing.
    pub fixing_period_end_time: PeriodGrid<f64>,
    /// Index accrual factors of the deposit periods.
    pub fixing_period_accrual_factor: PeriodGrid<f64>,
}

impl CompoundingSchedule {
    /// Checks that every grid has the shape of `fixing_time` and holds finite values.
    pub fn validate(&self) -> StrataResult<()> {
        let reference = &self.fixing_time;
        reference.check_same_shape(&self.weight, "weight")?;
        reference.check_same_shape(&self.fixing_period_start_time, "fixing period start time")?;
        reference.check_same_shape(&self.fixing_period_end_time, "fixing period end time")?;
        reference.check_same_shape(&self.fixing_period_accrual_factor, "fixing period accrual factor")?;

        checks::all_finite("fixing time", reference.iter())?;
        checks::all_finite("weight", self.weight.iter())?;
        checks::all_finite("fixing period start time", self.fixing_period_start_time.iter())?;
        checks::all_finite("fixing period end time", self.fixing_period_end_time.iter())?;
        checks::all_finite("fixing period accrual factor", self.fixing_period_accrual_factor.iter())
    }

    /// Number of compounding periods.
    pub fn period_count(&self) -> usize {
        self.fixing_time.period_count()
    }
}

/// A coupon whose rate compounds, period by period, a weighted average
/// of Ibor fixings.
///
/// The amount paid is
/// `N · (A · Π_k (1 + δ_k · (R·[k=0] + Σ_j w_kj · F_kj)) - 1)`,
/// with `A` the accrued compounding factor of periods already fully fixed,
/// `R` the weighted fixings already observed in the first remaining
/// period and `F_kj` the projected forwards of the remaining fixings.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponIborAverageCompounding {
    currency: Currency,
    payment_time: f64,
    payment_year_fraction: f64,
    notional: f64,
    payment_accrual_factors: Arc<Vec<f64>>,
    index: Arc<IborIndex>,
    schedule: Arc<CompoundingSchedule>,
    amount_accrued: f64,
    rate_fixed: f64,
    discounting_curve: String,
    forward_curve: String,
}

impl CouponIborAverageCompounding {
    /// Creates the coupon.
    ///
    /// # Errors
    ///
    /// - `InconsistentDataLength` when the schedule grids differ in shape or
    ///   `payment_accrual_factors` does not hold one factor per period
    /// - `InvalidArgument` for a negative time or accrual factor, a currency
    ///   mismatch with the index or an empty curve name
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        currency: Currency,
        payment_time: f64,
        payment_year_fraction: f64,
        notional: f64,
        payment_accrual_factors: Vec<f64>,
        index: IborIndex,
        schedule: CompoundingSchedule,
        amount_accrued: f64,
        rate_fixed: f64,
        discounting_curve: &str,
        forward_curve: &str,
    ) -> StrataResult<Self> {
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
        checks::same_currency("index", currency, index.currency)?;

        Ok(Self {
            currency,
            payment_time: checks::non_negative("payment time", payment_time)?,
            payment_year_fraction: checks::non_negative("payment year fraction", payment_year_fraction)?,
            notional: checks::finite("notional", notional)?,
            payment_accrual_factors: Arc::new(payment_accrual_factors),
            index: Arc::new(index),
            schedule: Arc::new(schedule),
            amount_accrued: checks::finite("amount accrued", amount_accrued)?,
            rate_fixed: checks::finite("rate fixed", rate_fixed)?,
            discounting_curve: checks::curve_name(discounting_curve)?,
            forward_curve: checks::curve_name(forward_curve)?,
        })
    }

    /// Payment currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Time of the payment.
    pub fn payment_time(&self) -> f64 {
        self.payment_time
    }

    /// Accrual factor of the whole coupon.
    pub fn payment_year_fraction(&self) -> f64 {
        self.payment_year_fraction
    }

    /// Coupon notional.
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Accrual factor of each remaining compounding period.
    pub fn payment_accrual_factors(&self) -> &[f64] {
        &self.payment_accrual_factors
    }

    /// The index fixed.
    pub fn index(&self) -> &IborIndex {
        &self.index
    }

    /// Fixing data of the remaining periods.
    pub fn schedule(&self) -> &CompoundingSchedule {
        &self.schedule
    }

    /// Fixing times.
    pub fn fixing_time(&self) -> &PeriodGrid<f64> {
        &self.schedule.fixing_time
    }

    /// Averaging weights.
    pub fn weight(&self) -> &PeriodGrid<f64> {
        &self.schedule.weight
    }

    /// Compounding factor of the periods already fully fixed.
    pub fn amount_accrued(&self) -> f64 {
        self.amount_accrued
    }

    /// Weighted fixings already observed in the first remaining period.
    pub fn rate_fixed(&self) -> f64 {
        self.rate_fixed
    }

    /// Discounting curve name.
    pub fn discounting_curve(&self) -> &str {
        &self.discounting_curve
    }

    /// Forward projection curve name.
    pub fn forward_curve(&self) -> &str {
        &self.forward_curve
    }

    /// Same coupon with another notional; the schedule is shared.
    pub fn with_notional(&self, notional: f64) -> StrataResult<Self> {
        Ok(Self {
            notional: checks::finite("notional", notional)?,
            ..self.clone()
        })
    }
}

impl Eq for CouponIborAverageCompounding {}

impl Hash for CouponIborAverageCompounding {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.currency.hash(state);
        [
            self.payment_time,
            self.payment_year_fraction,
            self.notional,
            self.amount_accrued,
            self.rate_fixed,
        ]
        .as_slice()
        .hash_value(state);
        self.payment_accrual_factors.as_slice().hash_value(state);
        self.index.hash(state);
        self.schedule.hash(state);
        self.discounting_curve.hash(state);
        self.forward_curve.hash(state);
    }
}
