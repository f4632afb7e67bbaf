//! Instrument definitions.
//!
//! A definition holds the static terms of a trade in dates. At a
//! valuation date it projects into an [`InstrumentDerivative`], where all
//! dates become times measured from the valuation date with
//! [`TimeCalculator::default`] (ACT/365F).
//!
//! Curve names are passed as a slice: the first name is the discounting
//! curve, the second (when present) the projection curve.

mod cash;
mod coupon_ibor_average_compounding;
mod coupon_inflation_yoy;

pub use cash::CashDefinition;
pub use coupon_ibor_average_compounding::{CouponIborAverageCompoundingDefinition, FixingDateSchedule};
pub use coupon_inflation_yoy::CouponInflationYearOnYearInterpolationDefinition;

use std::hash::{Hash, Hasher};

use strata_core::time::TimeCalculator;
use strata_core::types::{Currency, Date, FixingSeries};
use strata_core::{StrataError, StrataResult};

use crate::checks;
use crate::derivatives::InstrumentDerivative;
use crate::grid::HashValue;

/// Projects a definition into its derivative at a valuation date.
pub trait InstrumentDefinition {
    /// Builds the derivative seen from `valuation`.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` when `curve_names` is empty
    /// - `PastDate` when the instrument has already paid, or when past
    ///   fixings would be needed (use [`InstrumentDefinitionWithData`])
    fn to_derivative(&self, valuation: Date, curve_names: &[&str]) -> StrataResult<InstrumentDerivative>;
}

/// Projection of a definition that may need historical fixings.
pub trait InstrumentDefinitionWithData: InstrumentDefinition {
    /// Builds the derivative seen from `valuation`, taking observed
    /// fixings from `fixings`.
    ///
    /// # Errors
    ///
    /// As [`InstrumentDefinition::to_derivative`], plus `MissingFixing` when
    /// a fixing dated before `valuation` is absent from `fixings`.
    fn to_derivative_with_fixings(
        &self,
        valuation: Date,
        fixings: &FixingSeries,
        curve_names: &[&str],
    ) -> StrataResult<InstrumentDerivative>;
}

/// Terms shared by every coupon definition.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponTerms {
    currency: Currency,
    payment_date: Date,
    accrual_start_date: Date,
    accrual_end_date: Date,
    payment_accrual_factor: f64,
    notional: f64,
}

impl CouponTerms {
    /// Creates coupon terms.
    ///
    /// # Errors
    ///
    /// - `InvalidDateOrder` unless the accrual start is before the accrual end
    /// - `InvalidArgument` for a negative accrual factor or a non-finite notional
    pub fn new(
        currency: Currency,
        payment_date: Date,
        accrual_start_date: Date,
        accrual_end_date: Date,
        payment_accrual_factor: f64,
        notional: f64,
    ) -> StrataResult<Self> {
        if accrual_start_date >= accrual_end_date {
            return Err(StrataError::invalid_date_order(format!(
                "accrual start {accrual_start_date} must be before accrual end {accrual_end_date}"
            )));
        }
        Ok(Self {
            currency,
            payment_date,
            accrual_start_date,
            accrual_end_date,
            payment_accrual_factor: checks::non_negative("payment accrual factor", payment_accrual_factor)?,
            notional: checks::finite("notional", notional)?,
        })
    }

    /// Payment currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Payment date.
    pub fn payment_date(&self) -> Date {
        self.payment_date
    }

    /// Start of the accrual period.
    pub fn accrual_start_date(&self) -> Date {
        self.accrual_start_date
    }

    /// End of the accrual period.
    pub fn accrual_end_date(&self) -> Date {
        self.accrual_end_date
    }

    /// Accrual factor of the payment.
    pub fn payment_accrual_factor(&self) -> f64 {
        self.payment_accrual_factor
    }

    /// Coupon notional.
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Same terms with another notional.
    pub fn with_notional(&self, notional: f64) -> StrataResult<Self> {
        Ok(Self {
            notional: checks::finite("notional", notional)?,
            ..self.clone()
        })
    }

    /// Fails with `PastDate` when `valuation` is after the payment date.
    pub(crate) fn check_not_paid(&self, valuation: Date) -> StrataResult<()> {
        if valuation > self.payment_date {
            return Err(StrataError::past_date(valuation, "payment date", self.payment_date));
        }
        Ok(())
    }

    /// Time from `valuation` to the payment.
    pub(crate) fn payment_time(&self, valuation: Date) -> f64 {
        TimeCalculator::default().time_between(valuation, self.payment_date)
    }
}

impl Eq for CouponTerms {}

impl Hash for CouponTerms {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.currency.hash(state);
        self.payment_date.hash(state);
        self.accrual_start_date.hash(state);
        self.accrual_end_date.hash(state);
        self.payment_accrual_factor.hash_value(state);
        self.notional.hash_value(state);
    }
}
