//! Cash deposit definition.

use std::hash::{Hash, Hasher};

use strata_core::calendars::{BusinessDayConvention, Calendar};
use strata_core::daycounts::DayCountConvention;
use strata_core::time::TimeCalculator;
use strata_core::types::{Currency, Date};
use strata_core::{StrataError, StrataResult};

use super::InstrumentDefinition;
use crate::checks;
use crate::derivatives::{Cash, InstrumentDerivative};
use crate::grid::HashValue;

/// A deposit lent on `start_date` and repaid with simple interest on
/// `end_date`.
#[derive(Debug, Clone, PartialEq)]
pub struct CashDefinition {
    currency: Currency,
    start_date: Date,
    end_date: Date,
    notional: f64,
    rate: f64,
    accrual_factor: f64,
}

impl CashDefinition {
    /// Creates a deposit definition.
    ///
    /// # Errors
    ///
    /// - `InvalidDateOrder` unless `start_date < end_date`
    /// - `InvalidArgument` for a negative accrual factor or a non-finite value
    pub fn new(
        currency: Currency,
        start_date: Date,
        end_date: Date,
        notional: f64,
        rate: f64,
        accrual_factor: f64,
    ) -> StrataResult<Self> {
        if start_date >= end_date {
            return Err(StrataError::invalid_date_order(format!(
                "start date {start_date} must be before end date {end_date}"
            )));
        }
        Ok(Self {
            currency,
            start_date,
            end_date,
            notional: checks::finite("notional", notional)?,
            rate: checks::finite("rate", rate)?,
            accrual_factor: checks::non_negative("accrual factor", accrual_factor)?,
        })
    }

    /// Deposit starting on `start_date` for `tenor_months`, the end rolled
    /// on `calendar` and the accrual factor measured with `day_count`.
    #[allow(clippy::too_many_arguments)]
    pub fn from_tenor(
        currency: Currency,
        start_date: Date,
        tenor_months: u32,
        calendar: &dyn Calendar,
        convention: BusinessDayConvention,
        day_count: DayCountConvention,
        notional: f64,
        rate: f64,
    ) -> StrataResult<Self> {
        let end_date = calendar.adjust(start_date.add_months(tenor_months as i32)?, convention);
        let accrual_factor = day_count.year_fraction(start_date, end_date);
        Self::new(currency, start_date, end_date, notional, rate, accrual_factor)
    }

    /// Deposit currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Date the notional is lent.
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// Date notional and interest are repaid.
    pub fn end_date(&self) -> Date {
        self.end_date
    }

    /// Deposit notional.
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Simple interest rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Accrual factor between start and end.
    pub fn accrual_factor(&self) -> f64 {
        self.accrual_factor
    }

    /// Same deposit at another rate.
    pub fn with_rate(&self, rate: f64) -> StrataResult<Self> {
        Ok(Self {
            rate: checks::finite("rate", rate)?,
            ..self.clone()
        })
    }

    /// Same deposit with another notional.
    pub fn with_notional(&self, notional: f64) -> StrataResult<Self> {
        Ok(Self {
            notional: checks::finite("notional", notional)?,
            ..self.clone()
        })
    }

    /// The [`Cash`] derivative seen from `valuation`.
    pub fn to_cash(&self, valuation: Date, curve_names: &[&str]) -> StrataResult<Cash> {
        let curve = checks::discounting_curve(curve_names)?;
        if valuation > self.end_date {
            return Err(StrataError::past_date(valuation, "end date", self.end_date));
        }
        let times = TimeCalculator::default();
        let trade_time = times.time_between(valuation, self.start_date).max(0.0);
        let maturity = times.time_between(valuation, self.end_date);
        Cash::new(
            self.currency,
            trade_time,
            maturity,
            self.notional,
            self.rate,
            self.accrual_factor,
            &curve,
        )
    }
}

impl InstrumentDefinition for CashDefinition {
    fn to_derivative(&self, valuation: Date, curve_names: &[&str]) -> StrataResult<InstrumentDerivative> {
        self.to_cash(valuation, curve_names).map(InstrumentDerivative::Cash)
    }
}

impl Eq for CashDefinition {}

impl Hash for CashDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.currency.hash(state);
        self.start_date.hash(state);
        self.end_date.hash(state);
        [self.notional, self.rate, self.accrual_factor]
            .as_slice()
            .hash_value(state);
    }
}
