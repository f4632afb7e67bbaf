//! Builds time-based CDS descriptions from trade dates.

use strata_core::calendars::{BusinessDayConvention, Calendar};
use strata_core::daycounts::DayCountConvention;
use strata_core::time::TimeCalculator;
use strata_core::types::{Date, Frequency};
use strata_core::StrataError;

use crate::credit::cds::{CdsAnalytic, CdsCoupon};
use crate::error::CurveResult;

/// Standard recovery rate for senior unsecured debt.
pub const DEFAULT_RECOVERY_RATE: f64 = 0.4;

/// First IMM date (20 March, June, September or December) strictly after `date`.
pub fn next_imm_date(date: Date) -> CurveResult<Date> {
    let quarter_month = (date.month() + 2) / 3 * 3;
    let candidate = Date::from_ymd(date.year(), quarter_month, 20)?;
    if candidate > date {
        Ok(candidate)
    } else {
        Ok(candidate.add_months(3)?)
    }
}

/// Last IMM date on or before `date`.
pub fn previous_imm_date(date: Date) -> CurveResult<Date> {
    let quarter_month = date.month() / 3 * 3;
    let candidate = if quarter_month == 0 {
        Date::from_ymd(date.year() - 1, 12, 20)?
    } else {
        Date::from_ymd(date.year(), quarter_month, 20)?
    };
    if candidate <= date {
        Ok(candidate)
    } else {
        Ok(candidate.add_months(-3)?)
    }
}

/// Creates [`CdsAnalytic`]s under the standard CDS conventions.
///
/// Defaults: quarterly premiums on ACT/360 rolled Following, step-in one
/// calendar day after the trade date, cash settlement three business days
/// after it, protection from the start of the day, 40% recovery and
/// premium accrued on default paid.
///
/// # Example
///
/// ```rust
/// use strata_core::calendars::WeekendCalendar;
/// use strata_core::types::Date;
/// use strata_curves::credit::CdsFactory;
///
/// let trade = Date::from_ymd(2025, 2, 10).unwrap();
/// let cds = CdsFactory::default().make_imm_cds(trade, 60, &WeekendCalendar).unwrap();
/// // accrues from 20 Dec 2024, matures 20 Mar 2030
/// assert_eq!(cds.coupons().len(), 21);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CdsFactory {
    step_in_days: i64,
    cash_settle_days: i32,
    frequency: Frequency,
    premium_day_count: DayCountConvention,
    business_day_convention: BusinessDayConvention,
    recovery_rate: f64,
    pay_accrued_on_default: bool,
    protect_start: bool,
    time: TimeCalculator,
}

impl Default for CdsFactory {
    fn default() -> Self {
        Self {
            step_in_days: 1,
            cash_settle_days: 3,
            frequency: Frequency::Quarterly,
            premium_day_count: DayCountConvention::Act360,
            business_day_convention: BusinessDayConvention::Following,
            recovery_rate: DEFAULT_RECOVERY_RATE,
            pay_accrued_on_default: true,
            protect_start: true,
            time: TimeCalculator::default(),
        }
    }
}

impl CdsFactory {
    /// Sets the recovery rate.
    #[must_use]
    pub fn with_recovery_rate(mut self, recovery_rate: f64) -> Self {
        self.recovery_rate = recovery_rate;
        self
    }

    /// Sets whether premium accrued on default is paid.
    #[must_use]
    pub fn with_pay_accrued_on_default(mut self, pay: bool) -> Self {
        self.pay_accrued_on_default = pay;
        self
    }

    /// Sets the cash settlement lag in business days.
    #[must_use]
    pub fn with_cash_settle_days(mut self, days: i32) -> Self {
        self.cash_settle_days = days;
        self
    }

    /// Sets the premium frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets whether protection starts at the beginning of the day.
    #[must_use]
    pub fn with_protect_start(mut self, protect_start: bool) -> Self {
        self.protect_start = protect_start;
        self
    }

    /// A CDS accruing from `accrual_start` and maturing on `maturity`, seen from `trade_date`.
    ///
    /// # Errors
    ///
    /// `InvalidDateOrder` when `maturity` is not after both the accrual
    /// start and the step-in date.
    pub fn make_cds(
        &self,
        trade_date: Date,
        accrual_start: Date,
        maturity: Date,
        calendar: &dyn Calendar,
    ) -> CurveResult<CdsAnalytic> {
        let step_in = trade_date.add_days(self.step_in_days);
        if maturity <= accrual_start || maturity < step_in {
            return Err(StrataError::invalid_date_order(format!(
                "maturity {maturity} must be after accrual start {accrual_start} and step-in {step_in}"
            ))
            .into());
        }
        let cash_settle = calendar.add_business_days(trade_date, self.cash_settle_days);
        let day_shift = i64::from(self.protect_start);
        let to_time = |date: Date| self.time.time_between(trade_date, date);

        let protection_start = to_time(step_in.max(accrual_start).add_days(-day_shift)).max(0.0);
        let protection_end = to_time(maturity);

        let dates = self.premium_dates(accrual_start, maturity)?;
        let last = dates.len() - 2;
        let mut coupons = Vec::with_capacity(dates.len() - 1);
        let mut accrued = 0.0;
        for (k, pair) in dates.windows(2).enumerate() {
            let start = if k == 0 {
                pair[0]
            } else {
                calendar.adjust(pair[0], self.business_day_convention)
            };
            let payment = calendar.adjust(pair[1], self.business_day_convention);
            let end = if k == last {
                maturity.add_days(day_shift)
            } else {
                payment
            };
            if end <= step_in {
                continue;
            }
            if coupons.is_empty() && start < step_in {
                accrued = self.premium_day_count.year_fraction(start, step_in);
            }
            coupons.push(CdsCoupon::new(
                to_time(start.add_days(-day_shift)),
                to_time(end.add_days(-day_shift)),
                to_time(payment),
                self.premium_day_count.year_fraction(start, end),
            )?);
        }

        CdsAnalytic::new(
            protection_start,
            protection_end,
            to_time(cash_settle),
            coupons,
            self.recovery_rate,
            accrued,
            self.pay_accrued_on_default,
        )
    }

    /// A standard CDS: accrual from the IMM date on or before step-in,
    /// maturity `tenor_months` after the next IMM date.
    pub fn make_imm_cds(&self, trade_date: Date, tenor_months: i32, calendar: &dyn Calendar) -> CurveResult<CdsAnalytic> {
        let step_in = trade_date.add_days(self.step_in_days);
        let accrual_start = calendar.adjust(previous_imm_date(step_in)?, self.business_day_convention);
        let maturity = next_imm_date(trade_date)?.add_months(tenor_months)?;
        self.make_cds(trade_date, accrual_start, maturity, calendar)
    }

    /// Standard CDSs for each tenor, in the order given.
    pub fn make_imm_cds_series(
        &self,
        trade_date: Date,
        tenors_months: &[i32],
        calendar: &dyn Calendar,
    ) -> CurveResult<Vec<CdsAnalytic>> {
        tenors_months
            .iter()
            .map(|tenor| self.make_imm_cds(trade_date, *tenor, calendar))
            .collect()
    }

    /// Unadjusted period boundaries rolled back from maturity; a short
    /// first period absorbs the remainder.
    fn premium_dates(&self, accrual_start: Date, maturity: Date) -> CurveResult<Vec<Date>> {
        let step = self.frequency.months_per_period();
        let mut dates = vec![maturity];
        let mut periods = 1;
        loop {
            let date = maturity.add_months(-step * periods)?;
            if date <= accrual_start {
                dates.push(accrual_start);
                break;
            }
            dates.push(date);
            periods += 1;
        }
        dates.reverse();
        Ok(dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use strata_core::calendars::WeekendCalendar;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_imm_dates() {
        assert_eq!(next_imm_date(date(2025, 2, 10)).unwrap(), date(2025, 3, 20));
        assert_eq!(next_imm_date(date(2025, 3, 20)).unwrap(), date(2025, 6, 20));
        assert_eq!(next_imm_date(date(2025, 12, 21)).unwrap(), date(2026, 3, 20));
        assert_eq!(previous_imm_date(date(2025, 2, 10)).unwrap(), date(2024, 12, 20));
        assert_eq!(previous_imm_date(date(2025, 3, 20)).unwrap(), date(2025, 3, 20));
        assert_eq!(previous_imm_date(date(2025, 3, 19)).unwrap(), date(2024, 12, 20));
        assert_eq!(previous_imm_date(date(2025, 8, 1)).unwrap(), date(2025, 6, 20));
    }

    #[test]
    fn test_standard_cds_layout() {
        let trade = date(2025, 2, 10);
        let cds = CdsFactory::default().make_imm_cds(trade, 12, &WeekendCalendar).unwrap();
        // 20 Dec 2024 .. 20 Mar 2026 in quarterly steps
        assert_eq!(cds.coupons().len(), 5);
        assert_eq!(cds.protection_start(), 0.0);
        assert_relative_eq!(cds.protection_end(), 403.0 / 365.0);
        // 13 Feb 2025, three business days after a Monday
        assert_relative_eq!(cds.valuation_time(), 3.0 / 365.0);
        // Dec 20 (Fri) to step-in Feb 11 is 53 days
        assert_relative_eq!(cds.accrued_year_fraction(), 53.0 / 360.0);

        let first = cds.coupons()[0];
        assert_relative_eq!(first.effective_start, -53.0 / 365.0);
        // 20 Mar 2025 is a Thursday: 90 days of accrual
        assert_relative_eq!(first.year_fraction, 90.0 / 360.0);

        let last = cds.coupons()[4];
        assert_relative_eq!(last.effective_end, cds.protection_end());
        // final period includes the maturity date: 20 Dec 2025 (Sat) rolls to the 22nd
        assert_relative_eq!(last.year_fraction, 89.0 / 360.0);
    }

    #[test]
    fn test_maturity_before_step_in() {
        let trade = date(2025, 2, 10);
        let err = CdsFactory::default()
            .make_cds(trade, date(2024, 12, 20), date(2025, 2, 10), &WeekendCalendar)
            .unwrap_err();
        assert!(matches!(err, crate::error::CurveError::Core(StrataError::InvalidDateOrder { .. })));
    }
}
