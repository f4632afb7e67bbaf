//! Rate and price index descriptions.

use serde::{Deserialize, Serialize};

use strata_core::calendars::{BusinessDayConvention, Calendar};
use strata_core::daycounts::DayCountConvention;
use strata_core::types::{Currency, Date};
use strata_core::StrataResult;

/// An Ibor-like term rate index (e.g. EURIBOR 3M).
///
/// Carries everything needed to turn a fixing date into the fixing
/// period the published rate applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IborIndex {
    /// Index name, also the key of its fixing series.
    pub name: String,
    /// Currency of the index.
    pub currency: Currency,
    /// Tenor of the deposit period in months.
    pub tenor_months: u32,
    /// Business days between fixing and the start of the deposit period.
    pub spot_lag: u32,
    /// Day count of the deposit period.
    pub day_count: DayCountConvention,
    /// Roll convention for the deposit period end.
    pub business_day_convention: BusinessDayConvention,
    /// Whether period ends roll to month end when the start is a month end.
    pub end_of_month: bool,
}

impl IborIndex {
    /// Creates an index with ACT/360, Modified Following and end-of-month rolling.
    #[must_use]
    pub fn new(name: impl Into<String>, currency: Currency, tenor_months: u32, spot_lag: u32) -> Self {
        Self {
            name: name.into(),
            currency,
            tenor_months,
            spot_lag,
            day_count: DayCountConvention::Act360,
            business_day_convention: BusinessDayConvention::ModifiedFollowing,
            end_of_month: true,
        }
    }

    /// Sets the day count.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Start of the deposit period fixed on `fixing_date`.
    #[must_use]
    pub fn period_start(&self, fixing_date: Date, calendar: &dyn Calendar) -> Date {
        calendar.add_business_days(fixing_date, self.spot_lag as i32)
    }

    /// End of the deposit period starting on `start`.
    pub fn period_end(&self, start: Date, calendar: &dyn Calendar) -> StrataResult<Date> {
        let unadjusted = start.add_months(self.tenor_months as i32)?;
        let unadjusted = if self.end_of_month && start.is_end_of_month() {
            unadjusted.end_of_month()
        } else {
            unadjusted
        };
        Ok(calendar.adjust(unadjusted, self.business_day_convention))
    }

    /// Accrual factor of the deposit period `[start, end]`.
    #[must_use]
    pub fn accrual_factor(&self, start: Date, end: Date) -> f64 {
        self.day_count.year_fraction(start, end)
    }
}

/// A consumer price index (e.g. US CPI-U, EU HICP ex-tobacco).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceIndex {
    /// Index name, also the key of its fixing series and projection curve.
    pub name: String,
    /// Currency of the index.
    pub currency: Currency,
}

impl PriceIndex {
    /// Creates a price index.
    #[must_use]
    pub fn new(name: impl Into<String>, currency: Currency) -> Self {
        Self {
            name: name.into(),
            currency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::calendars::WeekendCalendar;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_fixing_period_from_fixing_date() {
        let index = IborIndex::new("EURIBOR3M", Currency::EUR, 3, 2);
        let cal = WeekendCalendar;
        // Thursday fixing, spot on Monday
        let start = index.period_start(date(2025, 1, 9), &cal);
        assert_eq!(start, date(2025, 1, 13));
        assert_eq!(index.period_end(start, &cal).unwrap(), date(2025, 4, 14));
    }

    #[test]
    fn test_end_of_month_rolls_to_month_end() {
        let index = IborIndex::new("USDLIBOR3M", Currency::USD, 3, 2);
        let cal = WeekendCalendar;
        // 2025-04-30 is a Wednesday month end, 2025-07-31 a Thursday
        assert_eq!(index.period_end(date(2025, 4, 30), &cal).unwrap(), date(2025, 7, 31));
    }

    #[test]
    fn test_modified_following_end() {
        let index = IborIndex::new("EURIBOR1M", Currency::EUR, 1, 2);
        let cal = WeekendCalendar;
        // 2025-05-31 is a Saturday: modified following stays in May
        assert_eq!(index.period_end(date(2025, 4, 30), &cal).unwrap(), date(2025, 5, 30));
    }

    #[test]
    fn test_serde_round_trip() {
        let index = IborIndex::new("EURIBOR6M", Currency::EUR, 6, 2);
        let json = serde_json::to_string(&index).unwrap();
        let back: IborIndex = serde_json::from_str(&json).unwrap();
        assert_eq!(back, index);
    }
}
