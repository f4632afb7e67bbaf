//! Business day calendars and conventions.
//!
//! A calendar is a set-membership predicate over dates. The fixing and
//! payment schedules of the definition layer are rolled with
//! [`Calendar::adjust`] under a [`BusinessDayConvention`].

mod conventions;

pub use conventions::BusinessDayConvention;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::Date;

/// A holiday calendar: decides which dates are good business days.
///
/// Only [`is_business_day`](Calendar::is_business_day) is required; date
/// rolling and business day arithmetic are derived from it.
pub trait Calendar: Send + Sync {
    /// Calendar identifier.
    fn name(&self) -> &str;

    /// Whether `date` is a good business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Whether `date` is a weekend day or holiday.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Rolls `date` under `convention`.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        convention.apply(date, self)
    }

    /// The date `days` business days after `date`; negative counts go back.
    /// Zero returns `date` itself, business day or not.
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let step = i64::from(days.signum());
        (0..days.unsigned_abs()).fold(date, |mut current, _| {
            current = current.add_days(step);
            while !self.is_business_day(current) {
                current = current.add_days(step);
            }
            current
        })
    }
}

/// Monday-to-Friday calendar without holidays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &str {
        "WEEKEND"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// Weekends plus an explicit list of holidays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    name: String,
    holidays: BTreeSet<Date>,
}

impl HolidayCalendar {
    /// Creates a calendar with the given holidays.
    #[must_use]
    pub fn new(name: impl Into<String>, holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            name: name.into(),
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Number of explicit holidays.
    #[must_use]
    pub fn holiday_count(&self) -> usize {
        self.holidays.len()
    }
}

impl Calendar for HolidayCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.holidays.contains(&date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;
        assert!(cal.is_business_day(date(2025, 1, 6)));
        assert!(!cal.is_business_day(date(2025, 1, 4)));
        assert!(cal.is_holiday(date(2025, 1, 5)));
    }

    #[test]
    fn test_add_business_days_skips_weekend() {
        let cal = WeekendCalendar;
        let friday = date(2025, 1, 3);
        assert_eq!(cal.add_business_days(friday, 1), date(2025, 1, 6));
        assert_eq!(cal.add_business_days(date(2025, 1, 6), -1), friday);
        assert_eq!(cal.add_business_days(friday, 0), friday);
    }

    #[test]
    fn test_holiday_calendar() {
        let new_year = date(2025, 1, 1);
        let cal = HolidayCalendar::new("TEST", [new_year]);
        assert_eq!(cal.name(), "TEST");
        assert_eq!(cal.holiday_count(), 1);
        assert!(!cal.is_business_day(new_year));
        assert_eq!(cal.add_business_days(date(2024, 12, 31), 1), date(2025, 1, 2));
    }
}
