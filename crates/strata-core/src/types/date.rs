//! Calendar dates.

use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{StrataError, StrataResult};

/// A calendar date, serialized as `YYYY-MM-DD`.
///
/// Dates only appear on the definition side; `to_derivative` turns every
/// one of them into a year fraction from the valuation date.
///
/// # Example
///
/// ```rust
/// use strata_core::types::Date;
///
/// let date: Date = "2025-01-31".parse().unwrap();
/// assert_eq!(date.add_months(1).unwrap(), Date::from_ymd(2025, 2, 28).unwrap());
/// assert_eq!(date.add_months(-2).unwrap().to_string(), "2024-11-30");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// The date `year-month-day`.
    ///
    /// # Errors
    ///
    /// `InvalidDate` for a day that does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> StrataResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| StrataError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month, 1 to 12.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of the month.
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Day of the year, 1 on January 1st.
    #[must_use]
    pub fn day_of_year(&self) -> u32 {
        self.0.ordinal()
    }

    /// 365 or 366.
    #[must_use]
    pub fn days_in_year(&self) -> u32 {
        if self.0.leap_year() {
            366
        } else {
            365
        }
    }

    /// Length of the date's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        self.end_of_month().day()
    }

    /// The date `days` calendar days later (earlier if negative).
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + Duration::days(days))
    }

    /// The date `months` months later, clamped to the end of the target
    /// month: 31 January plus one month is the last day of February.
    ///
    /// # Errors
    ///
    /// `InvalidDate` when the result leaves chrono's range.
    pub fn add_months(&self, months: i32) -> StrataResult<Self> {
        let shift = Months::new(months.unsigned_abs());
        let shifted = if months >= 0 {
            self.0.checked_add_months(shift)
        } else {
            self.0.checked_sub_months(shift)
        };
        shifted
            .map(Date)
            .ok_or_else(|| StrataError::invalid_date(format!("{self} shifted by {months} months")))
    }

    /// The date `years` years later; 29 February clamps to the 28th.
    ///
    /// # Errors
    ///
    /// `InvalidDate` when the result leaves chrono's range.
    pub fn add_years(&self, years: i32) -> StrataResult<Self> {
        self.add_months(years * 12)
    }

    /// Signed calendar days from `self` to `other`.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// First day of the month.
    #[must_use]
    pub fn start_of_month(&self) -> Self {
        self.add_days(1 - i64::from(self.day()))
    }

    /// Last day of the month.
    #[must_use]
    pub fn end_of_month(&self) -> Self {
        let mut last = self.start_of_month().add_days(27);
        while last.add_days(1).month() == self.month() {
            last = last.add_days(1);
        }
        last
    }

    /// Whether the date is the last day of its month.
    #[must_use]
    pub fn is_end_of_month(&self) -> bool {
        self.add_days(1).month() != self.month()
    }

    /// Saturday or Sunday.
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.0.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

impl FromStr for Date {
    type Err = StrataError;

    /// Parses `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|e| StrataError::invalid_date(format!("'{s}': {e}")))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Sub for Date {
    type Output = i64;

    /// Calendar days from `other` to `self`.
    fn sub(self, other: Date) -> i64 {
        other.days_between(&self)
    }
}
