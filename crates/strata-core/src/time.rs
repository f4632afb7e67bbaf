//! Conversion of calendar dates to signed times.
//!
//! Every time field of a derivative is the year fraction from the
//! valuation date to some trade date. Those fractions are signed: a date
//! before the valuation date yields a negative time. Whether a negative
//! time is acceptable is decided by the call site, which uses
//! [`TimeCalculator::time_until`] where a past date is an error.

use serde::{Deserialize, Serialize};

use crate::daycounts::{DayCount, DayCountConvention};
use crate::error::{StrataError, StrataResult};
use crate::types::Date;

/// Year fraction between two dates under `day_count`.
///
/// Never clamps: the result is negative when `date1 > date2`.
#[must_use]
pub fn year_fraction(date1: Date, date2: Date, day_count: &dyn DayCount) -> f64 {
    day_count.year_fraction(date1, date2)
}

/// Converts dates to times relative to a valuation date.
///
/// The default convention is ACT/365 Fixed, which is how the ISDA
/// standard model places curve nodes and cash flow times.
///
/// # Example
///
/// ```rust
/// use strata_core::time::TimeCalculator;
/// use strata_core::types::Date;
///
/// let calc = TimeCalculator::default();
/// let val = Date::from_ymd(2025, 3, 1).unwrap();
/// let later = Date::from_ymd(2026, 3, 1).unwrap();
/// assert_eq!(calc.time_between(val, later), 1.0);
/// assert_eq!(calc.time_between(later, val), -1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeCalculator {
    convention: DayCountConvention,
}

impl Default for TimeCalculator {
    fn default() -> Self {
        Self::new(DayCountConvention::Act365Fixed)
    }
}

impl TimeCalculator {
    /// Creates a calculator using the given convention.
    #[must_use]
    pub fn new(convention: DayCountConvention) -> Self {
        Self { convention }
    }

    /// The convention in use.
    #[must_use]
    pub fn convention(&self) -> DayCountConvention {
        self.convention
    }

    /// Signed time from `valuation` to `target`.
    #[must_use]
    pub fn time_between(&self, valuation: Date, target: Date) -> f64 {
        self.convention.year_fraction(valuation, target)
    }

    /// Time from `valuation` to `target`, which must not be in the past.
    ///
    /// # Errors
    ///
    /// Returns `StrataError::InvalidDateOrder` when `valuation > target`.
    pub fn time_until(&self, valuation: Date, target: Date) -> StrataResult<f64> {
        if valuation > target {
            return Err(StrataError::invalid_date_order(format!(
                "valuation date {valuation} is after {target}"
            )));
        }
        Ok(self.time_between(valuation, target))
    }

    /// Times from `valuation` to each date, in order.
    #[must_use]
    pub fn times(&self, valuation: Date, dates: &[Date]) -> Vec<f64> {
        dates.iter().map(|d| self.time_between(valuation, *d)).collect()
    }
}
