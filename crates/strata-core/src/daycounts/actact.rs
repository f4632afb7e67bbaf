//! Actual/Actual ISDA.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// Actual/Actual ISDA: the days of each calendar year in the period are
/// divided by that year's length, 366 in leap years and 365 otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActActIsda;

/// Sum over the calendar years touched by `[start, end)`, for `start <= end`.
fn split_by_year(start: Date, end: Date) -> Decimal {
    (start.year()..=end.year())
        .map(|year| {
            let first = if year == start.year() { start } else { january_first(year, end) };
            let last = if year == end.year() { end } else { january_first(year + 1, end) };
            Decimal::from(first.days_between(&last)) / Decimal::from(first.days_in_year())
        })
        .sum()
}

/// January 1st of `year`, reached by stepping back from `anchor` (which lies
/// in `year` or later) so no fallible constructor is involved.
fn january_first(year: i32, anchor: Date) -> Date {
    let mut date = anchor.add_days(1 - i64::from(anchor.day_of_year()));
    while date.year() > year {
        date = date.add_days(-1);
        date = date.add_days(1 - i64::from(date.day_of_year()));
    }
    date
}

impl DayCount for ActActIsda {
    fn name(&self) -> &'static str {
        "ACT/ACT ISDA"
    }

    fn year_fraction_decimal(&self, start: Date, end: Date) -> Decimal {
        if start <= end {
            split_by_year(start, end)
        } else {
            -split_by_year(end, start)
        }
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}
