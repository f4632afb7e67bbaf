//! The 30/360 family: every month has 30 days and every year 360.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// Days between `start` and `end` once their day-of-month numbers have
/// been replaced by `d1` and `d2`.
fn days_360(start: Date, end: Date, d1: u32, d2: u32) -> i64 {
    let months = 12 * i64::from(end.year() - start.year()) + i64::from(end.month()) - i64::from(start.month());
    30 * months + i64::from(d2) - i64::from(d1)
}

fn fraction_360(days: i64) -> Decimal {
    Decimal::from(days) / Decimal::from(360)
}

/// 30/360 US, the US bond basis.
///
/// A start on the 31st or on the last day of February counts as the 30th.
/// An end on the 31st counts as the 30th once the start does; an end on the
/// last day of February counts as the 30th only when the start was one too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360US;

impl DayCount for Thirty360US {
    fn name(&self) -> &'static str {
        "30/360 US"
    }

    fn year_fraction_decimal(&self, start: Date, end: Date) -> Decimal {
        fraction_360(self.day_count(start, end))
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let february_end = |d: Date| d.month() == 2 && d.is_end_of_month();
        let start_february_end = february_end(start);

        let d1 = if start_february_end { 30 } else { start.day().min(30) };
        let d2 = match end.day() {
            31 if d1 == 30 => 30,
            _ if start_february_end && february_end(end) => 30,
            day => day,
        };
        days_360(start, end, d1, d2)
    }
}

/// 30E/360, the Eurobond basis: a 31st at either end counts as the 30th.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360E;

impl DayCount for Thirty360E {
    fn name(&self) -> &'static str {
        "30E/360"
    }

    fn year_fraction_decimal(&self, start: Date, end: Date) -> Decimal {
        fraction_360(self.day_count(start, end))
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        days_360(start, end, start.day().min(30), end.day().min(30))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_thirty360_us_month_ends() {
        let dc = Thirty360US;
        assert_eq!(dc.day_count(date(2025, 1, 31), date(2025, 3, 31)), 60);
        assert_eq!(dc.day_count(date(2024, 2, 29), date(2024, 8, 31)), 180);
        assert_eq!(dc.day_count(date(2025, 1, 15), date(2025, 7, 15)), 180);
        assert_eq!(dc.year_fraction_decimal(date(2025, 1, 15), date(2025, 7, 15)), dec!(0.5));
    }

    #[test]
    fn test_thirty360_us_d2_31_kept_when_d1_early() {
        let dc = Thirty360US;
        assert_eq!(dc.day_count(date(2025, 1, 15), date(2025, 3, 31)), 76);
    }

    #[test]
    fn test_thirty360e() {
        let dc = Thirty360E;
        assert_eq!(dc.day_count(date(2025, 1, 15), date(2025, 3, 31)), 75);
        assert_eq!(dc.day_count(date(2024, 2, 29), date(2024, 8, 31)), 181);
    }
}
