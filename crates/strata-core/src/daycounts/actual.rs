//! Actual/fixed-basis day counts: actual days over a constant year length.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

macro_rules! actual_fixed {
    ($(#[$doc:meta])* $name:ident, $basis:literal, $label:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl DayCount for $name {
            fn name(&self) -> &'static str {
                $label
            }

            fn year_fraction_decimal(&self, start: Date, end: Date) -> Decimal {
                Decimal::from(self.day_count(start, end)) / Decimal::from($basis)
            }

            fn day_count(&self, start: Date, end: Date) -> i64 {
                start.days_between(&end)
            }
        }
    };
}

actual_fixed!(
    /// Actual/360: money market deposits, Ibor fixing periods and CDS
    /// premium accrual.
    Act360,
    360,
    "ACT/360"
);

actual_fixed!(
    /// Actual/365 Fixed, ignoring leap years.
    ///
    /// The ISDA standard model places curve nodes with it, so it is the
    /// default of [`crate::time::TimeCalculator`].
    Act365Fixed,
    365,
    "ACT/365F"
);
